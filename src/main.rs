use book_api::config::Config;
use book_api::database::{SqliteBookRepository, establish_pool};
use book_api::http::{AppState, HttpServer, HttpServerConfig};
use book_api::service::Service;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let pool = establish_pool(config.database_url(), config.database_max_connections()).await?;
    let book_service = Service::new(SqliteBookRepository::new(pool));

    let state = AppState::new(book_service);
    let server_config = HttpServerConfig::new(config.server_port());
    let http_server = HttpServer::new(state, server_config).await?;
    http_server.run().await
}
