pub mod handler;

use crate::service::BookService;
use anyhow::Context;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Debug)]
pub struct AppState<S: BookService> {
    pub book_service: Arc<S>,
}

impl<S: BookService> AppState<S> {
    pub fn new(book_service: S) -> Self {
        Self {
            book_service: Arc::new(book_service),
        }
    }
}

impl<S: BookService> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            book_service: Arc::clone(&self.book_service),
        }
    }
}

#[derive(Debug)]
pub struct HttpServerConfig {
    port: u16,
}

impl HttpServerConfig {
    pub const fn new(port: u16) -> Self {
        Self { port }
    }
}

pub struct HttpServer {
    router: Router,
    listener: TcpListener,
}

impl HttpServer {
    pub async fn new<S: BookService>(
        state: AppState<S>,
        config: HttpServerConfig,
    ) -> anyhow::Result<Self> {
        let router = router(state);

        let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port))
            .await
            .with_context(|| format!("Failed to bind to port {}", config.port))?;

        Ok(Self { router, listener })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!("listening on {}", self.listener.local_addr()?);
        axum::serve(self.listener, self.router)
            .await
            .context("Received error from running server")?;
        Ok(())
    }
}

/// Builds the full application router, including request tracing and the
/// JSON fallback for unmatched routes. A known path hit with the wrong method
/// counts as unmatched.
pub fn router<S: BookService>(state: AppState<S>) -> Router {
    Router::new()
        .merge(book_routes::<S>())
        .fallback(handler::not_found)
        .method_not_allowed_fallback(handler::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn book_routes<S: BookService>() -> Router<AppState<S>> {
    Router::new()
        .route(
            "/books",
            get(handler::find_all_books::<S>).post(handler::create_book::<S>),
        )
        .route(
            "/books/{id}",
            get(handler::find_book::<S>)
                .put(handler::update_book::<S>)
                .delete(handler::delete_book::<S>),
        )
}
