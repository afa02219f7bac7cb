use crate::models::{
    Book, CreateBookRequest, DeleteBookRequest, FindBookRequest, StoreError, UpdateBookRequest,
};
use crate::repositories::BookRepository;
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, Row, SqlitePool};
use std::str::FromStr;

static MIGRATOR: Migrator = sqlx::migrate!();

const BOOK_COLUMNS: &str = "id, name, author, created_at, updated_at";

/// Opens the pool and applies pending migrations.
///
/// Every connection to an in-memory database gets a database of its own, so
/// such urls are limited to a single connection.
pub async fn establish_pool(url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let max_connections = if is_in_memory(url) { 1 } else { max_connections };
    let opts = SqliteConnectOptions::from_str(url)
        .with_context(|| format!("Invalid database url {url}"))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(opts)
        .await
        .with_context(|| format!("Failed to open database at {url}"))?;

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::debug!(url, max_connections, "database pool ready");

    Ok(pool)
}

#[derive(Debug, Clone)]
pub struct SqliteBookRepository {
    pool: SqlitePool,
}

impl SqliteBookRepository {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl<'r> FromRow<'r, SqliteRow> for Book {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id = row.try_get("id")?;
        let name = row.try_get("name")?;
        let author = row.try_get("author")?;
        let created_at = row.try_get("created_at")?;
        let updated_at = row.try_get("updated_at")?;

        Ok(Self::new(id, name, author, created_at, updated_at))
    }
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn create_book(&self, req: &CreateBookRequest) -> Result<Book, StoreError> {
        let query = format!("INSERT INTO book (name, author) VALUES (?, ?) RETURNING {BOOK_COLUMNS}");
        let book = sqlx::query_as(&query)
            .bind(req.name())
            .bind(req.author())
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    StoreError::Duplicate
                } else {
                    let err = anyhow!(err).context(format!(
                        r#"Failed to create book with name "{}""#,
                        req.name()
                    ));
                    StoreError::Other(err)
                }
            })?;

        Ok(book)
    }

    async fn find_book(&self, req: &FindBookRequest) -> Result<Book, StoreError> {
        let query = format!("SELECT {BOOK_COLUMNS} FROM book WHERE id = ?");
        let book = sqlx::query_as(&query)
            .bind(req.id())
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                if matches!(err, sqlx::Error::RowNotFound) {
                    StoreError::NotFound
                } else {
                    let err = anyhow!(err)
                        .context(format!(r#"Failed to retrieve book with id "{}""#, req.id()));
                    StoreError::Other(err)
                }
            })?;

        Ok(book)
    }

    async fn find_all_books(&self) -> Result<Vec<Book>, StoreError> {
        let query = format!("SELECT {BOOK_COLUMNS} FROM book");
        let books = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|err| StoreError::Other(anyhow!(err).context("Failed to retrieve all books")))?;

        Ok(books)
    }

    async fn update_book(&self, req: &UpdateBookRequest) -> Result<Book, StoreError> {
        let query = format!(
            "UPDATE book SET name = ?, author = ?, updated_at = CURRENT_TIMESTAMP \
             WHERE id = ? RETURNING {BOOK_COLUMNS}"
        );
        let book = sqlx::query_as(&query)
            .bind(req.name())
            .bind(req.author())
            .bind(req.id())
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                if matches!(err, sqlx::Error::RowNotFound) {
                    StoreError::NotFound
                } else if is_unique_violation(&err) {
                    StoreError::Duplicate
                } else {
                    let err = anyhow!(err)
                        .context(format!(r#"Failed to update book with id "{}""#, req.id()));
                    StoreError::Other(err)
                }
            })?;

        Ok(book)
    }

    async fn delete_book(&self, req: &DeleteBookRequest) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM book WHERE id = ?")
            .bind(req.id())
            .execute(&self.pool)
            .await
            .map_err(|err| {
                let err = anyhow!(err)
                    .context(format!(r#"Failed to delete book with id "{}""#, req.id()));
                StoreError::Other(err)
            })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        return db_err.is_unique_violation();
    }

    false
}
