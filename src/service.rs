use crate::models::{
    Book, BookDraft, BookError, CreateBookRequest, DeleteBookRequest, FindBookRequest, StoreError,
    UpdateBookRequest,
};
use crate::repositories::BookRepository;
use async_trait::async_trait;

/// Book use cases as seen by the HTTP layer.
#[async_trait]
pub trait BookService: Send + Sync + 'static {
    async fn create_book(&self, draft: &BookDraft) -> Result<Book, BookError>;

    /// Fails with [`BookError::NoData`] when the store holds no books.
    async fn find_all_books(&self) -> Result<Vec<Book>, BookError>;

    async fn find_book(&self, id: i64) -> Result<Book, BookError>;

    async fn update_book(&self, id: i64, draft: &BookDraft) -> Result<Book, BookError>;

    async fn delete_book(&self, id: i64) -> Result<(), BookError>;
}

/// Validates input, checks existence ahead of mutations and translates
/// storage failures into [`BookError`].
#[derive(Debug, Clone)]
pub struct Service<R> {
    repo: R,
}

impl<R: BookRepository> Service<R> {
    pub const fn new(repo: R) -> Self {
        Self { repo }
    }

    async fn ensure_exists(&self, id: i64) -> Result<Book, BookError> {
        self.repo
            .find_book(&FindBookRequest::new(id))
            .await
            .map_err(not_found_or_opaque)
    }
}

#[async_trait]
impl<R: BookRepository> BookService for Service<R> {
    async fn create_book(&self, draft: &BookDraft) -> Result<Book, BookError> {
        draft.validate()?;

        let req = CreateBookRequest::from(draft);
        self.repo.create_book(&req).await.map_err(|err| match err {
            StoreError::Duplicate => BookError::AlreadyExists,
            err => BookError::Opaque(err),
        })
    }

    async fn find_all_books(&self) -> Result<Vec<Book>, BookError> {
        let books = self
            .repo
            .find_all_books()
            .await
            .map_err(BookError::Opaque)?;
        if books.is_empty() {
            return Err(BookError::NoData);
        }

        Ok(books)
    }

    async fn find_book(&self, id: i64) -> Result<Book, BookError> {
        self.ensure_exists(id).await
    }

    async fn update_book(&self, id: i64, draft: &BookDraft) -> Result<Book, BookError> {
        draft.validate()?;
        self.ensure_exists(id).await?;

        let req = UpdateBookRequest::new(id, draft.name().to_owned(), draft.author().to_owned());
        self.repo.update_book(&req).await.map_err(|err| match err {
            StoreError::NotFound => BookError::NotFound,
            StoreError::Duplicate => BookError::AlreadyExists,
            err => BookError::Opaque(err),
        })
    }

    async fn delete_book(&self, id: i64) -> Result<(), BookError> {
        self.ensure_exists(id).await?;

        self.repo
            .delete_book(&DeleteBookRequest::new(id))
            .await
            .map_err(not_found_or_opaque)
    }
}

fn not_found_or_opaque(err: StoreError) -> BookError {
    match err {
        StoreError::NotFound => BookError::NotFound,
        err => BookError::Opaque(err),
    }
}
