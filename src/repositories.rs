use crate::models::{
    Book, CreateBookRequest, DeleteBookRequest, FindBookRequest, StoreError, UpdateBookRequest,
};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    async fn create_book(&self, req: &CreateBookRequest) -> Result<Book, StoreError>;

    async fn find_book(&self, req: &FindBookRequest) -> Result<Book, StoreError>;

    async fn find_all_books(&self) -> Result<Vec<Book>, StoreError>;

    async fn update_book(&self, req: &UpdateBookRequest) -> Result<Book, StoreError>;

    async fn delete_book(&self, req: &DeleteBookRequest) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: BookRepository + ?Sized> BookRepository for Arc<T> {
    async fn create_book(&self, req: &CreateBookRequest) -> Result<Book, StoreError> {
        (**self).create_book(req).await
    }

    async fn find_book(&self, req: &FindBookRequest) -> Result<Book, StoreError> {
        (**self).find_book(req).await
    }

    async fn find_all_books(&self) -> Result<Vec<Book>, StoreError> {
        (**self).find_all_books().await
    }

    async fn update_book(&self, req: &UpdateBookRequest) -> Result<Book, StoreError> {
        (**self).update_book(req).await
    }

    async fn delete_book(&self, req: &DeleteBookRequest) -> Result<(), StoreError> {
        (**self).delete_book(req).await
    }
}
