use chrono::NaiveDateTime;
use thiserror::Error;

const MIN_NAME_LEN: usize = 5;
const MIN_AUTHOR_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id: i64,
    name: String,
    author: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl Book {
    pub const fn new(
        id: i64,
        name: String,
        author: String,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            name,
            author,
            created_at,
            updated_at,
        }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub const fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub const fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }
}

/// Caller-supplied book fields, not yet validated.
#[derive(Debug, Clone, Default)]
pub struct BookDraft {
    name: String,
    author: String,
}

impl BookDraft {
    pub fn new(name: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Checks run in a fixed order and the first failure wins: presence of
    /// both fields before the length of either.
    pub fn validate(&self) -> Result<(), BookError> {
        if self.name.is_empty() {
            return Err(BookError::NameRequired);
        }
        if self.author.is_empty() {
            return Err(BookError::AuthorRequired);
        }
        if self.name.chars().count() < MIN_NAME_LEN {
            return Err(BookError::NameTooShort);
        }
        if self.author.chars().count() < MIN_AUTHOR_LEN {
            return Err(BookError::AuthorTooShort);
        }

        Ok(())
    }
}

#[derive(Debug)]
pub struct CreateBookRequest {
    name: String,
    author: String,
}

impl CreateBookRequest {
    pub const fn new(name: String, author: String) -> Self {
        Self { name, author }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn author(&self) -> &str {
        &self.author
    }
}

impl From<&BookDraft> for CreateBookRequest {
    fn from(draft: &BookDraft) -> Self {
        Self::new(draft.name.clone(), draft.author.clone())
    }
}

#[derive(Debug)]
pub struct FindBookRequest {
    id: i64,
}

impl FindBookRequest {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug)]
pub struct UpdateBookRequest {
    id: i64,
    name: String,
    author: String,
}

impl UpdateBookRequest {
    pub const fn new(id: i64, name: String, author: String) -> Self {
        Self { id, name, author }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn author(&self) -> &str {
        &self.author
    }
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: i64,
}

impl DeleteBookRequest {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

/// Failure reported by a [`crate::repositories::BookRepository`].
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Book violates a unique constraint")]
    Duplicate,
    #[error("Book does not exist")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum BookError {
    #[error("Book name is required")]
    NameRequired,
    #[error("Author name is required")]
    AuthorRequired,
    #[error("Book name must be at least 5 characters")]
    NameTooShort,
    #[error("Author name must be at least 5 characters")]
    AuthorTooShort,
    #[error("Book already exists")]
    AlreadyExists,
    #[error("Book not found")]
    NotFound,
    #[error("No books found")]
    NoData,
    #[error(transparent)]
    Opaque(StoreError),
}
