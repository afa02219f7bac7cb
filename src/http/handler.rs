use crate::http::AppState;
use crate::models::{Book, BookDraft, BookError};
use crate::service::BookService;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub const fn new(status: StatusCode, data: T) -> Self {
        Self(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> axum::response::Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Rejected(StatusCode, String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            Self::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::Rejected(status, msg) => (status, msg),
        };
        (status, Json(MessageResponse::new(message))).into_response()
    }
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::NameRequired
            | BookError::AuthorRequired
            | BookError::NameTooShort
            | BookError::AuthorTooShort => Self::BadRequest(err.to_string()),
            BookError::AlreadyExists => Self::Conflict(err.to_string()),
            BookError::NotFound | BookError::NoData => Self::NotFound(err.to_string()),
            BookError::Opaque(cause) => {
                tracing::error!(error = ?cause, "unhandled storage failure");
                Self::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected(rejection.status(), rejection.body_text())
    }
}

/// Request body for create and update. Absent fields read as empty so that
/// the required-field rules report them; `id` and timestamps are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BookHttpRequest {
    #[serde(alias = "name")]
    name_book: String,
    author: String,
}

impl From<BookHttpRequest> for BookDraft {
    fn from(value: BookHttpRequest) -> Self {
        Self::new(value.name_book, value.author)
    }
}

#[derive(Debug, Serialize)]
pub struct BookHttpResponse {
    id: i64,
    name_book: String,
    author: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl From<Book> for BookHttpResponse {
    fn from(value: Book) -> Self {
        Self {
            id: value.id(),
            name_book: value.name().to_owned(),
            author: value.author().to_owned(),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}

pub async fn create_book<S: BookService>(
    State(state): State<AppState<S>>,
    body: Result<Json<BookHttpRequest>, JsonRejection>,
) -> Result<ApiSuccess<BookHttpResponse>, ApiError> {
    let Json(body) = body?;
    let draft = BookDraft::from(body);
    state
        .book_service
        .create_book(&draft)
        .await
        .map_err(ApiError::from)
        .map(|book| ApiSuccess::new(StatusCode::CREATED, book.into()))
}

pub async fn find_all_books<S: BookService>(
    State(state): State<AppState<S>>,
) -> Result<ApiSuccess<Vec<BookHttpResponse>>, ApiError> {
    state
        .book_service
        .find_all_books()
        .await
        .map_err(ApiError::from)
        .map(|books| {
            let books = books.into_iter().map(BookHttpResponse::from).collect();
            ApiSuccess::new(StatusCode::OK, books)
        })
}

pub async fn find_book<S: BookService>(
    State(state): State<AppState<S>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<ApiSuccess<BookHttpResponse>, ApiError> {
    let Path(id) = id?;
    state
        .book_service
        .find_book(id)
        .await
        .map_err(ApiError::from)
        .map(|book| ApiSuccess::new(StatusCode::OK, book.into()))
}

pub async fn update_book<S: BookService>(
    State(state): State<AppState<S>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<BookHttpRequest>, JsonRejection>,
) -> Result<ApiSuccess<BookHttpResponse>, ApiError> {
    let Path(id) = id?;
    let Json(body) = body?;
    let draft = BookDraft::from(body);
    state
        .book_service
        .update_book(id, &draft)
        .await
        .map_err(ApiError::from)
        .map(|book| ApiSuccess::new(StatusCode::OK, book.into()))
}

pub async fn delete_book<S: BookService>(
    State(state): State<AppState<S>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<ApiSuccess<MessageResponse>, ApiError> {
    let Path(id) = id?;
    state
        .book_service
        .delete_book(id)
        .await
        .map_err(ApiError::from)
        .map(|()| ApiSuccess::new(StatusCode::OK, MessageResponse::new("Book deleted")))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Page not found".to_string())
}
