#![allow(dead_code)]

use async_trait::async_trait;
use book_api::database::{SqliteBookRepository, establish_pool};
use book_api::models::{
    Book, CreateBookRequest, DeleteBookRequest, FindBookRequest, StoreError, UpdateBookRequest,
};
use book_api::repositories::BookRepository;
use chrono::NaiveDateTime;
use std::collections::VecDeque;
use std::sync::Mutex;

pub fn book(id: i64, name: &str, author: &str) -> Book {
    let at = NaiveDateTime::default();
    Book::new(id, name.to_string(), author.to_string(), at, at)
}

/// One entry per repository call, in the order the calls were made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create { name: String, author: String },
    FindAll,
    Find { id: i64 },
    Update { id: i64, name: String, author: String },
    Delete { id: i64 },
}

/// Repository double that answers from scripted queues. A call with nothing
/// scripted for it panics, so tests fail on any unexpected storage access.
#[derive(Default)]
pub struct ScriptedBookRepository {
    calls: Mutex<Vec<Call>>,
    create: Mutex<VecDeque<Result<Book, StoreError>>>,
    find_all: Mutex<VecDeque<Result<Vec<Book>, StoreError>>>,
    find: Mutex<VecDeque<Result<Book, StoreError>>>,
    update: Mutex<VecDeque<Result<Book, StoreError>>>,
    delete: Mutex<VecDeque<Result<(), StoreError>>>,
}

impl ScriptedBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_create(self, result: Result<Book, StoreError>) -> Self {
        self.create.lock().unwrap().push_back(result);
        self
    }

    pub fn on_find_all(self, result: Result<Vec<Book>, StoreError>) -> Self {
        self.find_all.lock().unwrap().push_back(result);
        self
    }

    pub fn on_find(self, result: Result<Book, StoreError>) -> Self {
        self.find.lock().unwrap().push_back(result);
        self
    }

    pub fn on_update(self, result: Result<Book, StoreError>) -> Self {
        self.update.lock().unwrap().push_back(result);
        self
    }

    pub fn on_delete(self, result: Result<(), StoreError>) -> Self {
        self.delete.lock().unwrap().push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn next<T>(queue: &Mutex<VecDeque<T>>, what: &str) -> T {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| panic!("unexpected call to {what}"))
}

#[async_trait]
impl BookRepository for ScriptedBookRepository {
    async fn create_book(&self, req: &CreateBookRequest) -> Result<Book, StoreError> {
        self.record(Call::Create {
            name: req.name().to_string(),
            author: req.author().to_string(),
        });
        next(&self.create, "create_book")
    }

    async fn find_book(&self, req: &FindBookRequest) -> Result<Book, StoreError> {
        self.record(Call::Find { id: req.id() });
        next(&self.find, "find_book")
    }

    async fn find_all_books(&self) -> Result<Vec<Book>, StoreError> {
        self.record(Call::FindAll);
        next(&self.find_all, "find_all_books")
    }

    async fn update_book(&self, req: &UpdateBookRequest) -> Result<Book, StoreError> {
        self.record(Call::Update {
            id: req.id(),
            name: req.name().to_string(),
            author: req.author().to_string(),
        });
        next(&self.update, "update_book")
    }

    async fn delete_book(&self, req: &DeleteBookRequest) -> Result<(), StoreError> {
        self.record(Call::Delete { id: req.id() });
        next(&self.delete, "delete_book")
    }
}

/// Repository over a fresh in-memory database. Each connection to
/// `sqlite::memory:` opens a separate database, so `establish_pool` keeps
/// such pools at one connection whatever limit is asked for.
pub async fn sqlite_repo() -> SqliteBookRepository {
    let pool = establish_pool("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database");
    SqliteBookRepository::new(pool)
}
