//! Repository layer for catalog storage
//!
//! [`CatalogStore`] is the storage contract used by the services. Two
//! backends implement it: [`postgres::PostgresStore`] for deployments and
//! [`memory::MemoryStore`] for tests and throwaway instances.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod memory;
pub mod postgres;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        author::AuthorFields,
        book::BookFields,
        book_instance::BookInstanceFields,
        genre::GenreFields,
        Author, Book, BookInstance, BookInstanceStatus, Genre,
    },
};

/// Document-store operations over the four catalog collections.
///
/// Lookups by id return `None` when the document is absent; updates and
/// deletes report whether a document was touched. References between
/// collections are stored as ids and never checked here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Check that the backend is reachable
    async fn ping(&self) -> AppResult<()>;

    // Authors

    /// All authors, by family name then first name
    async fn authors_list(&self) -> AppResult<Vec<Author>>;
    async fn authors_get(&self, id: Uuid) -> AppResult<Option<Author>>;
    async fn authors_create(&self, data: &AuthorFields) -> AppResult<Author>;
    async fn authors_update(&self, id: Uuid, data: &AuthorFields) -> AppResult<Option<Author>>;
    async fn authors_delete(&self, id: Uuid) -> AppResult<bool>;
    async fn authors_count(&self) -> AppResult<i64>;

    // Genres

    /// All genres, by name
    async fn genres_list(&self) -> AppResult<Vec<Genre>>;
    async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>>;
    /// Genres among `ids`, in the order of `ids`; unknown ids are skipped
    async fn genres_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>>;
    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    async fn genres_create(&self, data: &GenreFields) -> AppResult<Genre>;
    async fn genres_update(&self, id: Uuid, data: &GenreFields) -> AppResult<Option<Genre>>;
    async fn genres_delete(&self, id: Uuid) -> AppResult<bool>;
    async fn genres_count(&self) -> AppResult<i64>;

    // Books

    /// All books, by title
    async fn books_list(&self) -> AppResult<Vec<Book>>;
    async fn books_get(&self, id: Uuid) -> AppResult<Option<Book>>;
    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>>;
    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>>;
    async fn books_create(&self, data: &BookFields) -> AppResult<Book>;
    async fn books_update(&self, id: Uuid, data: &BookFields) -> AppResult<Option<Book>>;
    async fn books_delete(&self, id: Uuid) -> AppResult<bool>;
    async fn books_count(&self) -> AppResult<i64>;

    // Book instances

    /// All copies, by imprint
    async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>>;
    async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>>;
    async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>>;
    async fn book_instances_create(&self, data: &BookInstanceFields) -> AppResult<BookInstance>;
    async fn book_instances_update(
        &self,
        id: Uuid,
        data: &BookInstanceFields,
    ) -> AppResult<Option<BookInstance>>;
    async fn book_instances_delete(&self, id: Uuid) -> AppResult<bool>;
    async fn book_instances_count(&self) -> AppResult<i64>;
    async fn book_instances_count_by_status(&self, status: BookInstanceStatus) -> AppResult<i64>;
}

/// Shared handle on the configured store
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn CatalogStore>,
}

impl Repository {
    /// Create a repository backed by PostgreSQL
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self::from_store(postgres::PostgresStore::new(pool))
    }

    /// Create a repository backed by an empty in-memory store
    pub fn in_memory() -> Self {
        Self::from_store(memory::MemoryStore::new())
    }

    pub fn from_store(store: impl CatalogStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl Deref for Repository {
    type Target = dyn CatalogStore;

    fn deref(&self) -> &Self::Target {
        self.store.as_ref()
    }
}
