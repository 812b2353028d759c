//! PostgreSQL-backed catalog store

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};
use uuid::Uuid;

use super::{
    authors::AuthorsRepository, book_instances::BookInstancesRepository, books::BooksRepository,
    genres::GenresRepository, CatalogStore,
};
use crate::{
    config::DatabaseConfig,
    error::AppResult,
    models::{
        author::AuthorFields, book::BookFields, book_instance::BookInstanceFields,
        genre::GenreFields, Author, Book, BookInstance, BookInstanceStatus, Genre,
    },
};

#[derive(Clone)]
pub struct PostgresStore {
    pool: Pool<Postgres>,
    authors: AuthorsRepository,
    genres: GenresRepository,
    books: BooksRepository,
    book_instances: BookInstancesRepository,
}

impl PostgresStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: AuthorsRepository::new(pool.clone()),
            genres: GenresRepository::new(pool.clone()),
            books: BooksRepository::new(pool.clone()),
            book_instances: BookInstancesRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Open a connection pool and bring the schema up to date
pub async fn connect(config: &DatabaseConfig) -> AppResult<Pool<Postgres>> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect(&config.url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("Database migrations completed");

    Ok(pool)
}

#[async_trait]
impl CatalogStore for PostgresStore {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn authors_list(&self) -> AppResult<Vec<Author>> {
        self.authors.list().await
    }

    async fn authors_get(&self, id: Uuid) -> AppResult<Option<Author>> {
        self.authors.get_by_id(id).await
    }

    async fn authors_create(&self, data: &AuthorFields) -> AppResult<Author> {
        self.authors.create(data).await
    }

    async fn authors_update(&self, id: Uuid, data: &AuthorFields) -> AppResult<Option<Author>> {
        self.authors.update(id, data).await
    }

    async fn authors_delete(&self, id: Uuid) -> AppResult<bool> {
        self.authors.delete(id).await
    }

    async fn authors_count(&self) -> AppResult<i64> {
        self.authors.count().await
    }

    async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        self.genres.list().await
    }

    async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>> {
        self.genres.get_by_id(id).await
    }

    async fn genres_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        self.genres.get_many(ids).await
    }

    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        self.genres.find_by_name(name).await
    }

    async fn genres_create(&self, data: &GenreFields) -> AppResult<Genre> {
        self.genres.create(data).await
    }

    async fn genres_update(&self, id: Uuid, data: &GenreFields) -> AppResult<Option<Genre>> {
        self.genres.update(id, data).await
    }

    async fn genres_delete(&self, id: Uuid) -> AppResult<bool> {
        self.genres.delete(id).await
    }

    async fn genres_count(&self) -> AppResult<i64> {
        self.genres.count().await
    }

    async fn books_list(&self) -> AppResult<Vec<Book>> {
        self.books.list().await
    }

    async fn books_get(&self, id: Uuid) -> AppResult<Option<Book>> {
        self.books.get_by_id(id).await
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        self.books.by_author(author_id).await
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        self.books.by_genre(genre_id).await
    }

    async fn books_create(&self, data: &BookFields) -> AppResult<Book> {
        self.books.create(data).await
    }

    async fn books_update(&self, id: Uuid, data: &BookFields) -> AppResult<Option<Book>> {
        self.books.update(id, data).await
    }

    async fn books_delete(&self, id: Uuid) -> AppResult<bool> {
        self.books.delete(id).await
    }

    async fn books_count(&self) -> AppResult<i64> {
        self.books.count().await
    }

    async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>> {
        self.book_instances.list().await
    }

    async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        self.book_instances.get_by_id(id).await
    }

    async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        self.book_instances.by_book(book_id).await
    }

    async fn book_instances_create(&self, data: &BookInstanceFields) -> AppResult<BookInstance> {
        self.book_instances.create(data).await
    }

    async fn book_instances_update(
        &self,
        id: Uuid,
        data: &BookInstanceFields,
    ) -> AppResult<Option<BookInstance>> {
        self.book_instances.update(id, data).await
    }

    async fn book_instances_delete(&self, id: Uuid) -> AppResult<bool> {
        self.book_instances.delete(id).await
    }

    async fn book_instances_count(&self) -> AppResult<i64> {
        self.book_instances.count().await
    }

    async fn book_instances_count_by_status(&self, status: BookInstanceStatus) -> AppResult<i64> {
        self.book_instances.count_by_status(status).await
    }
}
