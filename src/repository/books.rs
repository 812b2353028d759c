//! Books repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{book::BookFields, Book},
};

const BOOK_COLUMNS: &str = "id, title, author_id, summary, isbn, genre_ids";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let query = format!("SELECT {} FROM books ORDER BY title", BOOK_COLUMNS);
        let rows = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let query = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Books whose author reference is `author_id`
    pub async fn by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM books WHERE author_id = $1 ORDER BY title",
            BOOK_COLUMNS
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Books listing `genre_id` among their genres
    pub async fn by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        let query = format!(
            "SELECT {} FROM books WHERE $1 = ANY(genre_ids) ORDER BY title",
            BOOK_COLUMNS
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(genre_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn create(&self, data: &BookFields) -> AppResult<Book> {
        let query = format!(
            r#"
            INSERT INTO books (id, title, author_id, summary, isbn, genre_ids)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(Uuid::new_v4())
            .bind(&data.title)
            .bind(data.author)
            .bind(&data.summary)
            .bind(&data.isbn)
            .bind(&data.genre)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Replace all mutable fields of a book
    pub async fn update(&self, id: Uuid, data: &BookFields) -> AppResult<Option<Book>> {
        let query = format!(
            r#"
            UPDATE books
            SET title = $2, author_id = $3, summary = $4, isbn = $5, genre_ids = $6
            WHERE id = $1
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(&data.title)
            .bind(data.author)
            .bind(&data.summary)
            .bind(&data.isbn)
            .bind(&data.genre)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*)::bigint FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
