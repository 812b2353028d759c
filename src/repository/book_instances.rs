//! Book instances repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{book_instance::BookInstanceFields, BookInstance, BookInstanceStatus},
};

const INSTANCE_COLUMNS: &str = "id, book_id, imprint, status, due_back";

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<BookInstance>> {
        let query = format!(
            "SELECT {} FROM book_instances ORDER BY imprint",
            INSTANCE_COLUMNS
        );
        let rows = sqlx::query_as::<_, BookInstance>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        let query = format!("SELECT {} FROM book_instances WHERE id = $1", INSTANCE_COLUMNS);
        let row = sqlx::query_as::<_, BookInstance>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Copies of one book
    pub async fn by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let query = format!(
            "SELECT {} FROM book_instances WHERE book_id = $1 ORDER BY imprint",
            INSTANCE_COLUMNS
        );
        let rows = sqlx::query_as::<_, BookInstance>(&query)
            .bind(book_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn create(&self, data: &BookInstanceFields) -> AppResult<BookInstance> {
        let query = format!(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            INSTANCE_COLUMNS
        );
        let row = sqlx::query_as::<_, BookInstance>(&query)
            .bind(Uuid::new_v4())
            .bind(data.book)
            .bind(&data.imprint)
            .bind(data.status.as_str())
            .bind(data.due_back)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: Uuid,
        data: &BookInstanceFields,
    ) -> AppResult<Option<BookInstance>> {
        let query = format!(
            r#"
            UPDATE book_instances
            SET book_id = $2, imprint = $3, status = $4, due_back = $5
            WHERE id = $1
            RETURNING {}
            "#,
            INSTANCE_COLUMNS
        );
        let row = sqlx::query_as::<_, BookInstance>(&query)
            .bind(id)
            .bind(data.book)
            .bind(&data.imprint)
            .bind(data.status.as_str())
            .bind(data.due_back)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*)::bigint FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_by_status(&self, status: BookInstanceStatus) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*)::bigint FROM book_instances WHERE status = $1")
                .bind(status.as_str())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
