//! Authors repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{author::AuthorFields, Author},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all authors sorted by family name
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(
            "SELECT * FROM authors ORDER BY family_name, first_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, data: &AuthorFields) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (id, first_name, family_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Replace all mutable fields of an author
    pub async fn update(&self, id: Uuid, data: &AuthorFields) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors
            SET first_name = $2, family_name = $3, date_of_birth = $4, date_of_death = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*)::bigint FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
