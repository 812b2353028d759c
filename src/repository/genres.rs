//! Genres repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{genre::GenreFields, Genre},
};

#[derive(Clone)]
pub struct GenresRepository {
    pool: Pool<Postgres>,
}

impl GenresRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>("SELECT * FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>("SELECT * FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Get the genres among `ids`, keeping the order of `ids`
    pub async fn get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.name
            FROM genres g
            JOIN UNNEST($1::uuid[]) WITH ORDINALITY AS wanted(id, position) ON wanted.id = g.id
            ORDER BY wanted.position
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Find a genre with exactly this name
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>("SELECT * FROM genres WHERE name = $1 LIMIT 1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, data: &GenreFields) -> AppResult<Genre> {
        let row = sqlx::query_as::<_, Genre>(
            "INSERT INTO genres (id, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: Uuid, data: &GenreFields) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>(
            "UPDATE genres SET name = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*)::bigint FROM genres")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
