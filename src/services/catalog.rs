//! Catalog home and storage health

use crate::{
    error::AppResult,
    models::{
        catalog::{CatalogCounts, CatalogHome},
        BookInstanceStatus,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Document counts for the home page.
    ///
    /// A storage fault does not fail the page; it is logged and the page
    /// carries a generic `error` message instead.
    pub async fn home(&self) -> CatalogHome {
        match self.counts().await {
            Ok(counts) => CatalogHome {
                error: None,
                data: Some(counts),
            },
            Err(e) => {
                tracing::error!("Failed to count catalog documents: {}", e);
                CatalogHome {
                    error: Some("Failed to load catalog counts".to_string()),
                    data: None,
                }
            }
        }
    }

    async fn counts(&self) -> AppResult<CatalogCounts> {
        let (
            book_count,
            book_instance_count,
            book_instance_available_count,
            author_count,
            genre_count,
        ) = tokio::try_join!(
            self.repository.books_count(),
            self.repository.book_instances_count(),
            self.repository
                .book_instances_count_by_status(BookInstanceStatus::Available),
            self.repository.authors_count(),
            self.repository.genres_count(),
        )?;

        Ok(CatalogCounts {
            book_count,
            book_instance_count,
            book_instance_available_count,
            author_count,
            genre_count,
        })
    }

    /// Check the storage backend is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        models::{book_instance::BookInstanceFields, genre::GenreFields},
        repository::MockCatalogStore,
    };
    use uuid::Uuid;

    #[tokio::test]
    async fn test_home_counts() {
        let repository = Repository::in_memory();
        repository
            .genres_create(&GenreFields { name: "Horror".to_string() })
            .await
            .unwrap();
        for status in [BookInstanceStatus::Available, BookInstanceStatus::Loaned] {
            repository
                .book_instances_create(&BookInstanceFields {
                    book: Uuid::new_v4(),
                    imprint: "Tor".to_string(),
                    status,
                    due_back: None,
                })
                .await
                .unwrap();
        }

        let home = CatalogService::new(repository).home().await;
        assert!(home.error.is_none());
        assert_eq!(
            home.data,
            Some(CatalogCounts {
                book_count: 0,
                book_instance_count: 2,
                book_instance_available_count: 1,
                author_count: 0,
                genre_count: 1,
            })
        );
    }

    #[tokio::test]
    async fn test_home_renders_error_on_fault() {
        let mut store = MockCatalogStore::new();
        store.expect_books_count().returning(|| Ok(1));
        store.expect_book_instances_count().returning(|| Ok(1));
        store
            .expect_book_instances_count_by_status()
            .returning(|_| Ok(1));
        store.expect_authors_count().returning(|| {
            Err(AppError::Database(sqlx::Error::Protocol(
                "password authentication failed for user catalog".into(),
            )))
        });
        store.expect_genres_count().returning(|| Ok(1));

        let home = CatalogService::new(Repository::from_store(store)).home().await;
        assert!(home.data.is_none());
        let error = home.error.unwrap();
        assert_eq!(error, "Failed to load catalog counts");
        assert!(!error.contains("password"));
    }
}
