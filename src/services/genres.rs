//! Genre management service

use uuid::Uuid;

use super::{Removal, Submission};
use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookSummary,
        genre::{genre_checks, GenreDetail, GenreDraft, GenreForm, GenreView},
        Genre,
    },
    repository::Repository,
    validation::{validate, FormInput},
};

fn not_found() -> AppError {
    AppError::NotFound("Genre Not Found".to_string())
}

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<GenreView>> {
        let genres = self.repository.genres_list().await?;
        Ok(genres.into_iter().map(GenreView::from).collect())
    }

    /// Genre with the books tagged with it
    pub async fn detail(&self, id: Uuid) -> AppResult<GenreDetail> {
        let genre = self.repository.genres_get(id).await?.ok_or_else(not_found)?;
        let books = self.repository.books_by_genre(id).await?;
        Ok(GenreDetail {
            genre: genre.into(),
            genre_books: books.iter().map(BookSummary::from).collect(),
        })
    }

    /// Create a genre, or return the existing one with the same name
    pub async fn create(&self, input: &FormInput) -> AppResult<Submission<Genre, GenreForm>> {
        let errors = validate(&genre_checks(), input);
        let draft = GenreDraft::sanitize(input);

        if !errors.is_empty() {
            return Ok(Submission::Rejected(GenreForm {
                genre: Some(draft),
                errors,
            }));
        }

        if let Some(existing) = self.repository.genres_find_by_name(&draft.name).await? {
            tracing::debug!("Genre {} already exists as {}", existing.name, existing.id);
            return Ok(Submission::Saved(existing));
        }

        let genre = self.repository.genres_create(&draft.into_fields()).await?;
        tracing::info!("Created genre {} ({})", genre.name, genre.id);
        Ok(Submission::Saved(genre))
    }

    pub async fn delete_confirmation(&self, id: Uuid) -> AppResult<Option<GenreDetail>> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres_get(id),
            self.repository.books_by_genre(id),
        )?;
        Ok(genre.map(|genre| GenreDetail {
            genre: genre.into(),
            genre_books: books.iter().map(BookSummary::from).collect(),
        }))
    }

    /// Delete a genre no book is tagged with
    pub async fn delete(&self, id: Uuid) -> AppResult<Removal<GenreDetail>> {
        let Some(detail) = self.delete_confirmation(id).await? else {
            return Ok(Removal::Missing);
        };

        if !detail.genre_books.is_empty() {
            tracing::info!(
                "Refusing to delete genre {}: {} book(s) still reference it",
                id,
                detail.genre_books.len()
            );
            return Ok(Removal::Blocked(detail));
        }

        if !self.repository.genres_delete(id).await? {
            return Ok(Removal::Missing);
        }
        tracing::info!("Deleted genre {}", id);
        Ok(Removal::Removed)
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<GenreForm> {
        let genre = self.repository.genres_get(id).await?.ok_or_else(not_found)?;
        Ok(GenreForm {
            genre: Some(genre.into()),
            errors: Vec::new(),
        })
    }

    /// Rename a genre. No duplicate check here, unlike create.
    pub async fn update(
        &self,
        id: Uuid,
        input: &FormInput,
    ) -> AppResult<Submission<Genre, GenreForm>> {
        let errors = validate(&genre_checks(), input);
        let draft = GenreDraft::sanitize(input).with_id(id);

        if !errors.is_empty() {
            return Ok(Submission::Rejected(GenreForm {
                genre: Some(draft),
                errors,
            }));
        }

        let genre = self
            .repository
            .genres_update(id, &draft.into_fields())
            .await?
            .ok_or_else(not_found)?;
        tracing::info!("Updated genre {}", id);
        Ok(Submission::Saved(genre))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::book::BookFields;

    fn name(value: &str) -> FormInput {
        FormInput::from_pairs([("name", value)])
    }

    fn service() -> (GenresService, Repository) {
        let repository = Repository::in_memory();
        (GenresService::new(repository.clone()), repository)
    }

    async fn saved(service: &GenresService, value: &str) -> Genre {
        match service.create(&name(value)).await.unwrap() {
            Submission::Saved(genre) => genre,
            Submission::Rejected(form) => panic!("rejected: {:?}", form.errors),
        }
    }

    #[tokio::test]
    async fn test_create_is_idempotent_by_name() {
        let (service, repository) = service();
        let first = saved(&service, "Fantasy").await;
        let second = saved(&service, "Fantasy").await;

        assert_eq!(first.id, second.id);
        assert_eq!(repository.genres_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let (service, repository) = service();
        let Submission::Rejected(form) = service.create(&name("   ")).await.unwrap() else {
            panic!("expected rejection");
        };
        assert_eq!(form.errors[0].message, "Genre name required");
        assert_eq!(form.genre.unwrap().name, "");
        assert_eq!(repository.genres_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_trims_name() {
        let (service, _) = service();
        let genre = saved(&service, "SF").await;

        let Submission::Saved(updated) = service.update(genre.id, &name("  Sci-Fi  ")).await.unwrap()
        else {
            panic!("expected save");
        };
        assert_eq!(updated.name, "Sci-Fi");
        assert_eq!(service.detail(genre.id).await.unwrap().genre.genre.name, "Sci-Fi");
    }

    #[tokio::test]
    async fn test_delete_blocked_then_allowed() {
        let (service, repository) = service();
        let genre = saved(&service, "Poetry").await;
        let book = repository
            .books_create(&BookFields {
                title: "Odes".to_string(),
                author: Uuid::new_v4(),
                summary: "Verse".to_string(),
                isbn: "1".to_string(),
                genre: vec![genre.id],
            })
            .await
            .unwrap();

        let Removal::Blocked(detail) = service.delete(genre.id).await.unwrap() else {
            panic!("expected blocked delete");
        };
        assert_eq!(detail.genre_books[0].id, book.id);

        repository.books_delete(book.id).await.unwrap();
        assert!(matches!(service.delete(genre.id).await.unwrap(), Removal::Removed));
        assert!(matches!(service.detail(genre.id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_missing() {
        let (service, _) = service();
        assert!(matches!(service.delete(Uuid::new_v4()).await.unwrap(), Removal::Missing));
    }
}
