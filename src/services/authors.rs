//! Author management service

use uuid::Uuid;

use super::{Removal, Submission};
use crate::{
    error::{AppError, AppResult},
    models::{
        author::{author_checks, AuthorDetail, AuthorDraft, AuthorForm, AuthorView},
        book::BookSummary,
        Author,
    },
    repository::Repository,
    validation::{validate, FormInput},
};

fn not_found() -> AppError {
    AppError::NotFound("Author Not Found".to_string())
}

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All authors, sorted by family name
    pub async fn list(&self) -> AppResult<Vec<AuthorView>> {
        let authors = self.repository.authors_list().await?;
        Ok(authors.into_iter().map(AuthorView::from).collect())
    }

    /// Author with the books attributed to them
    pub async fn detail(&self, id: Uuid) -> AppResult<AuthorDetail> {
        let author = self.repository.authors_get(id).await?.ok_or_else(not_found)?;
        let books = self.repository.books_by_author(id).await?;
        Ok(AuthorDetail {
            author: author.into(),
            author_books: books.iter().map(BookSummary::from).collect(),
        })
    }

    pub async fn create(&self, input: &FormInput) -> AppResult<Submission<Author, AuthorForm>> {
        let errors = validate(&author_checks(), input);
        let draft = AuthorDraft::sanitize(input);

        if !errors.is_empty() {
            tracing::debug!("Author create rejected with {} error(s)", errors.len());
            return Ok(Submission::Rejected(AuthorForm {
                author: Some(draft),
                errors,
            }));
        }

        let author = self.repository.authors_create(&draft.into_fields()).await?;
        tracing::info!("Created author {} ({})", author.name(), author.id);
        Ok(Submission::Saved(author))
    }

    /// Delete confirmation data; `None` when the author does not exist
    pub async fn delete_confirmation(&self, id: Uuid) -> AppResult<Option<AuthorDetail>> {
        let (author, books) = tokio::try_join!(
            self.repository.authors_get(id),
            self.repository.books_by_author(id),
        )?;
        Ok(author.map(|author| AuthorDetail {
            author: author.into(),
            author_books: books.iter().map(BookSummary::from).collect(),
        }))
    }

    /// Delete an author that has no books
    pub async fn delete(&self, id: Uuid) -> AppResult<Removal<AuthorDetail>> {
        let Some(detail) = self.delete_confirmation(id).await? else {
            return Ok(Removal::Missing);
        };

        if !detail.author_books.is_empty() {
            tracing::info!(
                "Refusing to delete author {}: {} book(s) still reference it",
                id,
                detail.author_books.len()
            );
            return Ok(Removal::Blocked(detail));
        }

        if !self.repository.authors_delete(id).await? {
            return Ok(Removal::Missing);
        }
        tracing::info!("Deleted author {}", id);
        Ok(Removal::Removed)
    }

    /// Update form prefilled with the stored author
    pub async fn update_form(&self, id: Uuid) -> AppResult<AuthorForm> {
        let author = self.repository.authors_get(id).await?.ok_or_else(not_found)?;
        Ok(AuthorForm {
            author: Some(author.into()),
            errors: Vec::new(),
        })
    }

    /// Replace the author's fields, keeping its id
    pub async fn update(
        &self,
        id: Uuid,
        input: &FormInput,
    ) -> AppResult<Submission<Author, AuthorForm>> {
        let errors = validate(&author_checks(), input);
        let draft = AuthorDraft::sanitize(input).with_id(id);

        if !errors.is_empty() {
            tracing::debug!("Author {} update rejected with {} error(s)", id, errors.len());
            return Ok(Submission::Rejected(AuthorForm {
                author: Some(draft),
                errors,
            }));
        }

        let author = self
            .repository
            .authors_update(id, &draft.into_fields())
            .await?
            .ok_or_else(not_found)?;
        tracing::info!("Updated author {}", id);
        Ok(Submission::Saved(author))
    }
}
