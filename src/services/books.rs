//! Book management service

use std::collections::HashMap;

use uuid::Uuid;

use super::{Removal, Submission};
use crate::{
    error::{AppError, AppResult},
    models::{
        author::AuthorView,
        book::{
            book_checks, BookDetail, BookDraft, BookFields, BookForm, BookListEntry, BookSummary,
            BookView,
        },
        book_instance::BookInstanceView,
        genre::{GenreOption, GenreView},
        Book, BookInstance,
    },
    repository::Repository,
    validation::{validate, FieldError, FormInput},
};

fn not_found() -> AppError {
    AppError::NotFound("Book Not Found".to_string())
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books by title, each with its author resolved
    pub async fn list(&self) -> AppResult<Vec<BookListEntry>> {
        let (books, authors) = tokio::try_join!(
            self.repository.books_list(),
            self.repository.authors_list(),
        )?;
        let authors: HashMap<Uuid, AuthorView> = authors
            .into_iter()
            .map(|author| (author.id, AuthorView::from(author)))
            .collect();

        Ok(books
            .iter()
            .map(|book| BookListEntry {
                book: BookSummary::from(book),
                author: authors.get(&book.author).cloned(),
            })
            .collect())
    }

    /// Book with author, genres and copies
    pub async fn detail(&self, id: Uuid) -> AppResult<BookDetail> {
        let book = self.repository.books_get(id).await?.ok_or_else(not_found)?;
        let instances = self.repository.book_instances_by_book(id).await?;
        self.populate(book, instances).await
    }

    /// Resolve the references of `book` into a detail view
    async fn populate(&self, book: Book, instances: Vec<BookInstance>) -> AppResult<BookDetail> {
        let (author, genres) = tokio::try_join!(
            self.repository.authors_get(book.author),
            self.repository.genres_get_many(&book.genre),
        )?;

        let summary = BookSummary::from(&book);
        let book_instances = instances
            .into_iter()
            .map(|instance| BookInstanceView::new(instance, Some(summary.clone())))
            .collect();

        Ok(BookDetail {
            book: BookView::new(
                book,
                author.map(AuthorView::from),
                genres.into_iter().map(GenreView::from).collect(),
            ),
            book_instances,
        })
    }

    /// Empty form with every author and genre to choose from
    pub async fn create_form(&self) -> AppResult<BookForm> {
        self.form(None, Vec::new()).await
    }

    /// Book form listing all authors and genres, with the genres of `draft`
    /// checked
    async fn form(&self, draft: Option<BookDraft>, errors: Vec<FieldError>) -> AppResult<BookForm> {
        let (authors, genres) = tokio::try_join!(
            self.repository.authors_list(),
            self.repository.genres_list(),
        )?;
        let selected = draft.as_ref().map(|d| d.genre.as_slice()).unwrap_or_default();

        Ok(BookForm {
            genres: GenreOption::mark(genres, selected),
            authors: authors.into_iter().map(AuthorView::from).collect(),
            book: draft,
            errors,
        })
    }

    pub async fn create(&self, input: &FormInput) -> AppResult<Submission<Book, BookForm>> {
        let errors = validate(&book_checks(), input);
        let draft = BookDraft::sanitize(input);

        if !errors.is_empty() {
            tracing::debug!("Book create rejected with {} error(s)", errors.len());
            return Ok(Submission::Rejected(self.form(Some(draft), errors).await?));
        }

        let book = self
            .repository
            .books_create(&BookFields::try_from(draft)?)
            .await?;
        tracing::info!("Created book {} ({})", book.title, book.id);
        Ok(Submission::Saved(book))
    }

    pub async fn delete_confirmation(&self, id: Uuid) -> AppResult<Option<BookDetail>> {
        let (book, instances) = tokio::try_join!(
            self.repository.books_get(id),
            self.repository.book_instances_by_book(id),
        )?;
        match book {
            Some(book) => Ok(Some(self.populate(book, instances).await?)),
            None => Ok(None),
        }
    }

    /// Delete a book that has no copies
    pub async fn delete(&self, id: Uuid) -> AppResult<Removal<BookDetail>> {
        let Some(detail) = self.delete_confirmation(id).await? else {
            return Ok(Removal::Missing);
        };

        if !detail.book_instances.is_empty() {
            tracing::info!(
                "Refusing to delete book {}: {} copies still reference it",
                id,
                detail.book_instances.len()
            );
            return Ok(Removal::Blocked(detail));
        }

        if !self.repository.books_delete(id).await? {
            return Ok(Removal::Missing);
        }
        tracing::info!("Deleted book {}", id);
        Ok(Removal::Removed)
    }

    /// Update form prefilled with the stored book, its genres checked
    pub async fn update_form(&self, id: Uuid) -> AppResult<BookForm> {
        let (book, authors, genres) = tokio::try_join!(
            self.repository.books_get(id),
            self.repository.authors_list(),
            self.repository.genres_list(),
        )?;
        let book = book.ok_or_else(not_found)?;
        let draft = BookDraft::from(book);

        Ok(BookForm {
            genres: GenreOption::mark(genres, draft.genre.as_slice()),
            authors: authors.into_iter().map(AuthorView::from).collect(),
            book: Some(draft),
            errors: Vec::new(),
        })
    }

    pub async fn update(&self, id: Uuid, input: &FormInput) -> AppResult<Submission<Book, BookForm>> {
        let errors = validate(&book_checks(), input);
        let draft = BookDraft::sanitize(input).with_id(id);

        if !errors.is_empty() {
            tracing::debug!("Book {} update rejected with {} error(s)", id, errors.len());
            return Ok(Submission::Rejected(self.form(Some(draft), errors).await?));
        }

        let book = self
            .repository
            .books_update(id, &BookFields::try_from(draft)?)
            .await?
            .ok_or_else(not_found)?;
        tracing::info!("Updated book {}", id);
        Ok(Submission::Saved(book))
    }
}
