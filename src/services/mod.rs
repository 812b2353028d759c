//! Business logic services
//!
//! One service per entity orchestrates list, detail, create, update and
//! delete. Form submissions and deletes return typed outcomes instead of
//! errors so handlers can choose between a redirect and a re-rendered view.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;

use crate::repository::Repository;

/// Outcome of a create or update form submission
#[derive(Debug)]
pub enum Submission<T, F> {
    /// Exactly one write happened; carries the stored document
    Saved(T),
    /// Validation failed and nothing was written; carries the form to show
    /// again with sanitized values and errors
    Rejected(F),
}

/// Outcome of a delete submission
#[derive(Debug)]
pub enum Removal<T> {
    Removed,
    /// Dependents still reference the document; carries the confirmation
    /// view listing them
    Blocked(T),
    /// Nothing to delete
    Missing,
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub genres: genres::GenresService,
    pub books: books::BooksService,
    pub book_instances: book_instances::BookInstancesService,
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            book_instances: book_instances::BookInstancesService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository),
        }
    }
}
