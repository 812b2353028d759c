//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    author::AuthorView,
    book_instance::BookInstanceView,
    genre::{GenreOption, GenreView},
};
use crate::{
    error::AppError,
    validation::{sanitize, Check, FieldError, FormInput, Rule},
};

pub const BOOK_LIST_URL: &str = "/catalog/books";

/// Book record. `author` and `genre` hold references resolved at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    #[sqlx(rename = "author_id")]
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    #[sqlx(rename = "genre_ids")]
    pub genre: Vec<Uuid>,
}

impl Book {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

pub fn book_url(id: Uuid) -> String {
    format!("/catalog/book/{}", id)
}

/// Title and summary of a book, as listed under an author, genre or copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub url: String,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            summary: book.summary.clone(),
            url: book.url(),
        }
    }
}

/// Row of the book list
#[derive(Debug, Clone, Serialize)]
pub struct BookListEntry {
    #[serde(flatten)]
    pub book: BookSummary,
    pub author: Option<AuthorView>,
}

/// Book with its references populated
#[derive(Debug, Clone, Serialize)]
pub struct BookView {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub url: String,
    pub author: Option<AuthorView>,
    pub genre: Vec<GenreView>,
}

impl BookView {
    pub fn new(book: Book, author: Option<AuthorView>, genre: Vec<GenreView>) -> Self {
        Self {
            url: book.url(),
            id: book.id,
            title: book.title,
            summary: book.summary,
            isbn: book.isbn,
            author,
            genre,
        }
    }
}

/// Mutable book fields, written on create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub title: String,
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<Uuid>,
}

/// Sanitized book form values. References stay as submitted text so that an
/// invalid submission can be shown back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<String>,
}

impl BookDraft {
    pub fn sanitize(input: &FormInput) -> Self {
        Self {
            id: None,
            title: sanitize::text(input, "title"),
            author: sanitize::text(input, "author"),
            summary: sanitize::text(input, "summary"),
            isbn: sanitize::text(input, "isbn"),
            genre: sanitize::list(input, "genre"),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }
}

impl From<Book> for BookDraft {
    fn from(book: Book) -> Self {
        Self {
            id: Some(book.id),
            title: book.title,
            author: book.author.to_string(),
            summary: book.summary,
            isbn: book.isbn,
            genre: book.genre.iter().map(Uuid::to_string).collect(),
        }
    }
}

impl TryFrom<BookDraft> for BookFields {
    type Error = AppError;

    fn try_from(draft: BookDraft) -> Result<Self, Self::Error> {
        let author = Uuid::parse_str(&draft.author)
            .map_err(|_| AppError::BadRequest(format!("Invalid author reference {}", draft.author)))?;
        let genre = draft
            .genre
            .iter()
            .map(|g| {
                Uuid::parse_str(g)
                    .map_err(|_| AppError::BadRequest(format!("Invalid genre reference {}", g)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            title: draft.title,
            author,
            summary: draft.summary,
            isbn: draft.isbn,
            genre,
        })
    }
}

pub fn book_checks() -> Vec<Check> {
    vec![
        Check::field("title").rule(Rule::NotEmpty, "Title must not be empty."),
        Check::field("author")
            .rule(Rule::NotEmpty, "Author must not be empty.")
            .rule(Rule::Reference, "Author must be a valid reference."),
        Check::field("summary").rule(Rule::NotEmpty, "Summary must not be empty."),
        Check::field("isbn").rule(Rule::NotEmpty, "ISBN must not be empty"),
        Check::each("genre").rule(Rule::Reference, "Genre selection is invalid."),
    ]
}

/// `book_form` view data
#[derive(Debug, Clone, Default, Serialize)]
pub struct BookForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book: Option<BookDraft>,
    pub authors: Vec<AuthorView>,
    pub genres: Vec<GenreOption>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// `book_detail` / `book_delete` view data
#[derive(Debug, Clone, Serialize)]
pub struct BookDetail {
    pub book: BookView,
    pub book_instances: Vec<BookInstanceView>,
}
