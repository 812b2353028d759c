//! Genre model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::book::BookSummary;
use crate::validation::{sanitize, Check, FieldError, FormInput, Rule};

pub const GENRE_LIST_URL: &str = "/catalog/genres";

/// Genre record. Names are unique only by convention (checked on create).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        genre_url(self.id)
    }
}

pub fn genre_url(id: Uuid) -> String {
    format!("/catalog/genre/{}", id)
}

#[derive(Debug, Clone, Serialize)]
pub struct GenreView {
    #[serde(flatten)]
    pub genre: Genre,
    pub url: String,
}

impl From<Genre> for GenreView {
    fn from(genre: Genre) -> Self {
        Self {
            url: genre.url(),
            genre,
        }
    }
}

/// Genre checkbox on the book form
#[derive(Debug, Clone, Serialize)]
pub struct GenreOption {
    #[serde(flatten)]
    pub genre: GenreView,
    pub checked: bool,
}

impl GenreOption {
    /// Mark each genre whose id appears in `selected`.
    ///
    /// Submitted ids are compared as parsed uuids, so any accepted spelling
    /// (uppercase, simple, braced, urn) marks the genre.
    pub fn mark<S: AsRef<str>>(genres: Vec<Genre>, selected: &[S]) -> Vec<Self> {
        let selected: Vec<Uuid> = selected
            .iter()
            .filter_map(|s| Uuid::parse_str(s.as_ref()).ok())
            .collect();
        genres
            .into_iter()
            .map(|genre| GenreOption {
                checked: selected.contains(&genre.id),
                genre: genre.into(),
            })
            .collect()
    }
}

/// Mutable genre fields, written on create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreFields {
    pub name: String,
}

/// Sanitized genre form values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenreDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
}

impl GenreDraft {
    pub fn sanitize(input: &FormInput) -> Self {
        Self {
            id: None,
            name: sanitize::text(input, "name"),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn into_fields(self) -> GenreFields {
        GenreFields { name: self.name }
    }
}

impl From<Genre> for GenreDraft {
    fn from(genre: Genre) -> Self {
        Self {
            id: Some(genre.id),
            name: genre.name,
        }
    }
}

pub fn genre_checks() -> Vec<Check> {
    vec![Check::field("name").rule(Rule::NotEmpty, "Genre name required")]
}

/// `genre_form` view data
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenreForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<GenreDraft>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// `genre_detail` / `genre_delete` view data
#[derive(Debug, Clone, Serialize)]
pub struct GenreDetail {
    pub genre: GenreView,
    pub genre_books: Vec<BookSummary>,
}
