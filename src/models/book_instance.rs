//! Book instance (physical copy) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{book::BookSummary, format_iso_date, format_long_date};
use crate::{
    error::AppError,
    validation::{sanitize, Check, FieldError, FormInput, Rule},
};

pub const BOOK_INSTANCE_LIST_URL: &str = "/catalog/bookinstances";

/// Circulation status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum BookInstanceStatus {
    Available,
    Maintenance,
    Loaned,
    Reserved,
}

#[derive(Debug, Error)]
#[error("Unknown book instance status: {0}")]
pub struct UnknownStatus(pub String);

impl BookInstanceStatus {
    pub const LABELS: &'static [&'static str] = &["Available", "Maintenance", "Loaned", "Reserved"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

impl Default for BookInstanceStatus {
    fn default() -> Self {
        BookInstanceStatus::Maintenance
    }
}

impl std::str::FromStr for BookInstanceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(BookInstanceStatus::Available),
            "Maintenance" => Ok(BookInstanceStatus::Maintenance),
            "Loaned" => Ok(BookInstanceStatus::Loaned),
            "Reserved" => Ok(BookInstanceStatus::Reserved),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for BookInstanceStatus {
    type Error = UnknownStatus;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl std::fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Book instance record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    pub id: Uuid,
    #[sqlx(rename = "book_id")]
    pub book: Uuid,
    pub imprint: String,
    #[sqlx(try_from = "String")]
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        book_instance_url(self.id)
    }
}

pub fn book_instance_url(id: Uuid) -> String {
    format!("/catalog/bookinstance/{}", id)
}

/// Book instance with its book populated
#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceView {
    pub id: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
    pub url: String,
    pub due_back_formatted: String,
    pub due_back_yyyy_mm_dd: String,
    pub book: Option<BookSummary>,
}

impl BookInstanceView {
    pub fn new(instance: BookInstance, book: Option<BookSummary>) -> Self {
        Self {
            url: instance.url(),
            due_back_formatted: format_long_date(instance.due_back),
            due_back_yyyy_mm_dd: format_iso_date(instance.due_back),
            id: instance.id,
            imprint: instance.imprint,
            status: instance.status,
            due_back: instance.due_back,
            book,
        }
    }
}

/// Mutable book instance fields, written on create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInstanceFields {
    pub book: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

/// Sanitized book instance form values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookInstanceDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub book: String,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<NaiveDate>,
}

impl BookInstanceDraft {
    pub fn sanitize(input: &FormInput) -> Self {
        Self {
            id: None,
            book: sanitize::text(input, "book"),
            imprint: sanitize::text(input, "imprint"),
            status: sanitize::text(input, "status"),
            due_back: sanitize::date(input, "due_back"),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }
}

impl From<BookInstance> for BookInstanceDraft {
    fn from(instance: BookInstance) -> Self {
        Self {
            id: Some(instance.id),
            book: instance.book.to_string(),
            imprint: instance.imprint,
            status: instance.status.as_str().to_string(),
            due_back: instance.due_back,
        }
    }
}

impl TryFrom<BookInstanceDraft> for BookInstanceFields {
    type Error = AppError;

    fn try_from(draft: BookInstanceDraft) -> Result<Self, Self::Error> {
        let book = Uuid::parse_str(&draft.book)
            .map_err(|_| AppError::BadRequest(format!("Invalid book reference {}", draft.book)))?;
        let status = if draft.status.is_empty() {
            BookInstanceStatus::default()
        } else {
            draft
                .status
                .parse()
                .map_err(|e: UnknownStatus| AppError::BadRequest(e.to_string()))?
        };

        Ok(Self {
            book,
            imprint: draft.imprint,
            status,
            due_back: draft.due_back,
        })
    }
}

pub fn book_instance_checks() -> Vec<Check> {
    vec![
        Check::field("book")
            .rule(Rule::NotEmpty, "Book must be specified")
            .rule(Rule::Reference, "Book must be a valid reference."),
        Check::field("imprint").rule(Rule::NotEmpty, "Imprint must be specified"),
        Check::field("due_back")
            .optional()
            .rule(Rule::Iso8601, "Invalid date"),
        Check::field("status")
            .optional()
            .rule(Rule::OneOf(BookInstanceStatus::LABELS), "Invalid status"),
    ]
}

/// `bookinstance_form` view data
#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookinstance: Option<BookInstanceDraft>,
    pub book_list: Vec<BookSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_book: Option<String>,
    pub status_list: &'static [&'static str],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl BookInstanceForm {
    pub fn new(book_list: Vec<BookSummary>) -> Self {
        Self {
            bookinstance: None,
            book_list,
            selected_book: None,
            status_list: BookInstanceStatus::LABELS,
            errors: Vec::new(),
        }
    }

    /// Show `draft` in the form, with its book preselected
    pub fn with_draft(mut self, draft: BookInstanceDraft) -> Self {
        self.selected_book = Some(draft.book.clone()).filter(|b| !b.is_empty());
        self.bookinstance = Some(draft);
        self
    }

    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }
}

/// `bookinstance_detail` / `bookinstance_delete` view data
#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceDetail {
    pub bookinstance: BookInstanceView,
}
