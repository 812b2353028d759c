//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{book::BookSummary, format_iso_date, format_long_date};
use crate::validation::{sanitize, Check, FieldError, FormInput, Rule};

pub const AUTHOR_LIST_URL: &str = "/catalog/authors";

/// Author record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Display name: family name first
    pub fn name(&self) -> String {
        format!("{} {}", self.family_name, self.first_name)
    }

    pub fn url(&self) -> String {
        author_url(self.id)
    }
}

pub fn author_url(id: Uuid) -> String {
    format!("/catalog/author/{}", id)
}

/// Author with its derived display fields
#[derive(Debug, Clone, Serialize)]
pub struct AuthorView {
    #[serde(flatten)]
    pub author: Author,
    pub name: String,
    pub url: String,
    pub date_of_birth_formatted: String,
    pub date_of_death_formatted: String,
    pub date_of_birth_yyyy_mm_dd: String,
    pub date_of_death_yyyy_mm_dd: String,
}

impl From<Author> for AuthorView {
    fn from(author: Author) -> Self {
        Self {
            name: author.name(),
            url: author.url(),
            date_of_birth_formatted: format_long_date(author.date_of_birth),
            date_of_death_formatted: format_long_date(author.date_of_death),
            date_of_birth_yyyy_mm_dd: format_iso_date(author.date_of_birth),
            date_of_death_yyyy_mm_dd: format_iso_date(author.date_of_death),
            author,
        }
    }
}

/// Mutable author fields, written on create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorFields {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Sanitized author form values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthorDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl AuthorDraft {
    pub fn sanitize(input: &FormInput) -> Self {
        Self {
            id: None,
            first_name: sanitize::text(input, "first_name"),
            family_name: sanitize::text(input, "family_name"),
            date_of_birth: sanitize::date(input, "date_of_birth"),
            date_of_death: sanitize::date(input, "date_of_death"),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn into_fields(self) -> AuthorFields {
        AuthorFields {
            first_name: self.first_name,
            family_name: self.family_name,
            date_of_birth: self.date_of_birth,
            date_of_death: self.date_of_death,
        }
    }
}

impl From<Author> for AuthorDraft {
    fn from(author: Author) -> Self {
        Self {
            id: Some(author.id),
            first_name: author.first_name,
            family_name: author.family_name,
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
        }
    }
}

pub fn author_checks() -> Vec<Check> {
    vec![
        Check::field("first_name")
            .rule(Rule::NotEmpty, "First name must be specified.")
            .rule(Rule::MaxLength(100), "First name must not exceed 100 characters.")
            .rule(Rule::Alphanumeric, "First name has non-alphanumeric characters."),
        Check::field("family_name")
            .rule(Rule::NotEmpty, "Family name must be specified.")
            .rule(Rule::MaxLength(100), "Family name must not exceed 100 characters.")
            .rule(Rule::Alphanumeric, "Family name has non-alphanumeric characters."),
        Check::field("date_of_birth")
            .optional()
            .rule(Rule::Iso8601, "Invalid date of birth"),
        Check::field("date_of_death")
            .optional()
            .rule(Rule::Iso8601, "Invalid date of death"),
    ]
}

/// `author_form` view data
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthorForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorDraft>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// `author_detail` / `author_delete` view data
#[derive(Debug, Clone, Serialize)]
pub struct AuthorDetail {
    pub author: AuthorView,
    pub author_books: Vec<BookSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;

    fn tolkien() -> Author {
        Author {
            id: Uuid::new_v4(),
            first_name: "John".to_string(),
            family_name: "Tolkien".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1892, 1, 3),
            date_of_death: None,
        }
    }

    #[test]
    fn test_derived_fields() {
        let author = tolkien();
        let id = author.id;
        let view = AuthorView::from(author);
        assert_eq!(view.name, "Tolkien John");
        assert_eq!(view.url, format!("/catalog/author/{}", id));
        assert_eq!(view.date_of_birth_formatted, "3 January, 1892");
        assert_eq!(view.date_of_birth_yyyy_mm_dd, "1892-01-03");
        assert_eq!(view.date_of_death_formatted, "");
    }

    #[test]
    fn test_view_serializes_record_and_derived_fields() {
        let json = serde_json::to_value(AuthorView::from(tolkien())).unwrap();
        assert_eq!(json["first_name"], "John");
        assert_eq!(json["name"], "Tolkien John");
        assert_eq!(json["date_of_birth"], "1892-01-03");
        assert!(json["date_of_death"].is_null());
    }

    #[test]
    fn test_sanitize() {
        let input = FormInput::from_pairs([
            ("first_name", " Mary "),
            ("family_name", "Shelley"),
            ("date_of_birth", "1797-08-30"),
            ("date_of_death", ""),
        ]);
        let draft = AuthorDraft::sanitize(&input);
        assert_eq!(draft.first_name, "Mary");
        assert_eq!(draft.date_of_birth, NaiveDate::from_ymd_opt(1797, 8, 30));
        assert_eq!(draft.date_of_death, None);
        assert!(validate(&author_checks(), &input).is_empty());
    }

    #[test]
    fn test_checks_reject_bad_names_and_dates() {
        let input = FormInput::from_pairs([
            ("first_name", "Mary-Jane"),
            ("family_name", ""),
            ("date_of_death", "yesterday"),
        ]);
        let messages: Vec<String> = validate(&author_checks(), &input)
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(
            messages,
            [
                "First name has non-alphanumeric characters.",
                "Family name must be specified.",
                "Family name has non-alphanumeric characters.",
                "Invalid date of death",
            ]
        );
    }

    #[test]
    fn test_name_length_limit() {
        let long = "a".repeat(101);
        let input = FormInput::from_pairs([("first_name", long.as_str()), ("family_name", "B")]);
        let errors = validate(&author_checks(), &input);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "First name must not exceed 100 characters.");
    }
}
