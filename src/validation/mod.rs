//! Form input validation and sanitization
//!
//! Submissions go through two independent passes. The validation pass runs an
//! ordered list of [`Check`]s and collects every failure as a [`FieldError`];
//! it never stops at the first problem. The sanitization pass ([`sanitize`])
//! always runs afterwards, so that a rejected form is re-rendered with cleaned
//! values.

pub mod sanitize;

use chrono::{DateTime, NaiveDate};
use indexmap::IndexMap;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::ValidateLength;

/// Raw form submission: field name to submitted values, in submission order.
///
/// Repeated keys (checkbox groups) accumulate into the same entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    fields: IndexMap<String, Vec<String>>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from decoded `application/x-www-form-urlencoded` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut input = Self::new();
        for (key, value) in pairs {
            input.push(key, value);
        }
        input
    }

    pub fn push(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(field.into()).or_default().push(value.into());
    }

    /// First submitted value of a field
    pub fn value(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All submitted values of a field (empty when absent)
    pub fn values(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A single failed rule, reported back to the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub value: String,
}

/// Predicate applied to a trimmed field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// At least one character
    NotEmpty,
    /// At most this many characters
    MaxLength(u64),
    /// ASCII letters and digits only, at least one
    Alphanumeric,
    /// `YYYY-MM-DD` or an RFC 3339 date-time
    Iso8601,
    /// Well-formed entity id
    Reference,
    /// One of a fixed set of labels
    OneOf(&'static [&'static str]),
}

impl Rule {
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Rule::NotEmpty => value.validate_length(Some(1), None, None),
            Rule::MaxLength(max) => value.validate_length(None, Some(*max), None),
            Rule::Alphanumeric => is_alphanumeric(value),
            Rule::Iso8601 => parse_iso8601(value).is_some(),
            Rule::Reference => Uuid::parse_str(value).is_ok(),
            Rule::OneOf(allowed) => allowed.contains(&value),
        }
    }
}

/// Ordered rules for one form field
#[derive(Debug, Clone)]
pub struct Check {
    field: &'static str,
    optional: bool,
    each: bool,
    rules: Vec<(Rule, &'static str)>,
}

impl Check {
    /// Check the first submitted value of `field`; a missing field counts as empty
    pub fn field(field: &'static str) -> Self {
        Self {
            field,
            optional: false,
            each: false,
            rules: Vec::new(),
        }
    }

    /// Check every submitted value of a multi-valued field
    pub fn each(field: &'static str) -> Self {
        Self {
            each: true,
            ..Self::field(field)
        }
    }

    /// Skip the check when the value is absent or blank
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn rule(mut self, rule: Rule, message: &'static str) -> Self {
        self.rules.push((rule, message));
        self
    }

    pub fn run(&self, input: &FormInput) -> Vec<FieldError> {
        let values: Vec<&str> = if self.each {
            input.values(self.field).iter().map(String::as_str).collect()
        } else {
            vec![input.value(self.field).unwrap_or("")]
        };

        let mut errors = Vec::new();
        for raw in values {
            let value = raw.trim();
            if self.optional && value.is_empty() {
                continue;
            }
            for (rule, message) in &self.rules {
                if !rule.accepts(value) {
                    errors.push(FieldError {
                        field: self.field.to_string(),
                        message: (*message).to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }
        errors
    }
}

/// Run every check in order, collecting all failures
pub fn validate(checks: &[Check], input: &FormInput) -> Vec<FieldError> {
    checks.iter().flat_map(|check| check.run(input)).collect()
}

fn is_alphanumeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Parse an ISO-8601 calendar date or date-time, keeping the date part
pub fn parse_iso8601(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}
