//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod catalog;
pub mod genre;

use chrono::NaiveDate;

// Re-export commonly used types
pub use author::Author;
pub use book::Book;
pub use book_instance::{BookInstance, BookInstanceStatus};
pub use genre::Genre;

/// Long human form, e.g. `5 March, 1950`; empty when absent
pub fn format_long_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%-d %B, %Y").to_string())
        .unwrap_or_default()
}

/// `YYYY-MM-DD`, as expected by date inputs; empty when absent
pub fn format_iso_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
