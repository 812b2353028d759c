//! Catalog-wide summary shown on the home page

use serde::Serialize;
use utoipa::ToSchema;

/// Document counts per collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct CatalogCounts {
    pub book_count: i64,
    pub book_instance_count: i64,
    pub book_instance_available_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}

/// `index` view data. A failed count renders the page with `error` set.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogHome {
    pub error: Option<String>,
    pub data: Option<CatalogCounts>,
}
