//! Catalog home page

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};

use super::View;
use crate::AppState;

/// Home page with document counts
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    responses((status = 200, description = "`index` view; `error` is set when counting failed"))
)]
pub async fn index(State(state): State<AppState>) -> Response {
    let home = state.services.catalog.home().await;
    View::new("index", "Local Library Home", home).into_response()
}
