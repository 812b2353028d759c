//! Author endpoints

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use uuid::Uuid;

use super::{Submitted, View};
use crate::{
    error::AppResult,
    models::author::{AuthorForm, AUTHOR_LIST_URL},
    services::{Removal, Submission},
    AppState,
};

/// List all authors
#[utoipa::path(
    get,
    path = "/catalog/authors",
    tag = "authors",
    responses(
        (status = 200, description = "`author_list` view"),
        (status = 500, description = "Storage fault")
    )
)]
pub async fn author_list(State(state): State<AppState>) -> AppResult<Response> {
    let authors = state.services.authors.list().await?;
    Ok(View::new("author_list", "Author List", json!({ "author_list": authors })).into_response())
}

/// Author detail with their books
#[utoipa::path(
    get,
    path = "/catalog/author/{id}",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author id")),
    responses(
        (status = 200, description = "`author_detail` view"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let detail = state.services.authors.detail(id).await?;
    Ok(View::new("author_detail", "Author Detail", detail).into_response())
}

/// Empty author form
#[utoipa::path(
    get,
    path = "/catalog/author/create",
    tag = "authors",
    responses((status = 200, description = "`author_form` view"))
)]
pub async fn author_create_get() -> Response {
    View::new("author_form", "Create Author", AuthorForm::default()).into_response()
}

/// Submit a new author
#[utoipa::path(
    post,
    path = "/catalog/author/create",
    tag = "authors",
    responses(
        (status = 303, description = "Created; redirects to the author"),
        (status = 200, description = "`author_form` view with errors"),
        (status = 400, description = "Malformed form body")
    )
)]
pub async fn author_create_post(
    State(state): State<AppState>,
    Submitted(input): Submitted,
) -> AppResult<Response> {
    Ok(match state.services.authors.create(&input).await? {
        Submission::Saved(author) => Redirect::to(&author.url()).into_response(),
        Submission::Rejected(form) => View::new("author_form", "Create Author", form).into_response(),
    })
}

/// Delete confirmation, listing the author's books
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author id")),
    responses(
        (status = 200, description = "`author_delete` view"),
        (status = 303, description = "Author not found; redirects to the list")
    )
)]
pub async fn author_delete_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    Ok(match state.services.authors.delete_confirmation(id).await? {
        Some(detail) => View::new("author_delete", "Delete Author", detail).into_response(),
        None => Redirect::to(AUTHOR_LIST_URL).into_response(),
    })
}

/// Delete an author without books
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author id")),
    responses(
        (status = 303, description = "Deleted or missing; redirects to the list"),
        (status = 200, description = "`author_delete` view; the author still has books")
    )
)]
pub async fn author_delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    Ok(match state.services.authors.delete(id).await? {
        Removal::Blocked(detail) => View::new("author_delete", "Delete Author", detail).into_response(),
        Removal::Removed | Removal::Missing => Redirect::to(AUTHOR_LIST_URL).into_response(),
    })
}

/// Author form prefilled for editing
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author id")),
    responses(
        (status = 200, description = "`author_form` view"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn author_update_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let form = state.services.authors.update_form(id).await?;
    Ok(View::new("author_form", "Update Author", form).into_response())
}

/// Submit changes to an author
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author id")),
    responses(
        (status = 303, description = "Updated; redirects to the author"),
        (status = 200, description = "`author_form` view with errors"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn author_update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Submitted(input): Submitted,
) -> AppResult<Response> {
    Ok(match state.services.authors.update(id, &input).await? {
        Submission::Saved(author) => Redirect::to(&author.url()).into_response(),
        Submission::Rejected(form) => View::new("author_form", "Update Author", form).into_response(),
    })
}
