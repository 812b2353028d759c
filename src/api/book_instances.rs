//! Book instance (copy) endpoints

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use uuid::Uuid;

use super::{Submitted, View};
use crate::{
    error::AppResult,
    models::book_instance::BOOK_INSTANCE_LIST_URL,
    services::{Removal, Submission},
    AppState,
};

#[utoipa::path(
    get,
    path = "/catalog/bookinstances",
    tag = "bookinstances",
    responses((status = 200, description = "`bookinstance_list` view"))
)]
pub async fn bookinstance_list(State(state): State<AppState>) -> AppResult<Response> {
    let instances = state.services.book_instances.list().await?;
    Ok(View::new(
        "bookinstance_list",
        "Book Instance List",
        json!({ "bookinstance_list": instances }),
    )
    .into_response())
}

#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}",
    tag = "bookinstances",
    params(("id" = Uuid, Path, description = "Book instance id")),
    responses(
        (status = 200, description = "`bookinstance_detail` view"),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn bookinstance_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let detail = state.services.book_instances.detail(id).await?;
    Ok(View::new("bookinstance_detail", "Book", detail).into_response())
}

/// Copy form listing every book title
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    responses((status = 200, description = "`bookinstance_form` view"))
)]
pub async fn bookinstance_create_get(State(state): State<AppState>) -> AppResult<Response> {
    let form = state.services.book_instances.create_form().await?;
    Ok(View::new("bookinstance_form", "Create BookInstance", form).into_response())
}

#[utoipa::path(
    post,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    responses(
        (status = 303, description = "Created; redirects to the copy"),
        (status = 200, description = "`bookinstance_form` view with errors")
    )
)]
pub async fn bookinstance_create_post(
    State(state): State<AppState>,
    Submitted(input): Submitted,
) -> AppResult<Response> {
    Ok(match state.services.book_instances.create(&input).await? {
        Submission::Saved(instance) => Redirect::to(&instance.url()).into_response(),
        Submission::Rejected(form) => {
            View::new("bookinstance_form", "Create BookInstance", form).into_response()
        }
    })
}

#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(("id" = Uuid, Path, description = "Book instance id")),
    responses(
        (status = 200, description = "`bookinstance_delete` view"),
        (status = 303, description = "Book instance not found; redirects to the list")
    )
)]
pub async fn bookinstance_delete_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    Ok(match state.services.book_instances.delete_confirmation(id).await? {
        Some(detail) => {
            View::new("bookinstance_delete", "Delete BookInstance", detail).into_response()
        }
        None => Redirect::to(BOOK_INSTANCE_LIST_URL).into_response(),
    })
}

#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(("id" = Uuid, Path, description = "Book instance id")),
    responses((status = 303, description = "Deleted or missing; redirects to the list"))
)]
pub async fn bookinstance_delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    Ok(match state.services.book_instances.delete(id).await? {
        Removal::Blocked(detail) => {
            View::new("bookinstance_delete", "Delete BookInstance", detail).into_response()
        }
        Removal::Removed | Removal::Missing => Redirect::to(BOOK_INSTANCE_LIST_URL).into_response(),
    })
}

#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(("id" = Uuid, Path, description = "Book instance id")),
    responses(
        (status = 200, description = "`bookinstance_form` view with the copy's book selected"),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn bookinstance_update_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let form = state.services.book_instances.update_form(id).await?;
    Ok(View::new("bookinstance_form", "Update BookInstance", form).into_response())
}

#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(("id" = Uuid, Path, description = "Book instance id")),
    responses(
        (status = 303, description = "Updated; redirects to the copy"),
        (status = 200, description = "`bookinstance_form` view with errors"),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn bookinstance_update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Submitted(input): Submitted,
) -> AppResult<Response> {
    Ok(match state.services.book_instances.update(id, &input).await? {
        Submission::Saved(instance) => Redirect::to(&instance.url()).into_response(),
        Submission::Rejected(form) => {
            View::new("bookinstance_form", "Update BookInstance", form).into_response()
        }
    })
}
