//! Genre endpoints

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use uuid::Uuid;

use super::{Submitted, View};
use crate::{
    error::AppResult,
    models::genre::{GenreForm, GENRE_LIST_URL},
    services::{Removal, Submission},
    AppState,
};

#[utoipa::path(
    get,
    path = "/catalog/genres",
    tag = "genres",
    responses((status = 200, description = "`genre_list` view"))
)]
pub async fn genre_list(State(state): State<AppState>) -> AppResult<Response> {
    let genres = state.services.genres.list().await?;
    Ok(View::new("genre_list", "Genre List", json!({ "genre_list": genres })).into_response())
}

#[utoipa::path(
    get,
    path = "/catalog/genre/{id}",
    tag = "genres",
    params(("id" = Uuid, Path, description = "Genre id")),
    responses(
        (status = 200, description = "`genre_detail` view"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn genre_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let detail = state.services.genres.detail(id).await?;
    Ok(View::new("genre_detail", "Genre Detail", detail).into_response())
}

#[utoipa::path(
    get,
    path = "/catalog/genre/create",
    tag = "genres",
    responses((status = 200, description = "`genre_form` view"))
)]
pub async fn genre_create_get() -> Response {
    View::new("genre_form", "Create Genre", GenreForm::default()).into_response()
}

/// Submit a genre; an existing genre with the same name is reused
#[utoipa::path(
    post,
    path = "/catalog/genre/create",
    tag = "genres",
    responses(
        (status = 303, description = "Redirects to the new or existing genre"),
        (status = 200, description = "`genre_form` view with errors")
    )
)]
pub async fn genre_create_post(
    State(state): State<AppState>,
    Submitted(input): Submitted,
) -> AppResult<Response> {
    Ok(match state.services.genres.create(&input).await? {
        Submission::Saved(genre) => Redirect::to(&genre.url()).into_response(),
        Submission::Rejected(form) => View::new("genre_form", "Create Genre", form).into_response(),
    })
}

#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(("id" = Uuid, Path, description = "Genre id")),
    responses(
        (status = 200, description = "`genre_delete` view"),
        (status = 303, description = "Genre not found; redirects to the list")
    )
)]
pub async fn genre_delete_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    Ok(match state.services.genres.delete_confirmation(id).await? {
        Some(detail) => View::new("genre_delete", "Delete Genre", detail).into_response(),
        None => Redirect::to(GENRE_LIST_URL).into_response(),
    })
}

#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(("id" = Uuid, Path, description = "Genre id")),
    responses(
        (status = 303, description = "Deleted or missing; redirects to the list"),
        (status = 200, description = "`genre_delete` view; books still use the genre")
    )
)]
pub async fn genre_delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    Ok(match state.services.genres.delete(id).await? {
        Removal::Blocked(detail) => View::new("genre_delete", "Delete Genre", detail).into_response(),
        Removal::Removed | Removal::Missing => Redirect::to(GENRE_LIST_URL).into_response(),
    })
}

#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(("id" = Uuid, Path, description = "Genre id")),
    responses(
        (status = 200, description = "`genre_form` view"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn genre_update_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let form = state.services.genres.update_form(id).await?;
    Ok(View::new("genre_form", "Update Genre", form).into_response())
}

#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(("id" = Uuid, Path, description = "Genre id")),
    responses(
        (status = 303, description = "Updated; redirects to the genre"),
        (status = 200, description = "`genre_form` view with errors"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn genre_update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Submitted(input): Submitted,
) -> AppResult<Response> {
    Ok(match state.services.genres.update(id, &input).await? {
        Submission::Saved(genre) => Redirect::to(&genre.url()).into_response(),
        Submission::Rejected(form) => View::new("genre_form", "Update Genre", form).into_response(),
    })
}
