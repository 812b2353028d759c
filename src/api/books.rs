//! Book endpoints

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use uuid::Uuid;

use super::{Submitted, View};
use crate::{
    error::AppResult,
    models::book::BOOK_LIST_URL,
    services::{Removal, Submission},
    AppState,
};

/// List all books with their authors
#[utoipa::path(
    get,
    path = "/catalog/books",
    tag = "books",
    responses((status = 200, description = "`book_list` view"))
)]
pub async fn book_list(State(state): State<AppState>) -> AppResult<Response> {
    let books = state.services.books.list().await?;
    Ok(View::new("book_list", "Book List", json!({ "book_list": books })).into_response())
}

/// Book detail with author, genres and copies
#[utoipa::path(
    get,
    path = "/catalog/book/{id}",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book id")),
    responses(
        (status = 200, description = "`book_detail` view"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn book_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let detail = state.services.books.detail(id).await?;
    let title = detail.book.title.clone();
    Ok(View::new("book_detail", title, detail).into_response())
}

/// Book form listing every author and genre
#[utoipa::path(
    get,
    path = "/catalog/book/create",
    tag = "books",
    responses((status = 200, description = "`book_form` view"))
)]
pub async fn book_create_get(State(state): State<AppState>) -> AppResult<Response> {
    let form = state.services.books.create_form().await?;
    Ok(View::new("book_form", "Create Book", form).into_response())
}

/// Submit a new book; `genre` may be repeated
#[utoipa::path(
    post,
    path = "/catalog/book/create",
    tag = "books",
    responses(
        (status = 303, description = "Created; redirects to the book"),
        (status = 200, description = "`book_form` view with errors")
    )
)]
pub async fn book_create_post(
    State(state): State<AppState>,
    Submitted(input): Submitted,
) -> AppResult<Response> {
    Ok(match state.services.books.create(&input).await? {
        Submission::Saved(book) => Redirect::to(&book.url()).into_response(),
        Submission::Rejected(form) => View::new("book_form", "Create Book", form).into_response(),
    })
}

#[utoipa::path(
    get,
    path = "/catalog/book/{id}/delete",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book id")),
    responses(
        (status = 200, description = "`book_delete` view"),
        (status = 303, description = "Book not found; redirects to the list")
    )
)]
pub async fn book_delete_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    Ok(match state.services.books.delete_confirmation(id).await? {
        Some(detail) => View::new("book_delete", "Delete Book", detail).into_response(),
        None => Redirect::to(BOOK_LIST_URL).into_response(),
    })
}

#[utoipa::path(
    post,
    path = "/catalog/book/{id}/delete",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book id")),
    responses(
        (status = 303, description = "Deleted or missing; redirects to the list"),
        (status = 200, description = "`book_delete` view; copies still exist")
    )
)]
pub async fn book_delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    Ok(match state.services.books.delete(id).await? {
        Removal::Blocked(detail) => View::new("book_delete", "Delete Book", detail).into_response(),
        Removal::Removed | Removal::Missing => Redirect::to(BOOK_LIST_URL).into_response(),
    })
}

#[utoipa::path(
    get,
    path = "/catalog/book/{id}/update",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book id")),
    responses(
        (status = 200, description = "`book_form` view with the book's genres checked"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn book_update_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let form = state.services.books.update_form(id).await?;
    Ok(View::new("book_form", "Update Book", form).into_response())
}

#[utoipa::path(
    post,
    path = "/catalog/book/{id}/update",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book id")),
    responses(
        (status = 303, description = "Updated; redirects to the book"),
        (status = 200, description = "`book_form` view with errors"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn book_update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Submitted(input): Submitted,
) -> AppResult<Response> {
    Ok(match state.services.books.update(id, &input).await? {
        Submission::Saved(book) => Redirect::to(&book.url()).into_response(),
        Submission::Rejected(form) => View::new("book_form", "Update Book", form).into_response(),
    })
}
