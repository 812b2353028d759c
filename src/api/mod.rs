//! HTTP handlers for the catalog routes
//!
//! Every page answers with a [`View`]: a JSON document naming the view to
//! render, its title and the view data. Successful form submissions answer
//! with a `303 See Other` redirect instead.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use serde::Serialize;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, validation::FormInput, AppState};

/// A rendered page: `{ "view": ..., "title": ..., ...data }`
pub struct View<T> {
    name: &'static str,
    title: String,
    data: T,
}

impl<T: Serialize> View<T> {
    pub fn new(name: &'static str, title: impl Into<String>, data: T) -> Self {
        Self {
            name,
            title: title.into(),
            data,
        }
    }
}

#[derive(Serialize)]
struct Rendered<'a, T> {
    view: &'a str,
    title: &'a str,
    #[serde(flatten)]
    data: &'a T,
}

impl<T: Serialize> IntoResponse for View<T> {
    fn into_response(self) -> Response {
        Json(Rendered {
            view: self.name,
            title: &self.title,
            data: &self.data,
        })
        .into_response()
    }
}

/// Extractor for an `application/x-www-form-urlencoded` body.
///
/// Unlike `Form<T>`, repeated keys are kept (in order) rather than collapsed.
pub struct Submitted(pub FormInput);

#[async_trait]
impl<S> FromRequest<S> for Submitted
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Submitted(FormInput::from_pairs(pairs)))
    }
}

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let catalog = Router::new()
        .route("/", get(catalog::index))
        // Authors
        .route("/authors", get(authors::author_list))
        .route(
            "/author/create",
            get(authors::author_create_get).post(authors::author_create_post),
        )
        .route("/author/:id", get(authors::author_detail))
        .route(
            "/author/:id/delete",
            get(authors::author_delete_get).post(authors::author_delete_post),
        )
        .route(
            "/author/:id/update",
            get(authors::author_update_get).post(authors::author_update_post),
        )
        // Books
        .route("/books", get(books::book_list))
        .route(
            "/book/create",
            get(books::book_create_get).post(books::book_create_post),
        )
        .route("/book/:id", get(books::book_detail))
        .route(
            "/book/:id/delete",
            get(books::book_delete_get).post(books::book_delete_post),
        )
        .route(
            "/book/:id/update",
            get(books::book_update_get).post(books::book_update_post),
        )
        // Genres
        .route("/genres", get(genres::genre_list))
        .route(
            "/genre/create",
            get(genres::genre_create_get).post(genres::genre_create_post),
        )
        .route("/genre/:id", get(genres::genre_detail))
        .route(
            "/genre/:id/delete",
            get(genres::genre_delete_get).post(genres::genre_delete_post),
        )
        .route(
            "/genre/:id/update",
            get(genres::genre_update_get).post(genres::genre_update_post),
        )
        // Book instances
        .route("/bookinstances", get(book_instances::bookinstance_list))
        .route(
            "/bookinstance/create",
            get(book_instances::bookinstance_create_get)
                .post(book_instances::bookinstance_create_post),
        )
        .route("/bookinstance/:id", get(book_instances::bookinstance_detail))
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::bookinstance_delete_get)
                .post(book_instances::bookinstance_delete_post),
        )
        .route(
            "/bookinstance/:id/update",
            get(book_instances::bookinstance_update_get)
                .post(book_instances::bookinstance_update_post),
        );

    Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/catalog", catalog)
        .with_state(state)
        .merge(openapi::create_openapi_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::to_bytes, http::StatusCode};

    #[derive(Serialize)]
    struct Counts {
        count: u32,
    }

    #[tokio::test]
    async fn test_view_envelope() {
        let response = View::new("genre_list", "Genre List", Counts { count: 2 }).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["view"], "genre_list");
        assert_eq!(value["title"], "Genre List");
        assert_eq!(value["count"], 2);
    }

    #[tokio::test]
    async fn test_submitted_keeps_repeated_keys() {
        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(axum::body::Body::from("title=Dune&genre=a&genre=b"))
            .unwrap();

        let Submitted(input) = Submitted::from_request(request, &()).await.unwrap();
        assert_eq!(input.value("title"), Some("Dune"));
        assert_eq!(input.values("genre"), ["a", "b"]);
    }

    #[tokio::test]
    async fn test_submitted_rejects_other_content() {
        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{}"))
            .unwrap();

        let result = Submitted::from_request(request, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
