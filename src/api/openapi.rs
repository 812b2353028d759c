//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, book_instances, books, catalog, genres, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Local Library Catalog",
        version = "0.3.0",
        description = "Catalog of authors, books, genres and book copies. Pages are returned \
                       as JSON views; form submissions are url-encoded and redirect with 303 \
                       on success."
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Home
        catalog::index,
        // Authors
        authors::author_list,
        authors::author_detail,
        authors::author_create_get,
        authors::author_create_post,
        authors::author_delete_get,
        authors::author_delete_post,
        authors::author_update_get,
        authors::author_update_post,
        // Books
        books::book_list,
        books::book_detail,
        books::book_create_get,
        books::book_create_post,
        books::book_delete_get,
        books::book_delete_post,
        books::book_update_get,
        books::book_update_post,
        // Genres
        genres::genre_list,
        genres::genre_detail,
        genres::genre_create_get,
        genres::genre_create_post,
        genres::genre_delete_get,
        genres::genre_delete_post,
        genres::genre_update_get,
        genres::genre_update_post,
        // Book instances
        book_instances::bookinstance_list,
        book_instances::bookinstance_detail,
        book_instances::bookinstance_create_get,
        book_instances::bookinstance_create_post,
        book_instances::bookinstance_delete_get,
        book_instances::bookinstance_delete_post,
        book_instances::bookinstance_update_get,
        book_instances::bookinstance_update_post,
    ),
    components(
        schemas(
            crate::models::Author,
            crate::models::Book,
            crate::models::Genre,
            crate::models::BookInstance,
            crate::models::BookInstanceStatus,
            crate::models::catalog::CatalogCounts,
            crate::validation::FieldError,
            health::HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Catalog home"),
        (name = "authors", description = "Author management"),
        (name = "books", description = "Book management"),
        (name = "genres", description = "Genre management"),
        (name = "bookinstances", description = "Book copy management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
