//! Error types for the catalog server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Main application error type.
///
/// Form validation failures and blocked deletes are not errors: services
/// return them as outcomes and handlers render them as views.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Migration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::NotFound(msg) => msg,
            AppError::BadRequest(msg) => msg,
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Internal Server Error".to_string()
            }
            AppError::Migration(e) => {
                tracing::error!("Migration error: {:?}", e);
                "Internal Server Error".to_string()
            }
        };

        (status, message).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::NotFound("Author Not Found".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Database(sqlx::Error::PoolTimedOut).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_body_is_plain_message() {
        let err = AppError::NotFound("Genre Not Found".into());
        assert_eq!(err.to_string(), "Genre Not Found");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
