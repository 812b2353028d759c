//! Local library catalog server
//!
//! Create, list, inspect, update and delete the authors, books, genres and
//! physical book copies of a small library. Pages are served as JSON views
//! over axum; storage is PostgreSQL or an in-memory store.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig, repository: repository::Repository) -> Self {
        Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(repository)),
        }
    }
}
