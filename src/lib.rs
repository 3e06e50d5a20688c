//! Registrar - Account Registration Service
//!
//! This library implements account registration for a multi-user
//! application: candidate username, email and password are validated
//! against per-field rules, checked for uniqueness, hashed, and persisted
//! with a race-safe conditional write.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Validation orchestration, uniqueness checks, account writes
//! - **Repositories**: Account store backends (Postgres, in-memory)
//! - **Models**: Domain models and registration outcomes
//!
//! Uniqueness of usernames and emails rests on the store's conditional
//! write, not on the lookups made during validation.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::{middleware::from_fn, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::constants::{API_BASE_PATH, MAX_REQUEST_BODY_BYTES};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the HTTP application
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .nest(API_BASE_PATH, handlers::routes())
        .layer(from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
