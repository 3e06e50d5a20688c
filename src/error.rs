//! Custom error types and handling
//!
//! This module defines the application's error types and implements
//! conversion to HTTP responses for the Axum framework.
//!
//! Three failure families exist. Validation problems are data, not errors:
//! they travel as [`ValidationIssue`] lists inside a registration outcome.
//! [`InfraError`] covers the store and the hasher being unavailable.
//! [`ConfigError`] covers deployment and programmer mistakes and is raised at
//! startup.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::utils::validation::ValidationIssue;

/// Store or hashing subsystem failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InfraError {
    #[error("Store error: {0}")]
    Store(String),

    #[error("Store request timed out")]
    Timeout,

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl From<sqlx::Error> for InfraError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => InfraError::Timeout,
            _ => InfraError::Store(err.to_string()),
        }
    }
}

/// Failure of the authoritative account write
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    #[error("Account already exists")]
    Conflict,

    #[error(transparent)]
    Infra(#[from] InfraError),
}

/// Deployment or programmer error, surfaced during startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),

    #[error("Unknown field kind: {0}")]
    UnknownFieldKind(String),

    #[error("Invalid rule pattern for {field}: {source}")]
    InvalidPattern {
        field: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid password hashing parameters: {0}")]
    InvalidHashParams(String),

    #[error("Invalid table name: {0}")]
    InvalidTableName(String),
}

/// HTTP-facing error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed")]
    Rejected(Vec<ValidationIssue>),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in response
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Rejected(_) => "VALIDATION_ERROR",
            Self::Infra(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::Rejected(_) => StatusCode::BAD_REQUEST,
            Self::Infra(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().to_string();

        let (message, details) = match &self {
            AppError::Rejected(issues) => {
                let message = issues
                    .iter()
                    .map(|issue| issue.message.as_str())
                    .collect::<Vec<_>>()
                    .join("\n");
                (message, serde_json::to_value(issues).ok())
            }
            // Already logged by the service that hit it; never exposed to clients
            AppError::Infra(_) => ("An internal error occurred".to_string(), None),
            AppError::InvalidInput(_) => (self.to_string(), None),
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Counts `ERROR` events emitted on the current thread while the guard lives
#[cfg(test)]
pub(crate) fn capture_error_events() -> (
    std::sync::Arc<std::sync::atomic::AtomicUsize>,
    tracing::subscriber::DefaultGuard,
) {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

    struct ErrorEvents(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for ErrorEvents {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            if *event.metadata().level() == tracing::Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    let count = Arc::new(AtomicUsize::new(0));
    let guard = tracing_subscriber::registry()
        .with(ErrorEvents(count.clone()))
        .set_default();
    (count, guard)
}
