//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::services::RegistrationService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Registration pipeline, with its store and hasher already injected
    registration: RegistrationService,
}

impl AppState {
    /// Create a new application state
    pub fn new(registration: RegistrationService) -> Self {
        Self {
            inner: Arc::new(AppStateInner { registration }),
        }
    }

    /// Get a reference to the registration service
    pub fn registration(&self) -> &RegistrationService {
        &self.inner.registration
    }
}
