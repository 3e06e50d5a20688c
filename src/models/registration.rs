//! Registration input and outcome models

use crate::{error::InfraError, models::AccountSummary, utils::validation::ValidationIssue};

/// Raw, untrusted registration input
#[derive(Clone, Default)]
pub struct RegistrationRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Registration input with surrounding whitespace removed from username and email.
///
/// The password is kept byte-for-byte: whitespace in it is significant.
#[derive(Clone)]
pub struct NormalizedInput {
    username: String,
    email: String,
    password: String,
}

impl NormalizedInput {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl From<RegistrationRequest> for NormalizedInput {
    fn from(request: RegistrationRequest) -> Self {
        Self {
            username: request.username.trim().to_string(),
            email: request.email.trim().to_string(),
            password: request.password,
        }
    }
}

impl std::fmt::Debug for NormalizedInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NormalizedInput")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Result of one registration attempt
#[derive(Debug)]
pub enum RegistrationOutcome {
    Created(AccountSummary),
    Rejected(Vec<ValidationIssue>),
    Failed(InfraError),
}
