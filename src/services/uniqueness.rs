//! Advisory uniqueness checks
//!
//! A `Unique` answer only describes the store at the moment of the read.
//! Concurrent signups can both observe `Unique`; the conditional write in
//! [`AccountWriter`](super::AccountWriter) settles the race.

use std::sync::Arc;

use crate::{
    db::{AccountKey, AccountStore, KeyQuery},
    error::InfraError,
    utils::validation::ValidationIssue,
};

/// Whether a key value is already taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uniqueness {
    Unique,
    Conflict,
}

/// Looks up existing accounts by username or email
#[derive(Clone)]
pub struct UniquenessChecker {
    store: Arc<dyn AccountStore>,
    email_index: String,
}

impl UniquenessChecker {
    pub fn new(store: Arc<dyn AccountStore>, email_index: impl Into<String>) -> Self {
        Self {
            store,
            email_index: email_index.into(),
        }
    }

    /// Query the store for `value` under `key`, through `index` for secondary keys
    pub async fn check_unique(
        &self,
        key: AccountKey,
        value: &str,
        index: Option<&str>,
    ) -> Result<Uniqueness, InfraError> {
        let matches = self.store.query(&KeyQuery::new(key, value, index)).await?;

        if matches.is_empty() {
            Ok(Uniqueness::Unique)
        } else {
            Ok(Uniqueness::Conflict)
        }
    }

    pub async fn check_email(&self, email: &str) -> Result<Uniqueness, InfraError> {
        self.check_unique(AccountKey::Email, email, Some(&self.email_index))
            .await
    }

    pub async fn check_username(&self, username: &str) -> Result<Uniqueness, InfraError> {
        self.check_unique(AccountKey::Username, username, None).await
    }
}

/// The issue reported when `key` is already taken
pub fn conflict_issue(key: AccountKey) -> ValidationIssue {
    let field = key.field();
    ValidationIssue::new(field, format!("{} already in use", field.name()))
}

/// Whether `issue` reports a taken username or email
pub fn is_conflict_issue(issue: &ValidationIssue) -> bool {
    [AccountKey::Username, AccountKey::Email]
        .into_iter()
        .any(|key| *issue == conflict_issue(key))
}
