//! Authoritative account creation

use std::sync::Arc;

use crate::{
    db::{AccountStore, PutOutcome, UniquenessCondition},
    error::WriteError,
    models::Account,
    utils::crypto::HashedCredential,
};

/// Persists new accounts with a single conditional write.
///
/// This is the only step allowed to conclude that an account did not exist
/// before; earlier lookups are advisory.
#[derive(Clone)]
pub struct AccountWriter {
    store: Arc<dyn AccountStore>,
}

impl AccountWriter {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Write a new account, failing with `Conflict` if its username or email is taken
    pub async fn create_account(
        &self,
        username: &str,
        email: &str,
        password_hash: HashedCredential,
        member_since: i64,
    ) -> Result<Account, WriteError> {
        let account = Account::new(
            username.to_string(),
            email.to_string(),
            password_hash.into_string(),
            member_since,
        );

        match self
            .store
            .conditional_put(&account, UniquenessCondition::AllUniqueKeysAbsent)
            .await?
        {
            PutOutcome::Written => Ok(account),
            PutOutcome::Conflict => Err(WriteError::Conflict),
        }
    }
}
