//! In-memory account repository

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    constants::DEFAULT_EMAIL_INDEX,
    db::store::{AccountKey, AccountStore, KeyQuery, PutOutcome, UniquenessCondition},
    error::InfraError,
    models::Account,
};

/// Account store held in process memory, keyed by username.
///
/// Behaves like a keyed store: email lookups must go through the configured
/// secondary index, and conditional puts are checked and applied under one
/// write lock.
pub struct MemoryAccountStore {
    email_index: String,
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryAccountStore {
    pub fn new(email_index: impl Into<String>) -> Self {
        Self {
            email_index: email_index.into(),
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }

    /// Fetch an account by username
    pub async fn get(&self, username: &str) -> Option<Account> {
        self.accounts.read().await.get(username).cloned()
    }
}

impl Default for MemoryAccountStore {
    fn default() -> Self {
        Self::new(DEFAULT_EMAIL_INDEX)
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn query(&self, query: &KeyQuery) -> Result<Vec<Account>, InfraError> {
        let accounts = self.accounts.read().await;

        match query.key {
            AccountKey::Username => Ok(accounts.get(&query.value).cloned().into_iter().collect()),
            AccountKey::Email => match query.index.as_deref() {
                Some(index) if index == self.email_index => Ok(accounts
                    .values()
                    .filter(|account| account.email == query.value)
                    .cloned()
                    .collect()),
                Some(index) => Err(InfraError::Store(format!("Unknown index: {index}"))),
                None => Err(InfraError::Store(
                    "email is not a key attribute; query it through an index".to_string(),
                )),
            },
        }
    }

    async fn conditional_put(
        &self,
        account: &Account,
        condition: UniquenessCondition,
    ) -> Result<PutOutcome, InfraError> {
        let mut accounts = self.accounts.write().await;

        let taken = match condition {
            UniquenessCondition::AllUniqueKeysAbsent => {
                accounts.contains_key(&account.username)
                    || accounts.values().any(|existing| existing.email == account.email)
            }
        };
        if taken {
            return Ok(PutOutcome::Conflict);
        }

        accounts.insert(account.username.clone(), account.clone());
        Ok(PutOutcome::Written)
    }
}
