//! Keyed account store abstraction
//!
//! The pipeline needs exactly two operations from storage: a lookup by key
//! and a conditional write. Only the conditional write is authoritative about
//! uniqueness; lookups may be stale by the time a write happens.

use async_trait::async_trait;

use crate::{error::InfraError, models::Account, utils::validation::FieldKind};

/// Unique attribute of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKey {
    /// Primary key
    Username,
    /// Unique secondary key
    Email,
}

impl AccountKey {
    /// Column / attribute name in the store
    pub const fn column(self) -> &'static str {
        match self {
            AccountKey::Username => "username",
            AccountKey::Email => "email",
        }
    }

    /// The input field this key is read from
    pub const fn field(self) -> FieldKind {
        match self {
            AccountKey::Username => FieldKind::Username,
            AccountKey::Email => FieldKind::Email,
        }
    }
}

/// Lookup by one key, optionally through a named secondary index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyQuery {
    pub key: AccountKey,
    pub value: String,
    pub index: Option<String>,
}

impl KeyQuery {
    pub fn new(key: AccountKey, value: impl Into<String>, index: Option<&str>) -> Self {
        Self {
            key,
            value: value.into(),
            index: index.map(str::to_string),
        }
    }
}

/// Precondition for a conditional write.
///
/// Every backend enforces username and email uniqueness together; there is
/// no weaker condition that would let two accounts share an email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniquenessCondition {
    /// No record shares the primary key or any unique secondary key
    AllUniqueKeysAbsent,
}

/// Result of a conditional write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    Written,
    Conflict,
}

/// Storage backend for accounts
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// All records whose `query.key` equals `query.value`
    async fn query(&self, query: &KeyQuery) -> Result<Vec<Account>, InfraError>;

    /// Insert `account` only if `condition` holds, evaluated atomically by the store
    async fn conditional_put(
        &self,
        account: &Account,
        condition: UniquenessCondition,
    ) -> Result<PutOutcome, InfraError>;
}
