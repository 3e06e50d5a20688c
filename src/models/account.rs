//! Account model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Persisted account record
///
/// `username` and `email` are each unique across all accounts.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Unix seconds at 00:00:00 UTC of the signup day
    pub member_since: i64,
    pub num_ratings: i32,
    pub is_verified: bool,
}

impl Account {
    /// A freshly registered account: no ratings, not verified
    pub fn new(username: String, email: String, password_hash: String, member_since: i64) -> Self {
        Self {
            username,
            email,
            password_hash,
            member_since,
            num_ratings: 0,
            is_verified: false,
        }
    }
}

/// Identifying information about a created account, without credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub username: String,
    pub email: String,
    pub member_since: i64,
    pub num_ratings: i32,
    pub is_verified: bool,
}

impl From<Account> for AccountSummary {
    fn from(account: Account) -> Self {
        Self {
            username: account.username,
            email: account.email,
            member_since: account.member_since,
            num_ratings: account.num_ratings,
            is_verified: account.is_verified,
        }
    }
}
