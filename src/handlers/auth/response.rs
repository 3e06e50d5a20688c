//! Registration response DTOs

use serde::Serialize;

use crate::models::AccountSummary;

/// Account information in the registration response
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub username: String,
    pub email: String,
    pub member_since: i64,
    pub num_ratings: i32,
    pub is_verified: bool,
}

impl From<AccountSummary> for AccountResponse {
    fn from(summary: AccountSummary) -> Self {
        Self {
            username: summary.username,
            email: summary.email,
            member_since: summary.member_since,
            num_ratings: summary.num_ratings,
            is_verified: summary.is_verified,
        }
    }
}

/// Registration success response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub account: AccountResponse,
}
