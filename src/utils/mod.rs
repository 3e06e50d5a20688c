//! Utility functions

pub mod crypto;
pub mod time;
pub mod validation;

pub use crypto::{CredentialHasher, HashedCredential};
pub use time::{start_of_utc_day, Clock, SystemClock};
pub use validation::{FieldKind, RuleTable, ValidationIssue};
