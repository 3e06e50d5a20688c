//! Database module
//!
//! This module handles database connections, the account store abstraction,
//! and its repositories.

pub mod connection;
pub mod repositories;
pub mod store;

pub use connection::*;
pub use store::{AccountKey, AccountStore, KeyQuery, PutOutcome, UniquenessCondition};
