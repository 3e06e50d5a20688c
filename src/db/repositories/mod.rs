//! Database repositories
//!
//! Repositories implement [`AccountStore`](crate::db::AccountStore) against a
//! concrete backend.

pub mod account_repo;
pub mod memory_repo;

pub use account_repo::PgAccountStore;
pub use memory_repo::MemoryAccountStore;
