//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Maximum accepted request body size in bytes
pub const MAX_REQUEST_BODY_BYTES: usize = 16 * 1024;

// =============================================================================
// STORE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

/// Default time to wait for a pooled connection before giving up
pub const DEFAULT_DATABASE_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Default name of the secondary index backing email lookups
pub const DEFAULT_EMAIL_INDEX: &str = "email";

/// Store backend identifiers
pub mod store_backends {
    pub const POSTGRES: &str = "postgres";
    pub const MEMORY: &str = "memory";

    /// All supported backends
    pub const ALL: &[&str] = &[POSTGRES, MEMORY];
}

// =============================================================================
// PASSWORD HASHING DEFAULTS
// =============================================================================

/// Argon2 memory cost in KiB
pub const DEFAULT_HASH_MEMORY_KIB: u32 = 19_456;

/// Argon2 iteration count
pub const DEFAULT_HASH_ITERATIONS: u32 = 2;

/// Argon2 lane count
pub const DEFAULT_HASH_PARALLELISM: u32 = 1;

// =============================================================================
// FIELD RULES
// =============================================================================

/// Username length bounds (inclusive)
pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 16;

/// Email length bounds (inclusive)
pub const MIN_EMAIL_LENGTH: usize = 3;
pub const MAX_EMAIL_LENGTH: usize = 256;

/// Password length bounds (inclusive)
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 32;

/// Maximum length of a first or last name
pub const MAX_NAME_LENGTH: usize = 32;

/// Maximum bio length
pub const MAX_BIO_LENGTH: usize = 1000;

/// Maximum review length
pub const MAX_REVIEW_LENGTH: usize = 500;

/// Rating bounds (inclusive)
pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

// =============================================================================
// ACCOUNTS
// =============================================================================

/// Seconds in one UTC day; `member_since` is truncated to a multiple of this
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";
