//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod account;
pub mod registration;

pub use account::*;
pub use registration::*;
