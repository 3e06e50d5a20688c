//! Business logic services

pub mod account_writer;
pub mod registration_service;
pub mod uniqueness;
pub mod validation_service;

pub use account_writer::AccountWriter;
pub use registration_service::{RegistrationService, RegistrationStage};
pub use uniqueness::{Uniqueness, UniquenessChecker};
pub use validation_service::ValidationService;
