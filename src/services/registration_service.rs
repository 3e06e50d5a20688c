//! Account registration service
//!
//! Drives one registration through `Normalizing → Validating → Hashing →
//! Writing → Done`. Transitions only move forward and nothing is retried
//! within a call.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, Span};

use crate::{
    db::AccountStore,
    error::{InfraError, WriteError},
    models::{NormalizedInput, RegistrationOutcome, RegistrationRequest},
    utils::{
        crypto::CredentialHasher,
        time::{epoch_day, Clock},
        validation::{RuleTable, ValidationIssue},
    },
};

use super::{
    account_writer::AccountWriter,
    uniqueness::{is_conflict_issue, UniquenessChecker},
    validation_service::ValidationService,
};

/// Reported when a write conflicts but re-validation cannot name the duplicate key
const UNNAMED_CONFLICT_MESSAGE: &str = "Username or email already in use";

/// Stage of a single registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RegistrationStage {
    Normalizing,
    Validating,
    Hashing,
    Writing,
    Done,
}

impl fmt::Display for RegistrationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Normalizing => "normalizing",
            Self::Validating => "validating",
            Self::Hashing => "hashing",
            Self::Writing => "writing",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Forward-only stage tracker
struct Progress {
    stage: RegistrationStage,
}

impl Progress {
    fn start() -> Self {
        debug!(stage = %RegistrationStage::Normalizing, "Registration stage");
        Self {
            stage: RegistrationStage::Normalizing,
        }
    }

    fn advance(&mut self, next: RegistrationStage) {
        debug_assert!(next > self.stage, "registration stages only move forward");
        self.stage = next;
        debug!(stage = %next, "Registration stage");
    }
}

/// Registration service
pub struct RegistrationService {
    validation: ValidationService,
    hasher: CredentialHasher,
    writer: AccountWriter,
    clock: Arc<dyn Clock>,
}

impl RegistrationService {
    pub fn new(
        store: Arc<dyn AccountStore>,
        rules: Arc<RuleTable>,
        hasher: CredentialHasher,
        email_index: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let uniqueness = UniquenessChecker::new(store.clone(), email_index);

        Self {
            validation: ValidationService::new(rules, uniqueness),
            hasher,
            writer: AccountWriter::new(store),
            clock,
        }
    }

    /// Register a new account
    #[tracing::instrument(name = "register", skip_all, fields(username = tracing::field::Empty))]
    pub async fn register(&self, request: RegistrationRequest) -> RegistrationOutcome {
        match self.run(request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Registration failed");
                RegistrationOutcome::Failed(e)
            }
        }
    }

    async fn run(&self, request: RegistrationRequest) -> Result<RegistrationOutcome, InfraError> {
        let mut progress = Progress::start();
        let input = NormalizedInput::from(request);
        Span::current().record("username", input.username());

        progress.advance(RegistrationStage::Validating);
        let issues = self.validation.validate(&input).await?;
        if !issues.is_empty() {
            return Ok(Self::reject(issues));
        }

        progress.advance(RegistrationStage::Hashing);
        let hashed = self.hasher.hash(input.password()).await?;

        progress.advance(RegistrationStage::Writing);
        let member_since = epoch_day(self.clock.as_ref());
        let written = self
            .writer
            .create_account(input.username(), input.email(), hashed, member_since)
            .await;

        match written {
            Ok(account) => {
                progress.advance(RegistrationStage::Done);
                info!(member_since, "Account created");
                Ok(RegistrationOutcome::Created(account.into()))
            }
            Err(WriteError::Conflict) => {
                info!("Account write conflicted, re-validating");
                let mut issues = self.validation.validate(&input).await?;
                if !issues.iter().any(is_conflict_issue) {
                    issues.push(ValidationIssue::account(UNNAMED_CONFLICT_MESSAGE));
                }
                Ok(Self::reject(issues))
            }
            Err(WriteError::Infra(e)) => Err(e),
        }
    }

    fn reject(issues: Vec<ValidationIssue>) -> RegistrationOutcome {
        info!(issue_count = issues.len(), "Registration rejected");
        debug!(issues = ?issues, "Rejection details");
        RegistrationOutcome::Rejected(issues)
    }
}
