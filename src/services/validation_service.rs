//! Registration input validation
//!
//! Combines the advisory uniqueness checks with per-field rules into one
//! ordered issue list. Every step runs even after earlier failures, so a
//! request learns about all of its problems at once.

use std::sync::Arc;

use crate::{
    db::AccountKey,
    error::InfraError,
    models::NormalizedInput,
    utils::validation::{FieldKind, RuleTable, ValidationIssue},
};

use super::uniqueness::{conflict_issue, Uniqueness, UniquenessChecker};

/// Validation orchestrator
#[derive(Clone)]
pub struct ValidationService {
    rules: Arc<RuleTable>,
    uniqueness: UniquenessChecker,
}

impl ValidationService {
    pub fn new(rules: Arc<RuleTable>, uniqueness: UniquenessChecker) -> Self {
        Self { rules, uniqueness }
    }

    /// Collect every issue with `input`, in a fixed order: email uniqueness,
    /// username uniqueness, username rules, email rules, password rules.
    ///
    /// A store failure aborts immediately and is never reported as a taken key.
    pub async fn validate(&self, input: &NormalizedInput) -> Result<Vec<ValidationIssue>, InfraError> {
        let mut issues = Vec::new();

        if self.uniqueness.check_email(input.email()).await? == Uniqueness::Conflict {
            issues.push(conflict_issue(AccountKey::Email));
        }
        if self.uniqueness.check_username(input.username()).await? == Uniqueness::Conflict {
            issues.push(conflict_issue(AccountKey::Username));
        }

        issues.extend(self.rules.validate_field(input.username(), FieldKind::Username));
        issues.extend(self.rules.validate_field(input.email(), FieldKind::Email));
        issues.extend(self.rules.validate_field(input.password(), FieldKind::Password));

        Ok(issues)
    }
}
