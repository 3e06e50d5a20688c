//! Rule-driven field validation
//!
//! Every [`FieldKind`] maps to an ordered list of [`Check`]s. Validating a
//! value runs every check in declaration order and collects one
//! [`ValidationIssue`] per failed check, so a single call reports all of a
//! field's problems at once.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::Serialize;

use crate::constants::{
    MAX_BIO_LENGTH, MAX_EMAIL_LENGTH, MAX_NAME_LENGTH, MAX_PASSWORD_LENGTH, MAX_RATING,
    MAX_REVIEW_LENGTH, MAX_USERNAME_LENGTH, MIN_EMAIL_LENGTH, MIN_PASSWORD_LENGTH, MIN_RATING,
    MIN_USERNAME_LENGTH,
};
use crate::error::ConfigError;

/// Anything outside ASCII letters and digits
const USERNAME_FORBIDDEN: &str = r"[^A-Za-z0-9]";

/// `local@domain.tld`: no whitespace or extra `@`, at least one dot, no empty domain labels
const EMAIL_FORMAT: &str = r"^[^@\s]+@[^@\s.]+(?:\.[^@\s.]+)+$";

/// Digits and punctuation that never appear in a personal name
const NAME_FORBIDDEN: &str = r##"[!"`'#%\&,:;<>=@{}\~$()*+/\\?\[\]^|0-9]"##;

/// Field name used for issues that are not tied to a single input field
const ACCOUNT_FIELD: &str = "account";

/// Category of input that determines which checks apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Username,
    Email,
    Password,
    FirstName,
    LastName,
    Bio,
    Review,
    Rating,
}

impl FieldKind {
    /// Number of field kinds
    pub const COUNT: usize = 8;

    /// Every field kind, in rule-table order
    pub const ALL: [FieldKind; Self::COUNT] = [
        FieldKind::Username,
        FieldKind::Email,
        FieldKind::Password,
        FieldKind::FirstName,
        FieldKind::LastName,
        FieldKind::Bio,
        FieldKind::Review,
        FieldKind::Rating,
    ];

    /// Human-readable name used as the subject of issue messages
    pub const fn name(self) -> &'static str {
        match self {
            FieldKind::Username => "Username",
            FieldKind::Email => "Email",
            FieldKind::Password => "Password",
            FieldKind::FirstName => "FirstName",
            FieldKind::LastName => "LastName",
            FieldKind::Bio => "Bio",
            FieldKind::Review => "Review",
            FieldKind::Rating => "Rating",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ConfigError::UnknownFieldKind(s.to_string()))
    }
}

/// One failed check, tagged with the field it concerns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(kind: FieldKind, message: impl Into<String>) -> Self {
        Self {
            field: kind.name(),
            message: message.into(),
        }
    }

    /// An issue about the account as a whole rather than one field
    pub fn account(message: impl Into<String>) -> Self {
        Self {
            field: ACCOUNT_FIELD,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A single composable check
#[derive(Debug, Clone)]
pub enum Check {
    /// Must contain something other than whitespace
    NotEmpty,
    /// Length in characters, inclusive on both ends
    Length { min: usize, max: usize },
    /// Fails when the pattern matches anywhere in the value
    Forbidden { pattern: Regex, message: &'static str },
    /// Must match the `local@domain.tld` shape; size is left to `Length`
    EmailFormat(Regex),
    /// Parses as a signed integer
    WholeNumber,
    /// Integer value within bounds, inclusive; non-integers are left to `WholeNumber`
    Range { min: i64, max: i64 },
}

impl Check {
    /// Returns the failure message, if the value fails this check
    fn evaluate(&self, value: &str, kind: FieldKind) -> Option<String> {
        let name = kind.name();
        match self {
            Check::NotEmpty => value
                .trim()
                .is_empty()
                .then(|| format!("{name} must not be empty")),
            Check::Length { min, max } => {
                let len = value.chars().count();
                (len < *min || len > *max)
                    .then(|| format!("{name} must be between {min} and {max} characters"))
            }
            Check::Forbidden { pattern, message } => pattern
                .is_match(value)
                .then(|| format!("{name} {message}")),
            Check::EmailFormat(pattern) => (!pattern.is_match(value))
                .then(|| format!("{name} must be valid")),
            Check::WholeNumber => value
                .parse::<i64>()
                .is_err()
                .then(|| format!("{name} must be a whole number")),
            Check::Range { min, max } => value
                .parse::<i64>()
                .ok()
                .filter(|n| n < min || n > max)
                .map(|_| format!("{name} must be between {min} and {max}")),
        }
    }
}

/// Read-only mapping from field kind to its ordered checks
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: [Vec<Check>; FieldKind::COUNT],
}

impl RuleTable {
    /// Compile the rule table. Fails only on a malformed pattern.
    pub fn build() -> Result<Self, ConfigError> {
        let mut rules: [Vec<Check>; FieldKind::COUNT] = Default::default();
        for kind in FieldKind::ALL {
            rules[kind.index()] = Self::checks_for(kind)?;
        }
        Ok(Self { rules })
    }

    fn checks_for(kind: FieldKind) -> Result<Vec<Check>, ConfigError> {
        let checks = match kind {
            FieldKind::Username => vec![
                Check::NotEmpty,
                Check::Length {
                    min: MIN_USERNAME_LENGTH,
                    max: MAX_USERNAME_LENGTH,
                },
                forbidden(kind, USERNAME_FORBIDDEN, "cannot contain special characters")?,
            ],
            FieldKind::Email => vec![
                Check::NotEmpty,
                Check::Length {
                    min: MIN_EMAIL_LENGTH,
                    max: MAX_EMAIL_LENGTH,
                },
                Check::EmailFormat(compile(kind, EMAIL_FORMAT)?),
            ],
            FieldKind::Password => vec![
                Check::NotEmpty,
                Check::Length {
                    min: MIN_PASSWORD_LENGTH,
                    max: MAX_PASSWORD_LENGTH,
                },
            ],
            FieldKind::FirstName | FieldKind::LastName => vec![
                Check::Length {
                    min: 0,
                    max: MAX_NAME_LENGTH,
                },
                forbidden(
                    kind,
                    NAME_FORBIDDEN,
                    "cannot contain numbers or special characters",
                )?,
            ],
            FieldKind::Bio => vec![Check::Length {
                min: 0,
                max: MAX_BIO_LENGTH,
            }],
            FieldKind::Review => vec![Check::Length {
                min: 0,
                max: MAX_REVIEW_LENGTH,
            }],
            FieldKind::Rating => vec![
                Check::WholeNumber,
                Check::Range {
                    min: MIN_RATING,
                    max: MAX_RATING,
                },
            ],
        };
        Ok(checks)
    }

    /// The ordered checks for a field kind
    pub fn rules_for(&self, kind: FieldKind) -> &[Check] {
        &self.rules[kind.index()]
    }

    /// Run every check for `kind` against `value`, in declaration order
    pub fn validate_field(&self, value: &str, kind: FieldKind) -> Vec<ValidationIssue> {
        self.rules_for(kind)
            .iter()
            .filter_map(|check| check.evaluate(value, kind))
            .map(|message| ValidationIssue::new(kind, message))
            .collect()
    }

    /// Validate against a field kind given by name, as external flows supply it
    pub fn validate_named_field(
        &self,
        value: &str,
        kind_name: &str,
    ) -> Result<Vec<ValidationIssue>, ConfigError> {
        let kind = kind_name.parse::<FieldKind>()?;
        Ok(self.validate_field(value, kind))
    }
}

fn forbidden(
    kind: FieldKind,
    pattern: &str,
    message: &'static str,
) -> Result<Check, ConfigError> {
    Ok(Check::Forbidden {
        pattern: compile(kind, pattern)?,
        message,
    })
}

fn compile(kind: FieldKind, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        field: kind.name(),
        source,
    })
}
