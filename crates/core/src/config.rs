//! Engine configuration.
//!
//! Configuration is resolved once at process startup and then passed into [`crate::ScoringService`].
//! The engine never reads environment variables while scoring, so results cannot change
//! mid-process and tests do not interfere with each other.

use std::fmt;
use std::str::FromStr;

use crate::{ScoringError, ScoringResult};

/// How inputs are checked before scoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ValidationPolicy {
    /// Reject non-finite and physiologically implausible values before scoring.
    #[default]
    Strict,
    /// Score whatever is supplied. Out-of-range values fall through the ladders.
    Lenient,
}

impl ValidationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationPolicy::Strict => "strict",
            ValidationPolicy::Lenient => "lenient",
        }
    }
}

impl fmt::Display for ValidationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationPolicy {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ValidationPolicy::Strict),
            "lenient" => Ok(ValidationPolicy::Lenient),
            other => Err(ScoringError::InvalidInput(format!(
                "unknown validation policy '{other}' (expected 'strict' or 'lenient')"
            ))),
        }
    }
}

/// Engine configuration resolved at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    validation: ValidationPolicy,
}

impl EngineConfig {
    pub fn new(validation: ValidationPolicy) -> Self {
        Self { validation }
    }

    pub fn validation(&self) -> ValidationPolicy {
        self.validation
    }
}

/// Parse the validation policy from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`ValidationPolicy::Strict`].
pub fn validation_policy_from_env_value(value: Option<String>) -> ScoringResult<ValidationPolicy> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<ValidationPolicy>()).transpose()?;

    Ok(parsed.unwrap_or_default())
}
