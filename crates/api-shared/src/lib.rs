//! # API Shared
//!
//! Shared wire types and services for the scoring APIs.
//!
//! Contains:
//! - Response envelopes that are not scoring results (`HealthRes`, `ErrorRes`,
//!   `QsofaInsufficientRes`)
//! - Shared services like `HealthService`
//!
//! Request and result bodies are the `sepsis-core` input and result types themselves, so the
//! JSON contract is defined in one place.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod health;

pub use health::HealthService;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
    pub validation: String,
}

/// Body returned when a scoring request is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
    /// The offending or absent fields, when known.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

impl From<&sepsis_core::ScoringError> for ErrorRes {
    fn from(err: &sepsis_core::ScoringError) -> Self {
        use sepsis_core::ScoringError;

        let fields = match err {
            ScoringError::MissingInput { fields, .. } => {
                fields.iter().map(|f| (*f).to_string()).collect()
            }
            ScoringError::OutOfRange { field, .. } | ScoringError::NotFinite { field } => {
                vec![(*field).to_string()]
            }
            ScoringError::InvalidInput(_) => Vec::new(),
        };

        Self {
            error: err.to_string(),
            fields,
        }
    }
}

/// qSOFA insufficient-input body: an explicit null score alongside the error text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QsofaInsufficientRes {
    pub qsofa_score: Option<u8>,
    pub error: String,
}

impl QsofaInsufficientRes {
    pub fn new(err: &sepsis_core::ScoringError) -> Self {
        Self {
            qsofa_score: None,
            error: err.to_string(),
        }
    }
}
