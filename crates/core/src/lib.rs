//! # Sepsis Core
//!
//! Clinical scoring engine for sepsis risk assessment.
//!
//! This crate converts physiological and laboratory measurements into standardised severity
//! scores:
//! - SOFA: six organ-domain sub-scores, total, delta against baseline and the Sepsis-3 flag
//! - qSOFA: three bedside criteria
//! - NEWS2: seven weighted physiological parameters plus an age modifier, with risk banding
//! - Septic shock: four criteria combined by strict conjunction
//!
//! Every calculator is a pure function of its inputs. Threshold ladders are `const` tables and
//! nothing is cached between calls, so any number of threads may score concurrently.
//!
//! **No API concerns**: HTTP servers, persistence and presentation belong in `api-rest`,
//! `api-shared` or the CLI.

pub mod config;
pub mod constants;
pub mod error;
pub mod ladder;
pub mod news2;
pub mod qsofa;
pub mod septic_shock;
pub mod service;
pub mod sofa;
pub mod validation;
pub mod vitals;

pub use config::{validation_policy_from_env_value, EngineConfig, ValidationPolicy};
pub use error::{Calculator, ScoringError, ScoringResult};
pub use ladder::{Cut, Rung, ThresholdLadder};
pub use news2::{compute_news2, News2Inputs, News2Result, News2RiskBand, News2Scores};
pub use qsofa::{compute_qsofa, QsofaCriteria, QsofaInputs, QsofaResult};
pub use septic_shock::{
    assess_septic_shock, SepticShockCriteria, SepticShockInputs, SepticShockResult,
};
pub use service::{ScoringService, SnapshotResult};
pub use sofa::{compute_sofa, SofaInputs, SofaResult, SofaScores, VasopressorDoses};
pub use vitals::{ConsciousnessLevel, Spo2Scale, VitalSignSnapshot};
