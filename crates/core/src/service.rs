//! Scoring service.
//!
//! [`ScoringService`] is the entry point used by the API and CLI crates. It applies the
//! configured [`ValidationPolicy`] and then delegates to the pure calculator functions.

use std::sync::Arc;

use serde::Serialize;

use crate::config::{EngineConfig, ValidationPolicy};
use crate::news2::{compute_news2, News2Inputs, News2Result};
use crate::qsofa::{self, compute_qsofa, QsofaInputs, QsofaResult};
use crate::septic_shock::{assess_septic_shock, SepticShockInputs, SepticShockResult};
use crate::sofa::{compute_sofa, SofaInputs, SofaResult};
use crate::validation;
use crate::vitals::VitalSignSnapshot;
use crate::{Calculator, ScoringResult};

/// The result of scoring a [`VitalSignSnapshot`] with one calculator.
///
/// Serializes as the calculator's own result body.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum SnapshotResult {
    Sofa(SofaResult),
    Qsofa(QsofaResult),
    News2(News2Result),
    SepticShock(SepticShockResult),
}

/// Pure scoring operations - no API concerns.
///
/// The service holds only immutable configuration, so clones are cheap and it can be shared
/// across threads and tasks without coordination.
#[derive(Clone, Debug, Default)]
pub struct ScoringService {
    cfg: Arc<EngineConfig>,
}

impl ScoringService {
    /// Creates a new instance of ScoringService.
    pub fn new(cfg: Arc<EngineConfig>) -> Self {
        Self { cfg }
    }

    pub fn validation(&self) -> ValidationPolicy {
        self.cfg.validation()
    }

    fn check(
        &self,
        calculator: Calculator,
        validate: impl FnOnce() -> ScoringResult<()>,
    ) -> ScoringResult<()> {
        if self.cfg.validation() == ValidationPolicy::Lenient {
            return Ok(());
        }
        validate().inspect_err(|e| {
            tracing::warn!(calculator = %calculator, error = %e, "rejected scoring input");
        })
    }

    /// Computes SOFA.
    ///
    /// # Errors
    ///
    /// Under [`ValidationPolicy::Strict`], returns an out-of-range or non-finite error for the
    /// first implausible measurement.
    pub fn sofa(&self, inputs: &SofaInputs) -> ScoringResult<SofaResult> {
        self.check(Calculator::Sofa, || validation::validate_sofa(inputs))?;
        Ok(compute_sofa(inputs))
    }

    /// Computes qSOFA.
    ///
    /// # Errors
    ///
    /// Returns a missing-input error when any of the three measurements is absent, even if a
    /// measurement that is present is out of range. Under [`ValidationPolicy::Strict`], complete
    /// inputs are then range checked.
    pub fn qsofa(&self, inputs: &QsofaInputs) -> ScoringResult<QsofaResult> {
        qsofa::require_measurements(inputs)?;
        self.check(Calculator::Qsofa, || validation::validate_qsofa(inputs))?;
        compute_qsofa(inputs)
    }

    /// Computes NEWS2.
    ///
    /// # Errors
    ///
    /// Under [`ValidationPolicy::Strict`], returns a range error for an implausible measurement.
    pub fn news2(&self, inputs: &News2Inputs) -> ScoringResult<News2Result> {
        self.check(Calculator::News2, || validation::validate_news2(inputs))?;
        Ok(compute_news2(inputs))
    }

    /// Assesses septic shock.
    ///
    /// # Errors
    ///
    /// Under [`ValidationPolicy::Strict`], returns a range error for an implausible MAP or
    /// lactate.
    pub fn septic_shock(&self, inputs: &SepticShockInputs) -> ScoringResult<SepticShockResult> {
        self.check(Calculator::SepticShock, || {
            validation::validate_septic_shock(inputs)
        })?;
        Ok(assess_septic_shock(inputs))
    }

    /// Computes SOFA from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns a missing-input error naming every absent SOFA measurement, then behaves as
    /// [`ScoringService::sofa`].
    pub fn sofa_from_snapshot(&self, snapshot: &VitalSignSnapshot) -> ScoringResult<SofaResult> {
        self.sofa(&snapshot.sofa_inputs()?)
    }

    pub fn qsofa_from_snapshot(&self, snapshot: &VitalSignSnapshot) -> ScoringResult<QsofaResult> {
        self.qsofa(&snapshot.qsofa_inputs())
    }

    pub fn news2_from_snapshot(&self, snapshot: &VitalSignSnapshot) -> ScoringResult<News2Result> {
        self.news2(&snapshot.news2_inputs()?)
    }

    pub fn septic_shock_from_snapshot(
        &self,
        snapshot: &VitalSignSnapshot,
    ) -> ScoringResult<SepticShockResult> {
        self.septic_shock(&snapshot.septic_shock_inputs()?)
    }

    /// Routes a snapshot to the named calculator.
    ///
    /// # Errors
    ///
    /// Returns whatever the chosen calculator returns for the measurements it needs.
    pub fn score_snapshot(
        &self,
        calculator: Calculator,
        snapshot: &VitalSignSnapshot,
    ) -> ScoringResult<SnapshotResult> {
        tracing::debug!(calculator = %calculator, "scoring snapshot");
        Ok(match calculator {
            Calculator::Sofa => SnapshotResult::Sofa(self.sofa_from_snapshot(snapshot)?),
            Calculator::Qsofa => SnapshotResult::Qsofa(self.qsofa_from_snapshot(snapshot)?),
            Calculator::News2 => SnapshotResult::News2(self.news2_from_snapshot(snapshot)?),
            Calculator::SepticShock => {
                SnapshotResult::SepticShock(self.septic_shock_from_snapshot(snapshot)?)
            }
        })
    }
}
