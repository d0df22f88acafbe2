//! quick SOFA (qSOFA) bedside screen.

use serde::{Deserialize, Serialize};

use crate::constants::{
    QSOFA_HIGH, QSOFA_INTERMEDIATE, QSOFA_LOW, QSOFA_NO_INFECTION, QSOFA_RECOMMEND_HIGH,
    QSOFA_RECOMMEND_INTERMEDIATE, QSOFA_RECOMMEND_LOW, QSOFA_RECOMMEND_NO_INFECTION,
};
use crate::error::{missing_input, Calculator, ScoringResult};

const TACHYPNOEA_THRESHOLD: f64 = 22.0;
const NORMAL_GCS: u8 = 15;
const HYPOTENSION_THRESHOLD: f64 = 100.0;

fn default_suspected_infection() -> bool {
    true
}

/// Inputs to [`compute_qsofa`]. The three measurements are optional on the wire so that an
/// absent value can be reported rather than guessed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct QsofaInputs {
    #[serde(default)]
    pub respiratory_rate: Option<f64>,
    #[serde(default)]
    pub systolic_bp: Option<f64>,
    #[serde(default)]
    pub gcs: Option<u8>,
    #[serde(default = "default_suspected_infection")]
    pub suspected_infection: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct QsofaCriteria {
    pub respiratory_rate_22_or_higher: bool,
    pub altered_mentation: bool,
    pub systolic_bp_100_or_lower: bool,
}

impl QsofaCriteria {
    /// Number of criteria met.
    pub fn count(&self) -> u8 {
        [
            self.respiratory_rate_22_or_higher,
            self.altered_mentation,
            self.systolic_bp_100_or_lower,
        ]
        .iter()
        .filter(|met| **met)
        .count() as u8
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct QsofaResult {
    pub criteria_met: QsofaCriteria,
    pub qsofa_score: u8,
    pub high_risk_for_poor_outcomes: bool,
    pub suspected_infection: bool,
    pub interpretation: String,
    pub recommendations: String,
}

pub fn qsofa_interpretation(score: u8, suspected_infection: bool) -> &'static str {
    if !suspected_infection {
        return QSOFA_NO_INFECTION;
    }
    match score {
        0 => QSOFA_LOW,
        1 => QSOFA_INTERMEDIATE,
        _ => QSOFA_HIGH,
    }
}

pub fn qsofa_recommendation(score: u8, suspected_infection: bool) -> &'static str {
    if !suspected_infection {
        return QSOFA_RECOMMEND_NO_INFECTION;
    }
    match score {
        0 => QSOFA_RECOMMEND_LOW,
        1 => QSOFA_RECOMMEND_INTERMEDIATE,
        _ => QSOFA_RECOMMEND_HIGH,
    }
}

/// The three measurements qSOFA needs, or a missing-input error naming every absent one.
pub(crate) fn require_measurements(inputs: &QsofaInputs) -> ScoringResult<(f64, f64, u8)> {
    match (inputs.respiratory_rate, inputs.systolic_bp, inputs.gcs) {
        (Some(rr), Some(sbp), Some(gcs)) => Ok((rr, sbp, gcs)),
        _ => Err(missing_input(
            Calculator::Qsofa,
            &[
                ("respiratory_rate", inputs.respiratory_rate.is_none()),
                ("systolic_bp", inputs.systolic_bp.is_none()),
                ("gcs", inputs.gcs.is_none()),
            ],
        )),
    }
}

/// Compute qSOFA.
///
/// # Errors
///
/// Returns [`crate::ScoringError::MissingInput`] naming every absent measurement if any of
/// respiratory rate, systolic blood pressure or GCS is missing. No score is produced in that
/// case.
pub fn compute_qsofa(inputs: &QsofaInputs) -> ScoringResult<QsofaResult> {
    let (respiratory_rate, systolic_bp, gcs) = require_measurements(inputs)?;

    let criteria_met = QsofaCriteria {
        respiratory_rate_22_or_higher: respiratory_rate >= TACHYPNOEA_THRESHOLD,
        altered_mentation: gcs < NORMAL_GCS,
        systolic_bp_100_or_lower: systolic_bp <= HYPOTENSION_THRESHOLD,
    };
    let qsofa_score = criteria_met.count();
    let high_risk_for_poor_outcomes = qsofa_score >= 2;

    tracing::debug!(
        score = qsofa_score,
        high_risk = high_risk_for_poor_outcomes,
        suspected_infection = inputs.suspected_infection,
        "computed qSOFA score"
    );

    Ok(QsofaResult {
        criteria_met,
        qsofa_score,
        high_risk_for_poor_outcomes,
        suspected_infection: inputs.suspected_infection,
        interpretation: qsofa_interpretation(qsofa_score, inputs.suspected_infection).to_string(),
        recommendations: qsofa_recommendation(qsofa_score, inputs.suspected_infection).to_string(),
    })
}
