//! Input range validation.
//!
//! The calculators themselves accept any number and let it fall through their ladders, so a
//! negative platelet count silently scores as the most severe band. The checks here run before
//! scoring under [`crate::ValidationPolicy::Strict`] and reject values outside a physiologically
//! plausible range instead.

use crate::news2::News2Inputs;
use crate::qsofa::QsofaInputs;
use crate::septic_shock::SepticShockInputs;
use crate::sofa::SofaInputs;
use crate::{ScoringError, ScoringResult};

/// Inclusive accepted range for one measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bound {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

impl Bound {
    pub const fn new(field: &'static str, min: f64, max: f64) -> Self {
        Self { field, min, max }
    }

    /// Validates that `value` is finite and within the bound.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::NotFinite`] for NaN or infinities and
    /// [`ScoringError::OutOfRange`] when the value lies outside `min..=max`.
    pub fn check(&self, value: f64) -> ScoringResult<()> {
        if !value.is_finite() {
            return Err(ScoringError::NotFinite { field: self.field });
        }
        if value < self.min || value > self.max {
            return Err(ScoringError::OutOfRange {
                field: self.field,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

pub const PAO2_FIO2: Bound = Bound::new("pao2_fio2", 0.0, 800.0);
pub const PLATELETS: Bound = Bound::new("platelets", 0.0, 2000.0);
pub const BILIRUBIN: Bound = Bound::new("bilirubin", 0.0, 100.0);
pub const MAP_MMHG: Bound = Bound::new("map_mmhg", 0.0, 300.0);
pub const GCS: Bound = Bound::new("gcs", 3.0, 15.0);
pub const CREATININE: Bound = Bound::new("creatinine", 0.0, 40.0);
pub const DOPAMINE: Bound = Bound::new("dopamine_dose", 0.0, 50.0);
pub const DOBUTAMINE: Bound = Bound::new("dobutamine_dose", 0.0, 50.0);
pub const EPINEPHRINE: Bound = Bound::new("epinephrine_dose", 0.0, 5.0);
pub const NOREPINEPHRINE: Bound = Bound::new("norepinephrine_dose", 0.0, 5.0);
pub const URINE_OUTPUT: Bound = Bound::new("urine_output_ml_day", 0.0, 20_000.0);
pub const BASELINE_SOFA: Bound = Bound::new("baseline_sofa", 0.0, 24.0);
pub const RESPIRATORY_RATE: Bound = Bound::new("respiratory_rate", 0.0, 100.0);
pub const SYSTOLIC_BP: Bound = Bound::new("systolic_bp", 0.0, 350.0);
pub const HEART_RATE: Bound = Bound::new("heart_rate", 0.0, 350.0);
pub const OXYGEN_SATURATION: Bound = Bound::new("oxygen_saturation", 0.0, 100.0);
pub const TEMPERATURE: Bound = Bound::new("temperature", 20.0, 45.0);
pub const AGE: Bound = Bound::new("age", 0.0, 130.0);
pub const LACTATE: Bound = Bound::new("lactate_mmol_l", 0.0, 50.0);

/// Validates every SOFA measurement, reporting the first violation.
pub fn validate_sofa(inputs: &SofaInputs) -> ScoringResult<()> {
    PAO2_FIO2.check(inputs.pao2_fio2)?;
    PLATELETS.check(inputs.platelets)?;
    BILIRUBIN.check(inputs.bilirubin)?;
    MAP_MMHG.check(inputs.map_mmhg)?;
    GCS.check(f64::from(inputs.gcs))?;
    CREATININE.check(inputs.creatinine)?;
    DOPAMINE.check(inputs.vasopressors.dopamine)?;
    DOBUTAMINE.check(inputs.vasopressors.dobutamine)?;
    EPINEPHRINE.check(inputs.vasopressors.epinephrine)?;
    NOREPINEPHRINE.check(inputs.vasopressors.norepinephrine)?;
    if let Some(urine) = inputs.urine_output_ml_day {
        URINE_OUTPUT.check(urine)?;
    }
    BASELINE_SOFA.check(f64::from(inputs.baseline_sofa))
}

/// Validates the qSOFA measurements that are present. Absence is reported by the calculator.
pub fn validate_qsofa(inputs: &QsofaInputs) -> ScoringResult<()> {
    if let Some(rr) = inputs.respiratory_rate {
        RESPIRATORY_RATE.check(rr)?;
    }
    if let Some(sbp) = inputs.systolic_bp {
        SYSTOLIC_BP.check(sbp)?;
    }
    if let Some(gcs) = inputs.gcs {
        GCS.check(f64::from(gcs))?;
    }
    Ok(())
}

pub fn validate_news2(inputs: &News2Inputs) -> ScoringResult<()> {
    RESPIRATORY_RATE.check(f64::from(inputs.respiratory_rate))?;
    OXYGEN_SATURATION.check(f64::from(inputs.oxygen_saturation))?;
    SYSTOLIC_BP.check(f64::from(inputs.systolic_bp))?;
    HEART_RATE.check(f64::from(inputs.heart_rate))?;
    TEMPERATURE.check(inputs.temperature)?;
    AGE.check(f64::from(inputs.age))
}

pub fn validate_septic_shock(inputs: &SepticShockInputs) -> ScoringResult<()> {
    MAP_MMHG.check(inputs.map_mmhg)?;
    LACTATE.check(inputs.lactate_mmol_l)
}
