//! Bedside measurement types.
//!
//! [`VitalSignSnapshot`] carries every measurement any calculator may need. Each calculator only
//! requires a subset, and the `*_inputs` methods pick that subset out, reporting the fields that
//! are absent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{missing_input, Calculator, ScoringError, ScoringResult};
use crate::news2::News2Inputs;
use crate::qsofa::QsofaInputs;
use crate::septic_shock::SepticShockInputs;
use crate::sofa::{SofaInputs, VasopressorDoses};

/// AVPU level of consciousness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ConsciousnessLevel {
    Alert,
    Voice,
    Pain,
    Unresponsive,
}

impl ConsciousnessLevel {
    pub fn is_alert(&self) -> bool {
        matches!(self, ConsciousnessLevel::Alert)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsciousnessLevel::Alert => "Alert",
            ConsciousnessLevel::Voice => "Voice",
            ConsciousnessLevel::Pain => "Pain",
            ConsciousnessLevel::Unresponsive => "Unresponsive",
        }
    }
}

impl FromStr for ConsciousnessLevel {
    type Err = ScoringError;

    /// Accepts the full AVPU words or their initials, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alert" | "a" => Ok(ConsciousnessLevel::Alert),
            "voice" | "v" => Ok(ConsciousnessLevel::Voice),
            "pain" | "p" => Ok(ConsciousnessLevel::Pain),
            "unresponsive" | "u" => Ok(ConsciousnessLevel::Unresponsive),
            _ => Err(ScoringError::InvalidInput(format!(
                "unknown level of consciousness '{}' (expected Alert, Voice, Pain or Unresponsive)",
                s.trim()
            ))),
        }
    }
}

impl fmt::Display for ConsciousnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ConsciousnessLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ConsciousnessLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Which NEWS2 oxygen saturation scale applies. Scale 2 is for patients with hypercapnic
/// respiratory failure and is chosen by the caller, never inferred.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Spo2Scale {
    #[default]
    #[serde(rename = "scale_1", alias = "1")]
    Scale1,
    #[serde(rename = "scale_2", alias = "2")]
    Scale2,
}

impl FromStr for Spo2Scale {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "scale1" | "scale_1" => Ok(Spo2Scale::Scale1),
            "2" | "scale2" | "scale_2" => Ok(Spo2Scale::Scale2),
            other => Err(ScoringError::InvalidInput(format!(
                "unknown SpO2 scale '{other}' (expected 1 or 2)"
            ))),
        }
    }
}

/// Every measurement the engine understands, all optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct VitalSignSnapshot {
    pub respiratory_rate: Option<f64>,
    pub oxygen_saturation: Option<f64>,
    pub spo2_scale: Spo2Scale,
    pub supplemental_oxygen: bool,
    pub systolic_bp: Option<f64>,
    pub heart_rate: Option<f64>,
    pub temperature: Option<f64>,
    pub level_of_consciousness: Option<ConsciousnessLevel>,
    pub age: Option<u32>,
    pub gcs: Option<u8>,
    pub pao2_fio2: Option<f64>,
    pub platelets: Option<f64>,
    pub bilirubin: Option<f64>,
    pub creatinine: Option<f64>,
    pub map_mmhg: Option<f64>,
    pub respiratory_support: bool,
    #[serde(flatten)]
    pub vasopressors: VasopressorDoses,
    /// Overrides the vasopressor flag derived from the doses.
    pub on_vasopressors: Option<bool>,
    pub lactate_mmol_l: Option<f64>,
    pub urine_output_ml_day: Option<f64>,
    pub baseline_sofa: Option<i32>,
    pub suspected_infection: Option<bool>,
    pub adequate_volume_resuscitation: Option<bool>,
    pub sepsis_present: Option<bool>,
}

/// Convert a measurement that NEWS2 scores in whole units.
fn whole_number(field: &'static str, value: f64) -> ScoringResult<u32> {
    if !value.is_finite() {
        return Err(ScoringError::NotFinite { field });
    }
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(ScoringError::InvalidInput(format!(
            "{field} must be a non-negative whole number, got {value}"
        )));
    }
    Ok(value as u32)
}

impl VitalSignSnapshot {
    /// True when vasopressors are running, either asserted or implied by a non-zero dose.
    pub fn on_vasopressors(&self) -> bool {
        self.on_vasopressors
            .unwrap_or_else(|| !self.vasopressors.all_zero())
    }

    /// # Errors
    ///
    /// Returns [`ScoringError::MissingInput`] listing every absent SOFA measurement.
    pub fn sofa_inputs(&self) -> ScoringResult<SofaInputs> {
        let (
            Some(pao2_fio2),
            Some(platelets),
            Some(bilirubin),
            Some(map_mmhg),
            Some(gcs),
            Some(creatinine),
        ) = (
            self.pao2_fio2,
            self.platelets,
            self.bilirubin,
            self.map_mmhg,
            self.gcs,
            self.creatinine,
        )
        else {
            return Err(missing_input(
                Calculator::Sofa,
                &[
                    ("pao2_fio2", self.pao2_fio2.is_none()),
                    ("platelets", self.platelets.is_none()),
                    ("bilirubin", self.bilirubin.is_none()),
                    ("map_mmhg", self.map_mmhg.is_none()),
                    ("gcs", self.gcs.is_none()),
                    ("creatinine", self.creatinine.is_none()),
                ],
            ));
        };

        Ok(SofaInputs {
            pao2_fio2,
            platelets,
            bilirubin,
            map_mmhg,
            gcs,
            creatinine,
            respiratory_support: self.respiratory_support,
            vasopressors: self.vasopressors,
            urine_output_ml_day: self.urine_output_ml_day,
            baseline_sofa: self.baseline_sofa.unwrap_or(0),
        })
    }

    /// qSOFA reports its own missing inputs, so this never fails.
    pub fn qsofa_inputs(&self) -> QsofaInputs {
        QsofaInputs {
            respiratory_rate: self.respiratory_rate,
            systolic_bp: self.systolic_bp,
            gcs: self.gcs,
            suspected_infection: self.suspected_infection.unwrap_or(true),
        }
    }

    /// # Errors
    ///
    /// Returns [`ScoringError::MissingInput`] listing every absent NEWS2 measurement, or
    /// [`ScoringError::InvalidInput`] when a whole-unit measurement has a fractional part.
    pub fn news2_inputs(&self) -> ScoringResult<News2Inputs> {
        let (
            Some(respiratory_rate),
            Some(oxygen_saturation),
            Some(systolic_bp),
            Some(heart_rate),
            Some(level_of_consciousness),
            Some(temperature),
            Some(age),
        ) = (
            self.respiratory_rate,
            self.oxygen_saturation,
            self.systolic_bp,
            self.heart_rate,
            self.level_of_consciousness,
            self.temperature,
            self.age,
        )
        else {
            return Err(missing_input(
                Calculator::News2,
                &[
                    ("respiratory_rate", self.respiratory_rate.is_none()),
                    ("oxygen_saturation", self.oxygen_saturation.is_none()),
                    ("systolic_bp", self.systolic_bp.is_none()),
                    ("heart_rate", self.heart_rate.is_none()),
                    (
                        "level_of_consciousness",
                        self.level_of_consciousness.is_none(),
                    ),
                    ("temperature", self.temperature.is_none()),
                    ("age", self.age.is_none()),
                ],
            ));
        };

        Ok(News2Inputs {
            respiratory_rate: whole_number("respiratory_rate", respiratory_rate)?,
            oxygen_saturation: whole_number("oxygen_saturation", oxygen_saturation)?,
            spo2_scale: self.spo2_scale,
            supplemental_oxygen: self.supplemental_oxygen,
            systolic_bp: whole_number("systolic_bp", systolic_bp)?,
            heart_rate: whole_number("heart_rate", heart_rate)?,
            level_of_consciousness,
            temperature,
            age,
        })
    }

    /// # Errors
    ///
    /// Returns [`ScoringError::MissingInput`] listing every absent septic shock input.
    pub fn septic_shock_inputs(&self) -> ScoringResult<SepticShockInputs> {
        let (
            Some(map_mmhg),
            Some(lactate_mmol_l),
            Some(adequate_volume_resuscitation),
            Some(sepsis_present),
        ) = (
            self.map_mmhg,
            self.lactate_mmol_l,
            self.adequate_volume_resuscitation,
            self.sepsis_present,
        )
        else {
            return Err(missing_input(
                Calculator::SepticShock,
                &[
                    ("map_mmhg", self.map_mmhg.is_none()),
                    ("lactate_mmol_l", self.lactate_mmol_l.is_none()),
                    (
                        "adequate_volume_resuscitation",
                        self.adequate_volume_resuscitation.is_none(),
                    ),
                    ("sepsis_present", self.sepsis_present.is_none()),
                ],
            ));
        };

        Ok(SepticShockInputs {
            map_mmhg,
            lactate_mmol_l,
            on_vasopressors: self.on_vasopressors(),
            adequate_volume_resuscitation,
            sepsis_present,
        })
    }
}
