//! Sequential Organ Failure Assessment (SOFA).
//!
//! Six organ-domain sub-scorers, each bounded to 0..=4, plus the aggregator that produces the
//! total, the delta against a baseline, the Sepsis-3 flag and the interpretation text.

use serde::{Deserialize, Serialize};

use crate::constants::{
    SOFA_CRITICAL, SOFA_MILD_TO_MODERATE, SOFA_MORTALITY_BASE_PERCENT, SOFA_MORTALITY_CAP_PERCENT,
    SOFA_MORTALITY_PER_POINT_PERCENT, SOFA_NORMAL, SOFA_SEPSIS_DELTA, SOFA_SEPSIS_SUFFIX,
    SOFA_SEVERE,
};
use crate::ladder::{Cut, Rung, ThresholdLadder};

/// Platelets (×10³/µL); each band is closed on its lower end.
pub const COAGULATION_LADDER: ThresholdLadder = ThresholdLadder::new(
    &[
        Rung::new(Cut::AtLeast(150.0), 0),
        Rung::new(Cut::AtLeast(100.0), 1),
        Rung::new(Cut::AtLeast(50.0), 2),
        Rung::new(Cut::AtLeast(20.0), 3),
    ],
    4,
);

/// Bilirubin (mg/dL).
pub const LIVER_LADDER: ThresholdLadder = ThresholdLadder::new(
    &[
        Rung::new(Cut::Below(1.2), 0),
        Rung::new(Cut::AtMost(1.9), 1),
        Rung::new(Cut::AtMost(5.9), 2),
        Rung::new(Cut::AtMost(11.9), 3),
    ],
    4,
);

/// Creatinine (mg/dL).
pub const CREATININE_LADDER: ThresholdLadder = ThresholdLadder::new(
    &[
        Rung::new(Cut::AtLeast(5.0), 4),
        Rung::new(Cut::AtLeast(3.5), 3),
        Rung::new(Cut::AtLeast(2.0), 2),
        Rung::new(Cut::AtLeast(1.2), 1),
    ],
    0,
);

/// Urine output (mL/day).
pub const URINE_OUTPUT_LADDER: ThresholdLadder = ThresholdLadder::new(
    &[
        Rung::new(Cut::Below(200.0), 4),
        Rung::new(Cut::Below(500.0), 1),
    ],
    0,
);

/// MAP (mmHg) at or above which no cardiovascular point is given without vasopressors.
const MAP_NORMAL_THRESHOLD: f64 = 70.0;

/// Vasopressor infusion rates in mcg/kg/min. Absent drugs are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VasopressorDoses {
    #[serde(default, rename = "dopamine_dose")]
    pub dopamine: f64,
    #[serde(default, rename = "dobutamine_dose")]
    pub dobutamine: f64,
    #[serde(default, rename = "epinephrine_dose")]
    pub epinephrine: f64,
    #[serde(default, rename = "norepinephrine_dose")]
    pub norepinephrine: f64,
}

impl VasopressorDoses {
    /// True when every dose is exactly zero.
    pub fn all_zero(&self) -> bool {
        [
            self.dopamine,
            self.dobutamine,
            self.epinephrine,
            self.norepinephrine,
        ]
        .iter()
        .all(|dose| *dose == 0.0)
    }
}

/// Inputs to [`compute_sofa`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SofaInputs {
    /// PaO2/FiO2 ratio in mmHg.
    pub pao2_fio2: f64,
    /// Platelets in ×10³/µL (150 means 150 000/µL).
    pub platelets: f64,
    /// Bilirubin in mg/dL.
    pub bilirubin: f64,
    pub map_mmhg: f64,
    pub gcs: u8,
    /// Creatinine in mg/dL.
    pub creatinine: f64,
    #[serde(default)]
    pub respiratory_support: bool,
    #[serde(flatten)]
    pub vasopressors: VasopressorDoses,
    #[serde(default)]
    pub urine_output_ml_day: Option<f64>,
    #[serde(default)]
    pub baseline_sofa: i32,
}

/// Per-organ SOFA sub-scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SofaScores {
    pub respiration: u8,
    pub coagulation: u8,
    pub liver: u8,
    pub cardiovascular: u8,
    pub cns: u8,
    pub renal: u8,
}

impl SofaScores {
    /// Sub-scores in a fixed organ order.
    pub fn values(&self) -> [u8; 6] {
        [
            self.respiration,
            self.coagulation,
            self.liver,
            self.cardiovascular,
            self.cns,
            self.renal,
        ]
    }

    pub fn total(&self) -> u8 {
        self.values().iter().sum()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SofaResult {
    pub individual_scores: SofaScores,
    pub total_sofa: u8,
    pub baseline_sofa: i32,
    pub delta_sofa: i32,
    pub sepsis_criteria_met: bool,
    pub estimated_mortality_risk_percent: u32,
    pub interpretation: String,
}

/// Respiration sub-score from the PaO2/FiO2 ratio.
///
/// Scores 3 and 4 require respiratory support. Without support any ratio below 200 scores 2,
/// however low it is.
pub fn respiration_score(pao2_fio2: f64, respiratory_support: bool) -> u8 {
    match pao2_fio2 {
        r if r >= 400.0 => 0,
        r if r >= 300.0 => 1,
        r if r >= 200.0 => 2,
        r if r >= 100.0 && respiratory_support => 3,
        r if r < 100.0 && respiratory_support => 4,
        _ => 2,
    }
}

pub fn coagulation_score(platelets: f64) -> u8 {
    COAGULATION_LADDER.score(platelets)
}

pub fn liver_score(bilirubin: f64) -> u8 {
    LIVER_LADDER.score(bilirubin)
}

/// Cardiovascular sub-score.
///
/// Without vasopressors the score depends on MAP alone. With any vasopressor running the bands
/// are tested from least to most severe and the first match wins, so a regimen that satisfies
/// both the score-2 and score-3 conditions scores 2.
pub fn cardiovascular_score(map_mmhg: f64, doses: &VasopressorDoses) -> u8 {
    if doses.all_zero() {
        return if map_mmhg >= MAP_NORMAL_THRESHOLD { 0 } else { 1 };
    }

    let VasopressorDoses {
        dopamine,
        dobutamine,
        epinephrine,
        norepinephrine,
    } = *doses;

    if (dopamine > 0.0 && dopamine <= 5.0) || dobutamine > 0.0 {
        return 2;
    }
    if (dopamine > 5.0 && dopamine <= 15.0)
        || (epinephrine > 0.0 && epinephrine <= 0.1)
        || (norepinephrine > 0.0 && norepinephrine <= 0.1)
    {
        return 3;
    }
    if dopamine > 15.0 || epinephrine > 0.1 || norepinephrine > 0.1 {
        return 4;
    }

    // Only reachable with negative doses.
    1
}

/// Central nervous system sub-score from the Glasgow Coma Scale.
pub fn cns_score(gcs: u8) -> u8 {
    match gcs {
        15 => 0,
        13..=14 => 1,
        10..=12 => 2,
        6..=9 => 3,
        _ => 4,
    }
}

/// Renal sub-score: the creatinine score, raised to the urine-output score when urine output
/// is known.
pub fn renal_score(creatinine: f64, urine_output_ml_day: Option<f64>) -> u8 {
    let creatinine_score = CREATININE_LADDER.score(creatinine);
    match urine_output_ml_day {
        Some(urine) => creatinine_score.max(URINE_OUTPUT_LADDER.score(urine)),
        None => creatinine_score,
    }
}

/// Illustrative linear mortality estimate, not a calibrated clinical scale.
pub fn mortality_estimate_percent(total: u8) -> u32 {
    (SOFA_MORTALITY_BASE_PERCENT + SOFA_MORTALITY_PER_POINT_PERCENT * u32::from(total))
        .min(SOFA_MORTALITY_CAP_PERCENT)
}

pub fn sofa_interpretation(total: u8, sepsis_criteria_met: bool) -> String {
    let band = match total {
        0 => return SOFA_NORMAL.to_string(),
        1..=6 => SOFA_MILD_TO_MODERATE,
        7..=12 => SOFA_SEVERE,
        _ => SOFA_CRITICAL,
    };

    if sepsis_criteria_met {
        format!("{band}{SOFA_SEPSIS_SUFFIX}")
    } else {
        band.to_string()
    }
}

/// Score all six organ domains and aggregate them.
pub fn compute_sofa(inputs: &SofaInputs) -> SofaResult {
    let individual_scores = SofaScores {
        respiration: respiration_score(inputs.pao2_fio2, inputs.respiratory_support),
        coagulation: coagulation_score(inputs.platelets),
        liver: liver_score(inputs.bilirubin),
        cardiovascular: cardiovascular_score(inputs.map_mmhg, &inputs.vasopressors),
        cns: cns_score(inputs.gcs),
        renal: renal_score(inputs.creatinine, inputs.urine_output_ml_day),
    };

    let total_sofa = individual_scores.total();
    let delta_sofa = i32::from(total_sofa) - inputs.baseline_sofa;
    let sepsis_criteria_met = delta_sofa >= SOFA_SEPSIS_DELTA;

    tracing::debug!(
        total = total_sofa,
        delta = delta_sofa,
        sepsis_criteria_met,
        "computed SOFA score"
    );

    SofaResult {
        individual_scores,
        total_sofa,
        baseline_sofa: inputs.baseline_sofa,
        delta_sofa,
        sepsis_criteria_met,
        estimated_mortality_risk_percent: mortality_estimate_percent(total_sofa),
        interpretation: sofa_interpretation(total_sofa, sepsis_criteria_met),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reference_inputs() -> SofaInputs {
        SofaInputs {
            pao2_fio2: 250.0,
            platelets: 80.0,
            bilirubin: 3.2,
            map_mmhg: 65.0,
            gcs: 12,
            creatinine: 2.5,
            respiratory_support: true,
            vasopressors: VasopressorDoses {
                dopamine: 8.0,
                ..Default::default()
            },
            urine_output_ml_day: None,
            baseline_sofa: 0,
        }
    }

    fn healthy_inputs() -> SofaInputs {
        SofaInputs {
            pao2_fio2: 450.0,
            platelets: 250.0,
            bilirubin: 0.8,
            map_mmhg: 85.0,
            gcs: 15,
            creatinine: 0.9,
            respiratory_support: false,
            vasopressors: VasopressorDoses::default(),
            urine_output_ml_day: Some(1500.0),
            baseline_sofa: 0,
        }
    }

    #[test]
    fn test_respiration_ladder() {
        assert_eq!(respiration_score(400.0, false), 0);
        assert_eq!(respiration_score(399.9, false), 1);
        assert_eq!(respiration_score(300.0, false), 1);
        assert_eq!(respiration_score(299.0, false), 2);
        assert_eq!(respiration_score(200.0, true), 2);
        assert_eq!(respiration_score(150.0, true), 3);
        assert_eq!(respiration_score(100.0, true), 3);
        assert_eq!(respiration_score(99.0, true), 4);
    }

    #[test]
    fn test_respiration_caps_at_two_without_support() {
        assert_eq!(respiration_score(199.0, false), 2);
        assert_eq!(respiration_score(120.0, false), 2);
        assert_eq!(respiration_score(40.0, false), 2);
    }

    #[test]
    fn test_coagulation_ladder_boundaries() {
        assert_eq!(coagulation_score(150.0), 0);
        assert_eq!(coagulation_score(149.9), 1);
        assert_eq!(coagulation_score(100.0), 1);
        assert_eq!(coagulation_score(50.0), 2);
        assert_eq!(coagulation_score(20.0), 3);
        assert_eq!(coagulation_score(19.9), 4);
        assert_eq!(coagulation_score(-5.0), 4);
    }

    #[test]
    fn test_liver_ladder_boundaries() {
        assert_eq!(liver_score(1.1), 0);
        assert_eq!(liver_score(1.2), 1);
        assert_eq!(liver_score(1.9), 1);
        assert_eq!(liver_score(1.95), 2);
        assert_eq!(liver_score(5.9), 2);
        assert_eq!(liver_score(11.9), 3);
        assert_eq!(liver_score(12.0), 4);
    }

    #[test]
    fn test_cardiovascular_without_vasopressors_uses_map() {
        let none = VasopressorDoses::default();
        assert_eq!(cardiovascular_score(70.0, &none), 0);
        assert_eq!(cardiovascular_score(65.0, &none), 1);
    }

    #[test]
    fn test_cardiovascular_dose_bands() {
        let low_dopamine = VasopressorDoses {
            dopamine: 5.0,
            ..Default::default()
        };
        assert_eq!(cardiovascular_score(60.0, &low_dopamine), 2);

        let dobutamine = VasopressorDoses {
            dobutamine: 2.5,
            ..Default::default()
        };
        assert_eq!(cardiovascular_score(60.0, &dobutamine), 2);

        let mid_dopamine = VasopressorDoses {
            dopamine: 8.0,
            ..Default::default()
        };
        assert_eq!(cardiovascular_score(65.0, &mid_dopamine), 3);

        let low_norepinephrine = VasopressorDoses {
            norepinephrine: 0.1,
            ..Default::default()
        };
        assert_eq!(cardiovascular_score(60.0, &low_norepinephrine), 3);

        let high_epinephrine = VasopressorDoses {
            epinephrine: 0.2,
            ..Default::default()
        };
        assert_eq!(cardiovascular_score(60.0, &high_epinephrine), 4);

        let high_dopamine = VasopressorDoses {
            dopamine: 16.0,
            ..Default::default()
        };
        assert_eq!(cardiovascular_score(60.0, &high_dopamine), 4);
    }

    #[test]
    fn test_cardiovascular_first_matching_band_wins() {
        let compound = VasopressorDoses {
            dobutamine: 5.0,
            norepinephrine: 0.5,
            ..Default::default()
        };
        assert_eq!(cardiovascular_score(55.0, &compound), 2);

        let mixed = VasopressorDoses {
            dopamine: 3.0,
            epinephrine: 0.05,
            ..Default::default()
        };
        assert_eq!(cardiovascular_score(55.0, &mixed), 2);
    }

    #[test]
    fn test_cns_ladder() {
        assert_eq!(cns_score(15), 0);
        assert_eq!(cns_score(14), 1);
        assert_eq!(cns_score(13), 1);
        assert_eq!(cns_score(12), 2);
        assert_eq!(cns_score(10), 2);
        assert_eq!(cns_score(9), 3);
        assert_eq!(cns_score(6), 3);
        assert_eq!(cns_score(5), 4);
        assert_eq!(cns_score(3), 4);
    }

    #[test]
    fn test_renal_uses_worse_of_creatinine_and_urine() {
        assert_eq!(renal_score(1.0, None), 0);
        assert_eq!(renal_score(1.2, None), 1);
        assert_eq!(renal_score(3.5, None), 3);
        assert_eq!(renal_score(5.0, None), 4);
        assert_eq!(renal_score(1.0, Some(150.0)), 4);
        assert_eq!(renal_score(2.5, Some(300.0)), 2);
        assert_eq!(renal_score(0.9, Some(300.0)), 1);
        assert_eq!(renal_score(3.6, Some(600.0)), 3);
    }

    #[test]
    fn test_reference_patient() {
        let result = compute_sofa(&reference_inputs());

        assert_eq!(
            result.individual_scores,
            SofaScores {
                respiration: 2,
                coagulation: 2,
                liver: 2,
                cardiovascular: 3,
                cns: 2,
                renal: 2,
            }
        );
        assert_eq!(result.total_sofa, 13);
        assert_eq!(result.delta_sofa, 13);
        assert!(result.sepsis_criteria_met);
        assert_eq!(result.estimated_mortality_risk_percent, 75);
        assert_eq!(
            result.interpretation,
            "Very severe organ dysfunction - critical condition - SEPSIS CRITERIA MET (acute increase ≥2 points)"
        );
    }

    #[test]
    fn test_reference_patient_on_low_dose_dopamine() {
        let mut inputs = reference_inputs();
        inputs.vasopressors.dopamine = 4.0;
        let result = compute_sofa(&inputs);

        assert_eq!(result.individual_scores.cardiovascular, 2);
        assert_eq!(result.total_sofa, 12);
        assert_eq!(
            result.interpretation,
            "Severe organ dysfunction - SEPSIS CRITERIA MET (acute increase ≥2 points)"
        );
    }

    #[test]
    fn test_healthy_patient_is_normal() {
        let result = compute_sofa(&healthy_inputs());
        assert_eq!(result.total_sofa, 0);
        assert!(!result.sepsis_criteria_met);
        assert_eq!(result.estimated_mortality_risk_percent, 10);
        assert_eq!(
            result.interpretation,
            "Normal organ function - no signs of organ dysfunction"
        );
    }

    #[test]
    fn test_delta_against_baseline() {
        let mut inputs = reference_inputs();
        inputs.baseline_sofa = 12;
        let result = compute_sofa(&inputs);
        assert_eq!(result.delta_sofa, 1);
        assert!(!result.sepsis_criteria_met);
        assert_eq!(
            result.interpretation,
            "Very severe organ dysfunction - critical condition"
        );

        inputs.baseline_sofa = 11;
        assert!(compute_sofa(&inputs).sepsis_criteria_met);
    }

    #[test]
    fn test_mortality_estimate_is_capped() {
        assert_eq!(mortality_estimate_percent(0), 10);
        assert_eq!(mortality_estimate_percent(6), 40);
        assert_eq!(mortality_estimate_percent(16), 90);
        assert_eq!(mortality_estimate_percent(24), 90);
    }

    #[test]
    fn test_interpretation_bands() {
        assert_eq!(sofa_interpretation(1, false), "Mild to moderate organ dysfunction");
        assert_eq!(sofa_interpretation(6, false), "Mild to moderate organ dysfunction");
        assert_eq!(sofa_interpretation(7, false), "Severe organ dysfunction");
        assert_eq!(sofa_interpretation(12, false), "Severe organ dysfunction");
        assert_eq!(
            sofa_interpretation(13, false),
            "Very severe organ dysfunction - critical condition"
        );
    }

    #[test]
    fn test_result_serialises_with_stable_keys() {
        let value = serde_json::to_value(compute_sofa(&reference_inputs())).unwrap();
        assert_eq!(value["individual_scores"]["cardiovascular"], 3);
        assert_eq!(value["total_sofa"], 13);
        assert_eq!(value["baseline_sofa"], 0);
        assert_eq!(value["delta_sofa"], 13);
        assert_eq!(value["sepsis_criteria_met"], true);
        assert_eq!(value["estimated_mortality_risk_percent"], 75);
    }

    #[test]
    fn test_inputs_deserialise_with_defaults() {
        let inputs: SofaInputs = serde_json::from_str(
            r#"{"pao2_fio2":250,"platelets":80,"bilirubin":3.2,"map_mmhg":65,"gcs":12,
                "creatinine":2.5,"respiratory_support":true,"dopamine_dose":8}"#,
        )
        .unwrap();
        assert_eq!(inputs, reference_inputs());
    }

    proptest! {
        #[test]
        fn prop_sofa_bounds_and_sepsis_flag(
            pao2_fio2 in 0.0f64..800.0,
            platelets in 0.0f64..2000.0,
            bilirubin in 0.0f64..100.0,
            map_mmhg in 0.0f64..300.0,
            gcs in 3u8..=15,
            creatinine in 0.0f64..40.0,
            respiratory_support in any::<bool>(),
            dopamine in 0.0f64..50.0,
            norepinephrine in 0.0f64..5.0,
            urine in proptest::option::of(0.0f64..20000.0),
            baseline_sofa in 0i32..=24,
        ) {
            let inputs = SofaInputs {
                pao2_fio2,
                platelets,
                bilirubin,
                map_mmhg,
                gcs,
                creatinine,
                respiratory_support,
                vasopressors: VasopressorDoses {
                    dopamine,
                    norepinephrine,
                    ..Default::default()
                },
                urine_output_ml_day: urine,
                baseline_sofa,
            };
            let result = compute_sofa(&inputs);

            prop_assert!(result.individual_scores.values().iter().all(|s| *s <= 4));
            prop_assert!(result.total_sofa <= 24);
            prop_assert_eq!(result.total_sofa, result.individual_scores.total());
            prop_assert_eq!(result.delta_sofa, i32::from(result.total_sofa) - baseline_sofa);
            prop_assert_eq!(result.sepsis_criteria_met, result.delta_sofa >= 2);
            prop_assert!(result.estimated_mortality_risk_percent <= 90);
            prop_assert_eq!(compute_sofa(&inputs), result);
        }
    }
}
