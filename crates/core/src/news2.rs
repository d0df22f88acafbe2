//! National Early Warning Score 2 (NEWS2).
//!
//! Seven physiological parameters plus an age modifier, each contributing 0..=3 points. The
//! total and the presence of any single 3-point parameter select a risk band, and each band
//! carries a fixed recommended response.
//!
//! The SpO2 Scale 2 thresholds (`SPO2_SCALE_2_LOW_LADDER`, `SPO2_SCALE_2_ON_OXYGEN_LADDER`) are
//! taken from the Royal College of Physicians NEWS2 chart (2017). They are a clinical reference
//! choice and not derived from the other ladders in this module.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    NEWS2_HIGH_RESPONSE, NEWS2_LOW_MEDIUM_RESPONSE, NEWS2_LOW_RESPONSE, NEWS2_MEDIUM_RESPONSE,
    NEWS2_SUPPLEMENTAL_OXYGEN_POINTS,
};
use crate::ladder::{Cut, Rung, ThresholdLadder};
use crate::vitals::{ConsciousnessLevel, Spo2Scale};

pub const RESPIRATORY_RATE_LADDER: ThresholdLadder = ThresholdLadder::new(
    &[
        Rung::new(Cut::AtMost(8.0), 3),
        Rung::new(Cut::AtMost(11.0), 1),
        Rung::new(Cut::AtMost(20.0), 0),
        Rung::new(Cut::AtMost(24.0), 2),
    ],
    3,
);

pub const SPO2_SCALE_1_LADDER: ThresholdLadder = ThresholdLadder::new(
    &[
        Rung::new(Cut::AtMost(91.0), 3),
        Rung::new(Cut::AtMost(93.0), 2),
        Rung::new(Cut::AtMost(95.0), 1),
    ],
    0,
);

/// Scale 2 below the 88-92% target range, per the RCP NEWS2 chart (2017). Scoring above the
/// target depends on oxygen use and is handled in [`spo2_scale_2_score`].
pub const SPO2_SCALE_2_LOW_LADDER: ThresholdLadder = ThresholdLadder::new(
    &[
        Rung::new(Cut::AtMost(83.0), 3),
        Rung::new(Cut::AtMost(85.0), 2),
        Rung::new(Cut::AtMost(87.0), 1),
    ],
    0,
);

/// Scale 2 at or above 93% while on supplemental oxygen.
pub const SPO2_SCALE_2_ON_OXYGEN_LADDER: ThresholdLadder = ThresholdLadder::new(
    &[
        Rung::new(Cut::AtMost(94.0), 1),
        Rung::new(Cut::AtMost(96.0), 2),
    ],
    3,
);

pub const SYSTOLIC_BP_LADDER: ThresholdLadder = ThresholdLadder::new(
    &[
        Rung::new(Cut::AtMost(90.0), 3),
        Rung::new(Cut::AtMost(100.0), 2),
        Rung::new(Cut::AtMost(110.0), 1),
        Rung::new(Cut::AtMost(219.0), 0),
    ],
    3,
);

pub const HEART_RATE_LADDER: ThresholdLadder = ThresholdLadder::new(
    &[
        Rung::new(Cut::AtMost(40.0), 3),
        Rung::new(Cut::AtMost(50.0), 1),
        Rung::new(Cut::AtMost(90.0), 0),
        Rung::new(Cut::AtMost(110.0), 1),
        Rung::new(Cut::AtMost(130.0), 2),
    ],
    3,
);

/// Temperature in °C.
pub const TEMPERATURE_LADDER: ThresholdLadder = ThresholdLadder::new(
    &[
        Rung::new(Cut::AtMost(35.0), 3),
        Rung::new(Cut::AtMost(36.0), 1),
        Rung::new(Cut::AtMost(38.0), 0),
        Rung::new(Cut::AtMost(39.0), 1),
    ],
    2,
);

/// Age in whole years.
pub const AGE_LADDER: ThresholdLadder = ThresholdLadder::new(
    &[
        Rung::new(Cut::Below(40.0), 0),
        Rung::new(Cut::AtMost(65.0), 1),
        Rung::new(Cut::AtMost(79.0), 2),
    ],
    3,
);

/// Lower edge of the Scale 2 target range that scores zero regardless of oxygen.
const SPO2_SCALE_2_TARGET_MAX: f64 = 92.0;

/// Inputs to [`compute_news2`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct News2Inputs {
    pub respiratory_rate: u32,
    /// Oxygen saturation in percent, read against `spo2_scale`.
    pub oxygen_saturation: u32,
    #[serde(default)]
    pub spo2_scale: Spo2Scale,
    #[serde(default)]
    pub supplemental_oxygen: bool,
    pub systolic_bp: u32,
    pub heart_rate: u32,
    pub level_of_consciousness: ConsciousnessLevel,
    pub temperature: f64,
    pub age: u32,
}

/// Per-parameter NEWS2 points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct News2Scores {
    pub respiratory_rate: u8,
    pub oxygen_saturation: u8,
    pub supplemental_oxygen: u8,
    pub systolic_bp: u8,
    pub heart_rate: u8,
    pub level_of_consciousness: u8,
    pub temperature: u8,
    pub age: u8,
}

impl News2Scores {
    pub fn values(&self) -> [u8; 8] {
        [
            self.respiratory_rate,
            self.oxygen_saturation,
            self.supplemental_oxygen,
            self.systolic_bp,
            self.heart_rate,
            self.level_of_consciousness,
            self.temperature,
            self.age,
        ]
    }

    pub fn total(&self) -> u32 {
        self.values().iter().map(|points| u32::from(*points)).sum()
    }

    /// True when any single parameter scored exactly 3.
    pub fn has_red_score(&self) -> bool {
        self.values().contains(&3)
    }
}

/// NEWS2 clinical risk band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum News2RiskBand {
    Low,
    #[serde(rename = "Low-Medium")]
    LowMedium,
    Medium,
    High,
}

impl News2RiskBand {
    /// Band for a total, escalated to Low-Medium below 5 when any parameter scored 3.
    pub fn classify(total: u32, has_red_score: bool) -> Self {
        if total >= 7 {
            News2RiskBand::High
        } else if total >= 5 {
            News2RiskBand::Medium
        } else if has_red_score {
            News2RiskBand::LowMedium
        } else {
            News2RiskBand::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            News2RiskBand::Low => "Low",
            News2RiskBand::LowMedium => "Low-Medium",
            News2RiskBand::Medium => "Medium",
            News2RiskBand::High => "High",
        }
    }

    /// Recommended clinical response, rendered verbatim by callers.
    pub fn recommended_response(&self) -> &'static str {
        match self {
            News2RiskBand::High => NEWS2_HIGH_RESPONSE,
            News2RiskBand::Medium => NEWS2_MEDIUM_RESPONSE,
            News2RiskBand::LowMedium => NEWS2_LOW_MEDIUM_RESPONSE,
            News2RiskBand::Low => NEWS2_LOW_RESPONSE,
        }
    }

    pub fn monitoring_interval(&self) -> &'static str {
        match self {
            News2RiskBand::High => "Continuous",
            News2RiskBand::Medium => "Hourly",
            News2RiskBand::LowMedium | News2RiskBand::Low => "Every 4-12 hours",
        }
    }
}

impl fmt::Display for News2RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct News2Result {
    pub individual_scores: News2Scores,
    pub total_score: u32,
    pub risk_band: News2RiskBand,
    pub interpretation: String,
    pub monitoring_interval: String,
}

/// SpO2 points on Scale 2, for patients with hypercapnic respiratory failure.
///
/// Below 93% the scale ignores oxygen use. From 93% upwards a patient on air scores 0 while a
/// patient on oxygen is penalised for over-oxygenation.
pub fn spo2_scale_2_score(saturation: u32, supplemental_oxygen: bool) -> u8 {
    let saturation = f64::from(saturation);
    if saturation <= SPO2_SCALE_2_TARGET_MAX || !supplemental_oxygen {
        SPO2_SCALE_2_LOW_LADDER.score(saturation)
    } else {
        SPO2_SCALE_2_ON_OXYGEN_LADDER.score(saturation)
    }
}

pub fn oxygen_saturation_score(saturation: u32, scale: Spo2Scale, supplemental_oxygen: bool) -> u8 {
    match scale {
        Spo2Scale::Scale1 => SPO2_SCALE_1_LADDER.score(f64::from(saturation)),
        Spo2Scale::Scale2 => spo2_scale_2_score(saturation, supplemental_oxygen),
    }
}

pub fn consciousness_score(level: ConsciousnessLevel) -> u8 {
    if level.is_alert() {
        0
    } else {
        3
    }
}

/// Score every parameter, sum them and band the total.
pub fn compute_news2(inputs: &News2Inputs) -> News2Result {
    let individual_scores = News2Scores {
        respiratory_rate: RESPIRATORY_RATE_LADDER.score(f64::from(inputs.respiratory_rate)),
        oxygen_saturation: oxygen_saturation_score(
            inputs.oxygen_saturation,
            inputs.spo2_scale,
            inputs.supplemental_oxygen,
        ),
        supplemental_oxygen: if inputs.supplemental_oxygen {
            NEWS2_SUPPLEMENTAL_OXYGEN_POINTS
        } else {
            0
        },
        systolic_bp: SYSTOLIC_BP_LADDER.score(f64::from(inputs.systolic_bp)),
        heart_rate: HEART_RATE_LADDER.score(f64::from(inputs.heart_rate)),
        level_of_consciousness: consciousness_score(inputs.level_of_consciousness),
        temperature: TEMPERATURE_LADDER.score(inputs.temperature),
        age: AGE_LADDER.score(f64::from(inputs.age)),
    };

    let total_score = individual_scores.total();
    let risk_band = News2RiskBand::classify(total_score, individual_scores.has_red_score());

    tracing::debug!(total = total_score, band = %risk_band, "computed NEWS2 score");

    News2Result {
        individual_scores,
        total_score,
        risk_band,
        interpretation: risk_band.recommended_response().to_string(),
        monitoring_interval: risk_band.monitoring_interval().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn well_young_adult() -> News2Inputs {
        News2Inputs {
            respiratory_rate: 16,
            oxygen_saturation: 98,
            spo2_scale: Spo2Scale::Scale1,
            supplemental_oxygen: false,
            systolic_bp: 120,
            heart_rate: 70,
            level_of_consciousness: ConsciousnessLevel::Alert,
            temperature: 37.0,
            age: 30,
        }
    }

    #[test]
    fn test_well_patient_is_low() {
        let result = compute_news2(&well_young_adult());
        assert_eq!(result.total_score, 0);
        assert_eq!(result.risk_band, News2RiskBand::Low);
        assert_eq!(
            result.interpretation,
            "ROUTINE MONITORING:  Ward-based care. Monitor every 4-12 hours."
        );
        assert_eq!(result.monitoring_interval, "Every 4-12 hours");
    }

    #[test]
    fn test_deteriorating_patient_is_high() {
        let inputs = News2Inputs {
            respiratory_rate: 26,
            oxygen_saturation: 90,
            spo2_scale: Spo2Scale::Scale1,
            supplemental_oxygen: true,
            systolic_bp: 88,
            heart_rate: 135,
            level_of_consciousness: ConsciousnessLevel::Alert,
            temperature: 39.2,
            age: 30,
        };
        let result = compute_news2(&inputs);

        assert_eq!(
            result.individual_scores,
            News2Scores {
                respiratory_rate: 3,
                oxygen_saturation: 3,
                supplemental_oxygen: 2,
                systolic_bp: 3,
                heart_rate: 3,
                level_of_consciousness: 0,
                temperature: 2,
                age: 0,
            }
        );
        assert_eq!(result.total_score, 16);
        assert_eq!(result.risk_band, News2RiskBand::High);
        assert_eq!(
            result.interpretation,
            "EMERGENCY RESPONSE: Clinical urgency high. Immediate senior clinical review and continuous monitoring required."
        );
        assert_eq!(result.monitoring_interval, "Continuous");
    }

    #[test]
    fn test_single_red_score_is_low_medium() {
        let mut inputs = well_young_adult();
        inputs.level_of_consciousness = ConsciousnessLevel::Voice;
        let result = compute_news2(&inputs);

        assert_eq!(result.total_score, 3);
        assert_eq!(result.risk_band, News2RiskBand::LowMedium);
        assert_eq!(
            result.interpretation,
            "ROUTINE MONITORING:  Urgent Ward-based care. Monitor every 4-12 hours."
        );
    }

    #[test]
    fn test_age_of_eighty_counts_as_red_score() {
        let mut inputs = well_young_adult();
        inputs.age = 80;
        assert_eq!(compute_news2(&inputs).risk_band, News2RiskBand::LowMedium);
    }

    #[test]
    fn test_medium_band() {
        let mut inputs = well_young_adult();
        inputs.supplemental_oxygen = true;
        inputs.heart_rate = 115;
        inputs.age = 50;
        let result = compute_news2(&inputs);

        assert_eq!(result.total_score, 5);
        assert_eq!(result.risk_band, News2RiskBand::Medium);
        assert_eq!(
            result.interpretation,
            "URGENT REVIEW: Review by a clinician/doctor competent in acute illness. Monitor every hour."
        );
        assert_eq!(result.monitoring_interval, "Hourly");
    }

    #[test]
    fn test_consciousness_collapses_to_alert_or_not() {
        assert_eq!(consciousness_score(ConsciousnessLevel::Alert), 0);
        assert_eq!(consciousness_score(ConsciousnessLevel::Voice), 3);
        assert_eq!(consciousness_score(ConsciousnessLevel::Pain), 3);
        assert_eq!(consciousness_score(ConsciousnessLevel::Unresponsive), 3);
    }

    #[test]
    fn test_respiratory_rate_ladder() {
        let cases = [(8, 3), (9, 1), (11, 1), (12, 0), (20, 0), (21, 2), (24, 2), (25, 3), (35, 3)];
        for (rate, expected) in cases {
            assert_eq!(RESPIRATORY_RATE_LADDER.score(f64::from(rate)), expected, "rr {rate}");
        }
    }

    #[test]
    fn test_heart_rate_ladder() {
        let cases = [(40, 3), (41, 1), (50, 1), (51, 0), (90, 0), (91, 1), (110, 1), (111, 2), (130, 2), (131, 3)];
        for (rate, expected) in cases {
            assert_eq!(HEART_RATE_LADDER.score(f64::from(rate)), expected, "hr {rate}");
        }
    }

    #[test]
    fn test_systolic_bp_ladder() {
        let cases = [(90, 3), (91, 2), (100, 2), (101, 1), (110, 1), (111, 0), (219, 0), (220, 3)];
        for (sbp, expected) in cases {
            assert_eq!(SYSTOLIC_BP_LADDER.score(f64::from(sbp)), expected, "sbp {sbp}");
        }
    }

    #[test]
    fn test_temperature_ladder() {
        let cases = [(35.0, 3), (35.1, 1), (36.0, 1), (36.1, 0), (38.0, 0), (38.1, 1), (39.0, 1), (39.1, 2)];
        for (temperature, expected) in cases {
            assert_eq!(TEMPERATURE_LADDER.score(temperature), expected, "temp {temperature}");
        }
    }

    #[test]
    fn test_age_ladder() {
        let cases = [(39, 0), (40, 1), (65, 1), (66, 2), (79, 2), (80, 3)];
        for (age, expected) in cases {
            assert_eq!(AGE_LADDER.score(f64::from(age)), expected, "age {age}");
        }
    }

    #[test]
    fn test_spo2_scale_1() {
        let cases = [(96, 0), (95, 1), (94, 1), (93, 2), (92, 2), (91, 3)];
        for (saturation, expected) in cases {
            assert_eq!(
                oxygen_saturation_score(saturation, Spo2Scale::Scale1, false),
                expected,
                "spo2 {saturation}"
            );
        }
    }

    #[test]
    fn test_spo2_scale_2_on_air() {
        let cases = [(83, 3), (84, 2), (85, 2), (86, 1), (87, 1), (88, 0), (92, 0), (93, 0), (99, 0)];
        for (saturation, expected) in cases {
            assert_eq!(spo2_scale_2_score(saturation, false), expected, "spo2 {saturation}");
        }
    }

    #[test]
    fn test_spo2_scale_2_on_oxygen() {
        let cases = [(85, 2), (88, 0), (92, 0), (93, 1), (94, 1), (95, 2), (96, 2), (97, 3)];
        for (saturation, expected) in cases {
            assert_eq!(spo2_scale_2_score(saturation, true), expected, "spo2 {saturation}");
        }
    }

    #[test]
    fn test_risk_band_serialises_with_display_names() {
        assert_eq!(
            serde_json::to_value(News2RiskBand::LowMedium).unwrap(),
            serde_json::json!("Low-Medium")
        );
        assert_eq!(News2RiskBand::High.to_string(), "High");
    }

    #[test]
    fn test_inputs_deserialise_with_defaults() {
        let parsed: News2Inputs = serde_json::from_str(
            r#"{"respiratory_rate":16,"oxygen_saturation":98,"systolic_bp":120,
                "heart_rate":70,"level_of_consciousness":"alert","temperature":37.0,"age":30}"#,
        )
        .unwrap();
        assert_eq!(parsed, well_young_adult());
    }

    fn arb_consciousness() -> impl Strategy<Value = ConsciousnessLevel> {
        prop_oneof![
            Just(ConsciousnessLevel::Alert),
            Just(ConsciousnessLevel::Voice),
            Just(ConsciousnessLevel::Pain),
            Just(ConsciousnessLevel::Unresponsive),
        ]
    }

    fn arb_scale() -> impl Strategy<Value = Spo2Scale> {
        prop_oneof![Just(Spo2Scale::Scale1), Just(Spo2Scale::Scale2)]
    }

    proptest! {
        #[test]
        fn prop_banding_follows_total_and_red_scores(
            respiratory_rate in 0u32..=100,
            oxygen_saturation in 0u32..=100,
            spo2_scale in arb_scale(),
            supplemental_oxygen in any::<bool>(),
            systolic_bp in 0u32..=350,
            heart_rate in 0u32..=350,
            level_of_consciousness in arb_consciousness(),
            temperature in 20.0f64..45.0,
            age in 0u32..=130,
        ) {
            let inputs = News2Inputs {
                respiratory_rate,
                oxygen_saturation,
                spo2_scale,
                supplemental_oxygen,
                systolic_bp,
                heart_rate,
                level_of_consciousness,
                temperature,
                age,
            };
            let result = compute_news2(&inputs);
            let total = result.total_score;
            let red = result.individual_scores.has_red_score();

            prop_assert!(result.individual_scores.values().iter().all(|p| *p <= 3));
            prop_assert_eq!(total, result.individual_scores.total());
            prop_assert_eq!(result.risk_band == News2RiskBand::High, total >= 7);
            prop_assert_eq!(result.risk_band == News2RiskBand::Medium, (5..7).contains(&total));
            prop_assert_eq!(result.risk_band == News2RiskBand::LowMedium, total < 5 && red);
            prop_assert_eq!(result.risk_band == News2RiskBand::Low, total < 5 && !red);
            prop_assert_eq!(compute_news2(&inputs), result);
        }
    }
}
