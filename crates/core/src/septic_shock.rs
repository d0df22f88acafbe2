//! Sepsis-3 septic shock determination.
//!
//! Four boolean criteria combined by strict conjunction. There is no weighting: flipping any
//! single criterion to false makes shock absent.

use serde::{Deserialize, Serialize};

use crate::constants::{
    SEPTIC_SHOCK_ABSENT, SEPTIC_SHOCK_LACTATE_THRESHOLD, SEPTIC_SHOCK_MAP_TARGET,
    SEPTIC_SHOCK_MORTALITY_ABSENT, SEPTIC_SHOCK_MORTALITY_PRESENT, SEPTIC_SHOCK_PRESENT,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SepticShockInputs {
    pub map_mmhg: f64,
    /// Serum lactate in mmol/L.
    pub lactate_mmol_l: f64,
    pub on_vasopressors: bool,
    #[serde(alias = "adequate_volume_resus")]
    pub adequate_volume_resuscitation: bool,
    pub sepsis_present: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SepticShockCriteria {
    pub sepsis_present: bool,
    pub persistent_hypotension_on_vasopressors: bool,
    pub lactate_greater_than_2: bool,
    pub adequate_volume_resuscitation: bool,
}

impl SepticShockCriteria {
    fn named(&self) -> [(&'static str, bool); 4] {
        [
            ("sepsis_present", self.sepsis_present),
            (
                "persistent_hypotension_on_vasopressors",
                self.persistent_hypotension_on_vasopressors,
            ),
            ("lactate_greater_than_2", self.lactate_greater_than_2),
            (
                "adequate_volume_resuscitation",
                self.adequate_volume_resuscitation,
            ),
        ]
    }

    pub fn all_met(&self) -> bool {
        self.named().iter().all(|(_, met)| *met)
    }

    /// Names of the criteria that are not met, in declaration order.
    pub fn unmet(&self) -> Vec<&'static str> {
        self.named()
            .into_iter()
            .filter_map(|(name, met)| (!met).then_some(name))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SepticShockResult {
    pub criteria: SepticShockCriteria,
    pub septic_shock_present: bool,
    pub estimated_mortality_risk: String,
    pub interpretation: String,
}

impl SepticShockResult {
    pub fn unmet_criteria(&self) -> Vec<&'static str> {
        self.criteria.unmet()
    }
}

pub fn assess_septic_shock(inputs: &SepticShockInputs) -> SepticShockResult {
    let criteria = SepticShockCriteria {
        sepsis_present: inputs.sepsis_present,
        persistent_hypotension_on_vasopressors: inputs.on_vasopressors
            && inputs.map_mmhg >= SEPTIC_SHOCK_MAP_TARGET,
        lactate_greater_than_2: inputs.lactate_mmol_l > SEPTIC_SHOCK_LACTATE_THRESHOLD,
        adequate_volume_resuscitation: inputs.adequate_volume_resuscitation,
    };
    let septic_shock_present = criteria.all_met();

    tracing::debug!(
        septic_shock_present,
        unmet = ?criteria.unmet(),
        "assessed septic shock"
    );

    let (estimated_mortality_risk, interpretation) = if septic_shock_present {
        (SEPTIC_SHOCK_MORTALITY_PRESENT, SEPTIC_SHOCK_PRESENT)
    } else {
        (SEPTIC_SHOCK_MORTALITY_ABSENT, SEPTIC_SHOCK_ABSENT)
    };

    SepticShockResult {
        criteria,
        septic_shock_present,
        estimated_mortality_risk: estimated_mortality_risk.to_string(),
        interpretation: interpretation.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn shocked() -> SepticShockInputs {
        SepticShockInputs {
            map_mmhg: 68.0,
            lactate_mmol_l: 3.5,
            on_vasopressors: true,
            adequate_volume_resuscitation: true,
            sepsis_present: true,
        }
    }

    #[test]
    fn test_all_criteria_present_is_shock() {
        let result = assess_septic_shock(&shocked());
        assert!(result.criteria.all_met());
        assert!(result.septic_shock_present);
        assert_eq!(result.estimated_mortality_risk, ">40%");
        assert_eq!(
            result.interpretation,
            "SEPTIC SHOCK PRESENT - Profound circulatory and metabolic abnormalities. Hospital mortality >40%. Requires immediate intensive care."
        );
        assert!(result.unmet_criteria().is_empty());
    }

    #[test]
    fn test_each_criterion_is_necessary() {
        let mutations: [(&str, fn(&mut SepticShockInputs)); 5] = [
            ("sepsis_present", |i| i.sepsis_present = false),
            ("persistent_hypotension_on_vasopressors", |i| i.on_vasopressors = false),
            ("persistent_hypotension_on_vasopressors", |i| i.map_mmhg = 64.9),
            ("lactate_greater_than_2", |i| i.lactate_mmol_l = 2.0),
            ("adequate_volume_resuscitation", |i| {
                i.adequate_volume_resuscitation = false
            }),
        ];

        for (unmet, mutate) in mutations {
            let mut inputs = shocked();
            mutate(&mut inputs);
            let result = assess_septic_shock(&inputs);
            assert!(!result.septic_shock_present, "{unmet}");
            assert_eq!(result.unmet_criteria(), vec![unmet]);
            assert_eq!(result.estimated_mortality_risk, "Variable based on other factors");
            assert_eq!(result.interpretation, " SEPTIC SHOCK NOT PRESENT ");
        }
    }

    #[test]
    fn test_map_target_is_inclusive() {
        let mut inputs = shocked();
        inputs.map_mmhg = 65.0;
        assert!(assess_septic_shock(&inputs).criteria.persistent_hypotension_on_vasopressors);
    }

    #[test]
    fn test_inputs_accept_short_resuscitation_key() {
        let parsed: SepticShockInputs = serde_json::from_str(
            r#"{"map_mmhg":68,"lactate_mmol_l":3.5,"on_vasopressors":true,
                "adequate_volume_resus":true,"sepsis_present":true}"#,
        )
        .unwrap();
        assert_eq!(parsed, shocked());
    }

    proptest! {
        #[test]
        fn prop_shock_is_conjunction(
            map_mmhg in 0.0f64..300.0,
            lactate_mmol_l in 0.0f64..50.0,
            on_vasopressors in any::<bool>(),
            adequate_volume_resuscitation in any::<bool>(),
            sepsis_present in any::<bool>(),
        ) {
            let inputs = SepticShockInputs {
                map_mmhg,
                lactate_mmol_l,
                on_vasopressors,
                adequate_volume_resuscitation,
                sepsis_present,
            };
            let result = assess_septic_shock(&inputs);
            let expected = sepsis_present
                && on_vasopressors
                && map_mmhg >= 65.0
                && lactate_mmol_l > 2.0
                && adequate_volume_resuscitation;

            prop_assert_eq!(result.septic_shock_present, expected);
            prop_assert_eq!(result.unmet_criteria().is_empty(), expected);
            prop_assert_eq!(assess_septic_shock(&inputs), result);
        }
    }
}
