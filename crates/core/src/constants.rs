//! Constants used throughout the scoring engine.
//!
//! Interpretation and recommendation strings are rendered verbatim by downstream presentation
//! layers, so they are kept here in one place. Changing any of them changes the external
//! contract.

/// Error text returned when a qSOFA input is absent.
pub const QSOFA_MISSING_INPUT: &str =
    "Missing one or more required inputs (respiratory rate, SBP, or GCS).";

// SOFA

/// SOFA interpretation for a total of zero.
pub const SOFA_NORMAL: &str = "Normal organ function - no signs of organ dysfunction";

/// SOFA interpretation for totals 1 to 6.
pub const SOFA_MILD_TO_MODERATE: &str = "Mild to moderate organ dysfunction";

/// SOFA interpretation for totals 7 to 12.
pub const SOFA_SEVERE: &str = "Severe organ dysfunction";

/// SOFA interpretation for totals above 12.
pub const SOFA_CRITICAL: &str = "Very severe organ dysfunction - critical condition";

/// Appended to the SOFA interpretation when the delta reaches the sepsis threshold.
pub const SOFA_SEPSIS_SUFFIX: &str = " - SEPSIS CRITERIA MET (acute increase ≥2 points)";

/// Minimum SOFA delta that meets Sepsis-3 criteria.
pub const SOFA_SEPSIS_DELTA: i32 = 2;

/// Intercept of the linear SOFA mortality proxy, in percent.
pub const SOFA_MORTALITY_BASE_PERCENT: u32 = 10;

/// Percent added to the SOFA mortality proxy per SOFA point.
pub const SOFA_MORTALITY_PER_POINT_PERCENT: u32 = 5;

/// Upper clamp of the SOFA mortality proxy, in percent.
pub const SOFA_MORTALITY_CAP_PERCENT: u32 = 90;

// qSOFA

pub const QSOFA_NO_INFECTION: &str = "qSOFA should be used in patients with suspected infection";
pub const QSOFA_LOW: &str = "Low risk - no qSOFA criteria met";
pub const QSOFA_INTERMEDIATE: &str = "Intermediate risk - one qSOFA criterion met, monitor closely";
pub const QSOFA_HIGH: &str =
    "HIGH RISK - qSOFA ≥2 suggests increased risk of poor outcomes (ICU stay, death)";

pub const QSOFA_RECOMMEND_NO_INFECTION: &str = "Assess for infection source first";
pub const QSOFA_RECOMMEND_LOW: &str = "Continue routine care with infection monitoring";
pub const QSOFA_RECOMMEND_INTERMEDIATE: &str = "Increase monitoring frequency, reassess regularly";
pub const QSOFA_RECOMMEND_HIGH: &str =
    "Consider ICU evaluation, escalate care, consider full SOFA scoring";

// NEWS2

pub const NEWS2_HIGH_RESPONSE: &str = "EMERGENCY RESPONSE: Clinical urgency high. Immediate senior clinical review and continuous monitoring required.";
pub const NEWS2_MEDIUM_RESPONSE: &str =
    "URGENT REVIEW: Review by a clinician/doctor competent in acute illness. Monitor every hour.";
pub const NEWS2_LOW_MEDIUM_RESPONSE: &str =
    "ROUTINE MONITORING:  Urgent Ward-based care. Monitor every 4-12 hours.";
pub const NEWS2_LOW_RESPONSE: &str =
    "ROUTINE MONITORING:  Ward-based care. Monitor every 4-12 hours.";

/// Points added when the patient is on supplemental oxygen.
pub const NEWS2_SUPPLEMENTAL_OXYGEN_POINTS: u8 = 2;

// Septic shock

pub const SEPTIC_SHOCK_MORTALITY_PRESENT: &str = ">40%";
pub const SEPTIC_SHOCK_MORTALITY_ABSENT: &str = "Variable based on other factors";
pub const SEPTIC_SHOCK_PRESENT: &str = "SEPTIC SHOCK PRESENT - Profound circulatory and metabolic abnormalities. Hospital mortality >40%. Requires immediate intensive care.";
pub const SEPTIC_SHOCK_ABSENT: &str = " SEPTIC SHOCK NOT PRESENT ";

/// MAP (mmHg) that must be sustained on vasopressors.
pub const SEPTIC_SHOCK_MAP_TARGET: f64 = 65.0;

/// Lactate (mmol/L) that must be exceeded.
pub const SEPTIC_SHOCK_LACTATE_THRESHOLD: f64 = 2.0;
