use std::fmt;
use std::str::FromStr;

/// The calculator an error was raised by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Calculator {
    Sofa,
    Qsofa,
    News2,
    SepticShock,
}

impl fmt::Display for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Calculator::Sofa => "SOFA",
            Calculator::Qsofa => "qSOFA",
            Calculator::News2 => "NEWS2",
            Calculator::SepticShock => "septic shock",
        };
        f.write_str(name)
    }
}

impl FromStr for Calculator {
    type Err = ScoringError;

    /// Parses the route and CLI names: `sofa`, `qsofa`, `news2`, `septic-shock`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sofa" => Ok(Calculator::Sofa),
            "qsofa" => Ok(Calculator::Qsofa),
            "news2" => Ok(Calculator::News2),
            "septic-shock" | "septic_shock" => Ok(Calculator::SepticShock),
            other => Err(ScoringError::InvalidInput(format!(
                "unknown calculator '{other}' (expected sofa, qsofa, news2 or septic-shock)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("{}", missing_input_message(.calculator, .fields))]
    MissingInput {
        calculator: Calculator,
        fields: Vec<&'static str>,
    },
    #[error("{field} value {value} is outside the accepted range {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

fn missing_input_message(calculator: &Calculator, fields: &[&'static str]) -> String {
    match calculator {
        Calculator::Qsofa => crate::constants::QSOFA_MISSING_INPUT.to_string(),
        other => format!("missing required inputs for {}: {}", other, fields.join(", ")),
    }
}

/// Build a [`ScoringError::MissingInput`] from `(field, is_missing)` pairs, keeping their order.
pub(crate) fn missing_input(calculator: Calculator, checks: &[(&'static str, bool)]) -> ScoringError {
    ScoringError::MissingInput {
        calculator,
        fields: checks
            .iter()
            .filter_map(|(name, missing)| missing.then_some(*name))
            .collect(),
    }
}

pub type ScoringResult<T> = std::result::Result<T, ScoringError>;
