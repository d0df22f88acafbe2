use crate::HealthRes;

/// Simple health service that can be used by the REST API and the CLI
///
/// This service provides a standardised way to check the health status of the scoring engine.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Check health without creating an instance.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy and which validation policy is active.
    pub fn check_health(validation: sepsis_core::ValidationPolicy) -> HealthRes {
        HealthRes {
            ok: true,
            message: "Sepsis scoring engine is alive".into(),
            validation: validation.to_string(),
        }
    }
}
