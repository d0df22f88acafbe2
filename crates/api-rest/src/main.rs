//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! This binary is useful for development and debugging. The workspace's main `sepsis-run`
//! binary serves the same router with `.env` support.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use sepsis_core::{validation_policy_from_env_value, EngineConfig, ScoringService};

/// Main entry point for the REST API server
///
/// # Environment Variables
/// - `SEPSIS_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `SEPSIS_VALIDATION`: `strict` (default) or `lenient`
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the validation policy is not recognised,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("SEPSIS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let validation = validation_policy_from_env_value(std::env::var("SEPSIS_VALIDATION").ok())?;

    tracing::info!("-- Starting sepsis scoring REST API on {} ({} validation)", addr, validation);

    let scoring = ScoringService::new(Arc::new(EngineConfig::new(validation)));
    let app = router(AppState::new(scoring));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
