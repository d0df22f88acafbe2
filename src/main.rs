use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use sepsis_core::{EngineConfig, ScoringService, validation_policy_from_env_value};

/// Main entry point for the sepsis scoring application
///
/// Resolves configuration once, then serves the REST API with Swagger UI at `/swagger-ui`.
///
/// # Environment Variables
/// - `SEPSIS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `SEPSIS_VALIDATION`: input validation policy, `strict` (default) or `lenient`
/// - `RUST_LOG`: log filter directives
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, startup or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sepsis_run=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("SEPSIS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let validation = validation_policy_from_env_value(std::env::var("SEPSIS_VALIDATION").ok())?;

    tracing::info!("++ Starting sepsis scoring REST on {}", rest_addr);
    tracing::info!("++ Input validation: {}", validation);

    let scoring = ScoringService::new(Arc::new(EngineConfig::new(validation)));
    let app = router(AppState::new(scoring));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
