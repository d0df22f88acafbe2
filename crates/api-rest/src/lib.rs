//! # API REST
//!
//! REST API for the sepsis scoring engine.
//!
//! Handles:
//! - HTTP endpoints with axum, one per calculator
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, status codes, CORS)
//!
//! Scoring itself happens in `sepsis-core`; handlers only translate between HTTP and
//! [`ScoringService`].

#![warn(rust_2018_idioms)]

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{ErrorRes, HealthRes, HealthService, QsofaInsufficientRes};
use sepsis_core::{
    Calculator, News2Inputs, News2Result, QsofaInputs, QsofaResult, ScoringError, ScoringService,
    SepticShockInputs, SepticShockResult, SnapshotResult, SofaInputs, SofaResult,
    VitalSignSnapshot,
};

/// Application state shared across REST API handlers
///
/// Holds the ScoringService, which carries the validation policy resolved at startup.
#[derive(Clone)]
pub struct AppState {
    pub scoring: ScoringService,
}

impl AppState {
    pub fn new(scoring: ScoringService) -> Self {
        Self { scoring }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, score_sofa, score_qsofa, score_news2, assess_septic_shock, score_snapshot),
    components(schemas(
        HealthRes,
        ErrorRes,
        QsofaInsufficientRes,
        SofaInputs,
        SofaResult,
        sepsis_core::SofaScores,
        sepsis_core::VasopressorDoses,
        QsofaInputs,
        QsofaResult,
        sepsis_core::QsofaCriteria,
        News2Inputs,
        News2Result,
        sepsis_core::News2Scores,
        sepsis_core::News2RiskBand,
        sepsis_core::ConsciousnessLevel,
        sepsis_core::Spo2Scale,
        SepticShockInputs,
        SepticShockResult,
        sepsis_core::SepticShockCriteria,
        VitalSignSnapshot,
        SnapshotResult,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with all scoring routes, Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/scores/sofa", post(score_sofa))
        .route("/scores/qsofa", post(score_qsofa))
        .route("/scores/news2", post(score_news2))
        .route("/scores/septic-shock", post(assess_septic_shock))
        .route("/scores/snapshot/:calculator", post(score_snapshot))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// A scoring request that was refused, either by the JSON extractor or by the engine.
#[derive(Debug)]
pub enum ApiError {
    Body(JsonRejection),
    Scoring(ScoringError),
}

impl From<ScoringError> for ApiError {
    fn from(err: ScoringError) -> Self {
        Self::Scoring(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Body(rejection) => {
                tracing::warn!("Rejected request body: {}", rejection.body_text());
                let body = ErrorRes {
                    error: rejection.body_text(),
                    fields: Vec::new(),
                };
                (rejection.status(), Json(body)).into_response()
            }
            ApiError::Scoring(err @ ScoringError::MissingInput {
                calculator: Calculator::Qsofa,
                ..
            }) => {
                tracing::warn!("Insufficient qSOFA input: {}", err);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(QsofaInsufficientRes::new(&err)),
                )
                    .into_response()
            }
            ApiError::Scoring(err) => {
                tracing::warn!("Rejected scoring request: {}", err);
                (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorRes::from(&err))).into_response()
            }
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status and the active validation policy. This endpoint is used
/// for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(state.scoring.validation()))
}

#[utoipa::path(
    post,
    path = "/scores/sofa",
    request_body = SofaInputs,
    responses(
        (status = 200, description = "SOFA score", body = SofaResult),
        (status = 422, description = "Input rejected", body = ErrorRes)
    )
)]
/// Compute a SOFA score
///
/// # Errors
/// Returns `422 Unprocessable Entity` if:
/// - a measurement is outside its accepted range under strict validation.
#[axum::debug_handler]
async fn score_sofa(
    State(state): State<AppState>,
    payload: Result<Json<SofaInputs>, JsonRejection>,
) -> Result<Json<SofaResult>, ApiError> {
    let Json(req) = payload?;
    Ok(Json(state.scoring.sofa(&req)?))
}

#[utoipa::path(
    post,
    path = "/scores/qsofa",
    request_body = QsofaInputs,
    responses(
        (status = 200, description = "qSOFA score", body = QsofaResult),
        (status = 422, description = "Missing or rejected input", body = QsofaInsufficientRes)
    )
)]
/// Compute a qSOFA score
///
/// Respiratory rate, systolic BP and GCS are all required. When any is absent the response
/// carries a null `qsofa_score` and the error text instead of a guessed score.
///
/// # Errors
/// Returns `422 Unprocessable Entity` if:
/// - a required measurement is missing, or
/// - a measurement is outside its accepted range under strict validation.
#[axum::debug_handler]
async fn score_qsofa(
    State(state): State<AppState>,
    payload: Result<Json<QsofaInputs>, JsonRejection>,
) -> Result<Json<QsofaResult>, ApiError> {
    let Json(req) = payload?;
    Ok(Json(state.scoring.qsofa(&req)?))
}

#[utoipa::path(
    post,
    path = "/scores/news2",
    request_body = News2Inputs,
    responses(
        (status = 200, description = "NEWS2 score", body = News2Result),
        (status = 422, description = "Input rejected", body = ErrorRes)
    )
)]
/// Compute a NEWS2 score
///
/// # Errors
/// Returns `422 Unprocessable Entity` if:
/// - a measurement is outside its accepted range under strict validation.
#[axum::debug_handler]
async fn score_news2(
    State(state): State<AppState>,
    payload: Result<Json<News2Inputs>, JsonRejection>,
) -> Result<Json<News2Result>, ApiError> {
    let Json(req) = payload?;
    Ok(Json(state.scoring.news2(&req)?))
}

#[utoipa::path(
    post,
    path = "/scores/septic-shock",
    request_body = SepticShockInputs,
    responses(
        (status = 200, description = "Septic shock assessment", body = SepticShockResult),
        (status = 422, description = "Input rejected", body = ErrorRes)
    )
)]
/// Assess septic shock
///
/// # Errors
/// Returns `422 Unprocessable Entity` if:
/// - MAP or lactate is outside its accepted range under strict validation.
#[axum::debug_handler]
async fn assess_septic_shock(
    State(state): State<AppState>,
    payload: Result<Json<SepticShockInputs>, JsonRejection>,
) -> Result<Json<SepticShockResult>, ApiError> {
    let Json(req) = payload?;
    Ok(Json(state.scoring.septic_shock(&req)?))
}

#[utoipa::path(
    post,
    path = "/scores/snapshot/{calculator}",
    params(
        ("calculator" = String, Path, description = "One of sofa, qsofa, news2, septic-shock")
    ),
    request_body = VitalSignSnapshot,
    responses(
        (status = 200, description = "The chosen calculator's result", body = SnapshotResult),
        (status = 422, description = "Unknown calculator, missing or rejected input", body = ErrorRes)
    )
)]
/// Score a vital-sign snapshot with one calculator
///
/// The snapshot may carry any subset of measurements. Only those the chosen calculator needs
/// are required.
///
/// # Errors
/// Returns `422 Unprocessable Entity` if:
/// - the calculator name is unknown,
/// - a measurement the calculator needs is absent, or
/// - a measurement is outside its accepted range under strict validation.
#[axum::debug_handler]
async fn score_snapshot(
    State(state): State<AppState>,
    Path(calculator): Path<String>,
    payload: Result<Json<VitalSignSnapshot>, JsonRejection>,
) -> Result<Json<SnapshotResult>, ApiError> {
    let calculator: Calculator = calculator.parse()?;
    let Json(snapshot) = payload?;
    Ok(Json(state.scoring.score_snapshot(calculator, &snapshot)?))
}
