use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use room_comfort::comfort::{
    evaluate, AcMode, ComfortResult, ControlReason, EnvironmentReport, Evaluation, FanSpeed,
    ModelAssumptions, PrimaryConcern, ReferenceProfile, SensorReading, ThermalSensation,
};
use room_comfort::error::AppError;
use room_comfort::narration::narrate_with_fallback;
use serde::Serialize;
use serde_json::json;
use tracing::warn;

#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct AcControl {
    pub(crate) temp: i32,
    pub(crate) mode: AcMode,
    pub(crate) fan: FanSpeed,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Recommendation {
    pub(crate) ac_control: AcControl,
    pub(crate) reason: String,
    pub(crate) explanation: ControlReason,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct Analysis {
    pub(crate) sensation: ThermalSensation,
    pub(crate) primary_concern: PrimaryConcern,
    pub(crate) temperature_deviation: f64,
    pub(crate) humidity_deviation: f64,
    pub(crate) model: ModelAssumptions,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AnalyzeResponse {
    pub(crate) comfort: ComfortResult,
    pub(crate) recommendation: Recommendation,
    pub(crate) environment: EnvironmentReport,
    pub(crate) profile: ReferenceProfile,
    pub(crate) analysis: Analysis,
}

impl AnalyzeResponse {
    pub(crate) fn new(evaluation: Evaluation, reason: String) -> Self {
        let plan = evaluation.plan;
        Self {
            comfort: evaluation.comfort,
            recommendation: Recommendation {
                ac_control: AcControl {
                    temp: plan.setpoint,
                    mode: plan.mode,
                    fan: plan.fan_speed,
                },
                reason,
                explanation: plan.reason,
            },
            analysis: Analysis {
                sensation: evaluation.sensation,
                primary_concern: evaluation.primary_concern,
                temperature_deviation: evaluation.temperature_deviation,
                humidity_deviation: evaluation.humidity_deviation,
                model: evaluation.model,
            },
            environment: evaluation.environment,
            profile: evaluation.profile,
        }
    }
}

pub(crate) fn comfort_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/comfort/analyze", post(analyze_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn analyze_endpoint(
    Extension(state): Extension<AppState>,
    Json(reading): Json<SensorReading>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let evaluation = evaluate(&reading).map_err(|err| {
        warn!(error = %err, "rejected sensor reading");
        AppError::from(err)
    })?;

    let reason = match state.narrator.as_deref() {
        Some(narrator) => narrate_with_fallback(narrator, &evaluation),
        None => String::new(),
    };

    Ok(Json(AnalyzeResponse::new(evaluation, reason)))
}
