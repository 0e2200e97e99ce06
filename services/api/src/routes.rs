use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use investor_profile::error::AppError;
use investor_profile::quiz::batch::{replay_all, BatchSummary, ResponseLogImporter};
use investor_profile::quiz::repository::AssessmentRepository;
use investor_profile::quiz::{assessment_router, AssessmentService, ClassifierEngine, Dataset};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct ReplayRequest {
    /// CSV payload with `respondent_id,question_id,answer_id` rows.
    pub(crate) responses_csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReplayResponse {
    pub(crate) dataset_version: String,
    #[serde(flatten)]
    pub(crate) summary: BatchSummary,
}

pub(crate) fn with_assessment_routes<R>(service: Arc<AssessmentService<R>>) -> axum::Router
where
    R: AssessmentRepository + 'static,
{
    assessment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/profile/replay",
            axum::routing::post(replay_endpoint),
        )
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

pub(crate) async fn replay_endpoint(
    Extension(dataset): Extension<Arc<Dataset>>,
    Json(payload): Json<ReplayRequest>,
) -> Result<Json<ReplayResponse>, AppError> {
    let reader = Cursor::new(payload.responses_csv.into_bytes());
    let respondents = ResponseLogImporter::from_reader(reader)?;

    let engine = ClassifierEngine::new(dataset.clone());
    let summary = replay_all(&engine, &respondents);

    Ok(Json(ReplayResponse {
        dataset_version: dataset.version().to_string(),
        summary,
    }))
}
