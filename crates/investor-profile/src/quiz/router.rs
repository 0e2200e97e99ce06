use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{AssessmentId, ResponseSet};
use super::repository::{AssessmentRepository, RepositoryError};
use super::service::{AssessmentService, AssessmentServiceError};

/// Router builder exposing HTTP endpoints for the questionnaire and
/// assessments.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: AssessmentRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/profile/questionnaire",
            get(questionnaire_handler::<R>),
        )
        .route("/api/v1/profile/assessments", post(submit_handler::<R>))
        .route(
            "/api/v1/profile/assessments/:assessment_id",
            get(fetch_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn questionnaire_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    (StatusCode::OK, axum::Json(service.questionnaire())).into_response()
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    axum::Json(responses): axum::Json<ResponseSet>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.submit(responses) {
        Ok(record) => {
            let view = record.result_view();
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(AssessmentServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "assessment already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.result_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(AssessmentServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "assessment not found",
                "assessment_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
