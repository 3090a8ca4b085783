use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::repository::{KondoRepository, RepositoryError};
use super::service::{KondoQualityService, KondoQualityServiceError};
use crate::quality::{KondoId, KondoRecord, MediaRecord};

/// Ad-hoc scoring payload; nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub kondo_id: KondoId,
    pub listing: KondoRecord,
    #[serde(default)]
    pub media: Vec<MediaRecord>,
}

/// Router builder exposing quality assessment endpoints.
pub fn quality_router<R>(service: Arc<KondoQualityService<R>>) -> Router
where
    R: KondoRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/kondos/:kondo_id/quality",
            post(recompute_handler::<R>).get(latest_handler::<R>),
        )
        .route(
            "/api/v1/kondos/:kondo_id/quality/status",
            get(status_handler::<R>),
        )
        .route("/api/v1/quality/assess", post(assess_handler::<R>))
        .with_state(service)
}

pub(crate) async fn recompute_handler<R>(
    State(service): State<Arc<KondoQualityService<R>>>,
    Path(kondo_id): Path<u64>,
) -> Response
where
    R: KondoRepository + 'static,
{
    let kondo_id = KondoId(kondo_id);
    match service.recompute(kondo_id, Utc::now()) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(err) => error_response(kondo_id, err),
    }
}

pub(crate) async fn latest_handler<R>(
    State(service): State<Arc<KondoQualityService<R>>>,
    Path(kondo_id): Path<u64>,
) -> Response
where
    R: KondoRepository + 'static,
{
    let kondo_id = KondoId(kondo_id);
    match service.latest(kondo_id) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(err) => error_response(kondo_id, err),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<KondoQualityService<R>>>,
    Path(kondo_id): Path<u64>,
) -> Response
where
    R: KondoRepository + 'static,
{
    let kondo_id = KondoId(kondo_id);
    match service.status(kondo_id) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(kondo_id, err),
    }
}

pub(crate) async fn assess_handler<R>(
    State(service): State<Arc<KondoQualityService<R>>>,
    axum::Json(request): axum::Json<AssessmentRequest>,
) -> Response
where
    R: KondoRepository + 'static,
{
    let assessment =
        service.assess_snapshot(request.kondo_id, &request.listing, &request.media, Utc::now());
    (StatusCode::OK, axum::Json(assessment)).into_response()
}

fn error_response(kondo_id: KondoId, err: KondoQualityServiceError) -> Response {
    match err {
        KondoQualityServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({
                "kondo_id": kondo_id,
                "error": "kondo or assessment not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        other => {
            tracing::warn!(kondo_id = %kondo_id, error = %other, "quality request failed");
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
