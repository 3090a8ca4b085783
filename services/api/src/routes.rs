use crate::infra::{AppState, InMemoryKondoRepository};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};
use kondo::ingestion::{route_pdf, IngestionConfig, PdfExtractionRoute};
use kondo::listings::{quality_router, KondoQualityService, KondoRepository};
use kondo::quality::{KondoId, KondoRecord, MediaRecord};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct SnapshotRequest {
    pub(crate) listing: KondoRecord,
    #[serde(default)]
    pub(crate) media: Vec<MediaRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PdfRouteRequest {
    pub(crate) size_bytes: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct PdfRouteResponse {
    pub(crate) size_bytes: u64,
    pub(crate) limit_bytes: u64,
    pub(crate) route: PdfExtractionRoute,
}

pub(crate) fn with_quality_routes<R>(
    service: Arc<KondoQualityService<R>>,
    repository: Arc<InMemoryKondoRepository>,
    ingestion: IngestionConfig,
) -> Router
where
    R: KondoRepository + 'static,
{
    let snapshots = Router::new()
        .route("/api/v1/kondos/:kondo_id/snapshot", put(snapshot_endpoint))
        .with_state(repository);

    let ingestion = Router::new()
        .route("/api/v1/ingestion/pdf-route", post(pdf_route_endpoint))
        .with_state(ingestion);

    quality_router(service)
        .merge(snapshots)
        .merge(ingestion)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
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

/// Stores the listing and media snapshot a later recompute will read.
pub(crate) async fn snapshot_endpoint(
    State(repository): State<Arc<InMemoryKondoRepository>>,
    Path(kondo_id): Path<u64>,
    Json(request): Json<SnapshotRequest>,
) -> impl IntoResponse {
    let replaced = repository.upsert(KondoId(kondo_id), request.listing, request.media);
    let status = if replaced {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    (status, Json(json!({ "kondo_id": kondo_id })))
}

pub(crate) async fn pdf_route_endpoint(
    State(ingestion): State<IngestionConfig>,
    Json(request): Json<PdfRouteRequest>,
) -> Json<PdfRouteResponse> {
    Json(PdfRouteResponse {
        size_bytes: request.size_bytes,
        limit_bytes: ingestion.pdf_inline_limit_bytes,
        route: route_pdf(request.size_bytes, &ingestion),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use kondo::quality::QualityConfig;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn router() -> Router {
        let repository = Arc::new(InMemoryKondoRepository::default());
        let service = Arc::new(KondoQualityService::new(
            repository.clone(),
            QualityConfig::default(),
        ));
        with_quality_routes(service, repository, IngestionConfig::default())
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn snapshot_then_recompute_scores_listing() {
        let app = router();
        let snapshot = json!({
            "listing": {
                "name": "Vale dos Cristais",
                "status": "available",
                "type": "lots",
                "description": "Lotes com vista"
            },
            "media": [{ "type": "image", "status": "final" }]
        });

        let created = app
            .clone()
            .oneshot(
                Request::put("/api/v1/kondos/8/snapshot")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(snapshot.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(created.status(), StatusCode::CREATED);

        let scored = app
            .oneshot(
                Request::post("/api/v1/kondos/8/quality")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(scored.status(), StatusCode::OK);

        let body = json_body(scored).await;
        let overall = body["overall_quality"].as_f64().expect("overall score");
        assert!((overall - 0.49).abs() < 1e-9);
        assert_eq!(body["meets_threshold"], false);
    }

    #[tokio::test]
    async fn pdf_route_endpoint_applies_limit() {
        let response = router()
            .oneshot(
                Request::post("/api/v1/ingestion/pdf-route")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({ "size_bytes": 50_000_000u64 }).to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["route"], "staged");
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
            .build_recorder()
            .handle();
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(handle),
        };

        let response = readiness_endpoint(Extension(state)).await.into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }
}
