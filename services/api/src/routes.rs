use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use pot_insurance::router::{api_router, ApiServices};
use serde_json::json;

/// Resource routes plus the health, readiness and metrics probes.
pub(crate) fn with_operational_routes(services: &ApiServices) -> Router {
    api_router(services)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Acquire);
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

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use pot_insurance::notifications::LogMailer;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(ready: bool) -> (Router, Arc<AtomicBool>) {
        let readiness = Arc::new(AtomicBool::new(ready));
        let recorder = PrometheusBuilder::new().build_recorder();
        let state = AppState {
            readiness: readiness.clone(),
            metrics: Arc::new(recorder.handle()),
        };
        let services = ApiServices::in_memory(Arc::new(LogMailer), "benefits@example.com");
        let router = with_operational_routes(&services).layer(Extension(state));
        (router, readiness)
    }

    async fn get_status(router: Router, uri: &str) -> StatusCode {
        router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
            .await
            .expect("route executes")
            .status()
    }

    #[tokio::test]
    async fn health_is_always_ok() {
        let (router, _) = app(false);
        assert_eq!(get_status(router, "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_follows_the_flag() {
        let (router, readiness) = app(false);
        assert_eq!(
            get_status(router.clone(), "/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );

        readiness.store(true, Ordering::Release);
        assert_eq!(get_status(router, "/ready").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_render_as_text() {
        let (router, _) = app(true);
        let response = router
            .oneshot(Request::get("/metrics").body(Body::empty()).expect("request builds"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn resource_routes_are_mounted() {
        let (router, _) = app(true);
        assert_eq!(get_status(router, "/v1/packages").await, StatusCode::OK);
    }
}
