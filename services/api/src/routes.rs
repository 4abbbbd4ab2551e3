use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::Extension;
use axum::Json;
use lead_scoring::workflows::scoring::{scoring_router, ScoringSession};
use serde_json::json;
use std::sync::Arc;

const ROOT_PAGE: &str = r#"<html>
    <head>
        <title>Lead Scoring Backend</title>
    </head>
    <body>
        <h1>Lead Scoring Backend is Running!</h1>
        <p>Available API Endpoints:</p>
        <ul>
            <li>POST /offer - Upload a product/offer</li>
            <li>POST /leads/upload - Upload leads CSV</li>
            <li>POST /score - Score uploaded leads</li>
            <li>GET /results - View scored leads</li>
            <li>GET /results/export - Download scored leads CSV</li>
        </ul>
        <p>Use Postman or cURL to interact with POST endpoints.</p>
    </body>
</html>
"#;

pub(crate) fn with_scoring_routes(session: Arc<ScoringSession>) -> axum::Router {
    scoring_router(session)
        .route("/", axum::routing::get(root_page))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn root_page() -> Html<&'static str> {
    Html(ROOT_PAGE)
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
