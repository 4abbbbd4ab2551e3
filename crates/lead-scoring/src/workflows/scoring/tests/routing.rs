use axum::extract::State;
use axum::http::{header, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::scoring::router::{
    export_results_handler, results_handler, score_handler, scoring_router,
};

#[tokio::test]
async fn offer_route_echoes_the_stored_offer() {
    let session = offline_session();
    let router = scoring_router(session.clone());

    let response = router
        .oneshot(
            axum::http::Request::post("/offer")
                .header(header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&offer()).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("message"),
        Some(&json!("Offer data uploaded successfully"))
    );
    assert_eq!(
        payload.pointer("/offer/name"),
        Some(&json!("X"))
    );
}

#[tokio::test]
async fn score_without_uploads_reports_the_precondition_message() {
    let session = offline_session();

    let response = score_handler(State(session)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("error"),
        Some(&json!("Please upload both offer and leads first."))
    );
}

#[tokio::test]
async fn results_before_scoring_reports_the_not_found_message() {
    let session = offline_session();

    let response = results_handler(State(session)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("error"),
        Some(&json!("No scored results available. Run /score first."))
    );
}

#[tokio::test]
async fn multipart_upload_parses_the_csv_and_reports_rows() {
    let session = offline_session();
    let router = scoring_router(session.clone());

    let boundary = "lead-upload-test";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"leads.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         name,role,company,industry,location,linkedin_bio\r\n\
         A,VP Sales,Acme,Finance,NY,bio\r\n\
         --{boundary}--\r\n"
    );

    let response = router
        .oneshot(
            axum::http::Request::post("/leads/upload")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(axum::body::Body::from(body))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("message"),
        Some(&json!("Leads uploaded successfully"))
    );
    assert_eq!(payload.get("rows"), Some(&json!(1)));
}

#[tokio::test]
async fn multipart_upload_without_a_file_part_is_a_client_error() {
    let session = offline_session();
    let router = scoring_router(session);

    let boundary = "lead-upload-test";
    let body = format!("--{boundary}--\r\n");

    let response = router
        .oneshot(
            axum::http::Request::post("/leads/upload")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(axum::body::Body::from(body))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    let detail = payload
        .get("error")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();
    assert!(detail.starts_with("Error reading CSV"), "got: {detail}");
}

#[tokio::test]
async fn malformed_csv_upload_reports_parse_detail() {
    let session = offline_session();
    let router = scoring_router(session);

    let boundary = "lead-upload-test";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"leads.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         name,role\r\n\
         A,VP Sales,unexpected-extra\r\n\
         --{boundary}--\r\n"
    );

    let response = router
        .oneshot(
            axum::http::Request::post("/leads/upload")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(axum::body::Body::from(body))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    let detail = payload
        .get("error")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();
    assert!(detail.contains("invalid lead CSV data"), "got: {detail}");
}

#[tokio::test]
async fn full_pass_through_the_router_produces_scored_rows() {
    let session = offline_session();
    session.set_offer(offer());
    session.set_leads(vec![vp_sales_lead()]);

    let response = score_handler(State(session.clone())).await;
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.pointer("/0/score"), Some(&json!(70)));
    assert_eq!(payload.pointer("/0/intent"), Some(&json!("Medium")));

    let response = results_handler(State(session)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn export_route_sets_download_headers() {
    let session = offline_session();
    session.set_offer(offer());
    session.set_leads(vec![vp_sales_lead()]);
    session.run_scoring().await.expect("pass completes");

    let response = export_results_handler(State(session)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("text/csv")
    );
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok()),
        Some("attachment; filename=\"scored_leads.csv\"")
    );
    let body = read_text_body(response).await;
    assert!(body.starts_with("name,role,company,intent,score,reasoning"));
}

#[tokio::test]
async fn export_before_scoring_is_a_client_error() {
    let session = offline_session();
    let response = export_results_handler(State(session)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
