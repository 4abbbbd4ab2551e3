use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::Offer;
use super::export::EXPORT_FILENAME;
use super::parser::parse_leads;
use super::session::{ScoringSession, SessionExportError};

/// Router builder exposing the scoring HTTP surface.
pub fn scoring_router(session: Arc<ScoringSession>) -> Router {
    Router::new()
        .route("/offer", post(offer_handler))
        .route("/leads/upload", post(upload_leads_handler))
        .route("/score", post(score_handler))
        .route("/results", get(results_handler))
        .route("/results/export", get(export_results_handler))
        .with_state(session)
}

pub(crate) async fn offer_handler(
    State(session): State<Arc<ScoringSession>>,
    Json(offer): Json<Offer>,
) -> Response {
    let stored = session.set_offer(offer);
    let payload = json!({
        "message": "Offer data uploaded successfully",
        "offer": stored,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn upload_leads_handler(
    State(session): State<Arc<ScoringSession>>,
    mut multipart: Multipart,
) -> Response {
    let contents = loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let is_file = field.file_name().is_some() || field.name() == Some("file");
                if !is_file {
                    continue;
                }
                match field.bytes().await {
                    Ok(bytes) => break bytes,
                    Err(error) => return bad_request(format!("Error reading CSV: {error}")),
                }
            }
            Ok(None) => return bad_request("Error reading CSV: no file part in upload".to_string()),
            Err(error) => return bad_request(format!("Error reading CSV: {error}")),
        }
    };

    match parse_leads(Cursor::new(contents)) {
        Ok(leads) => {
            let rows = session.set_leads(leads);
            let payload = json!({
                "message": "Leads uploaded successfully",
                "rows": rows,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => bad_request(format!("Error reading CSV: {error}")),
    }
}

pub(crate) async fn score_handler(State(session): State<Arc<ScoringSession>>) -> Response {
    match session.run_scoring().await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(error) => bad_request(error.to_string()),
    }
}

pub(crate) async fn results_handler(State(session): State<Arc<ScoringSession>>) -> Response {
    match session.results() {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(error) => bad_request(error.to_string()),
    }
}

pub(crate) async fn export_results_handler(State(session): State<Arc<ScoringSession>>) -> Response {
    match session.export_csv() {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{EXPORT_FILENAME}\""),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(SessionExportError::Session(error)) => bad_request(error.to_string()),
        Err(SessionExportError::Export(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

fn bad_request(detail: String) -> Response {
    let payload = json!({ "error": detail });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}
