use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::scoring::domain::{Lead, Offer};
use crate::workflows::scoring::gateway::{
    IntentGateway, IntentGatewayError, IntentJudgement, OfflineIntentGateway,
};
use crate::workflows::scoring::session::ScoringSession;

pub(super) fn offer() -> Offer {
    Offer {
        name: "X".to_string(),
        value_props: vec!["a".to_string()],
        ideal_use_cases: vec!["finance software".to_string()],
    }
}

pub(super) fn vp_sales_lead() -> Lead {
    lead(&[
        ("name", "A"),
        ("role", "VP Sales"),
        ("company", "Acme"),
        ("industry", "Finance"),
        ("location", "NY"),
        ("linkedin_bio", "bio"),
    ])
}

pub(super) fn lead(fields: &[(&str, &str)]) -> Lead {
    let mut lead = Lead::new();
    for (field, value) in fields {
        lead.insert(*field, *value);
    }
    lead
}

pub(super) fn offline_session() -> Arc<ScoringSession> {
    Arc::new(ScoringSession::new(Arc::new(OfflineIntentGateway)))
}

/// Gateway double replaying queued verdicts in order. Panics when a test
/// requests more classifications than it scripted.
pub(super) struct ScriptedGateway {
    responses: Mutex<VecDeque<Result<IntentJudgement, IntentGatewayError>>>,
}

impl ScriptedGateway {
    pub(super) fn new(
        responses: Vec<Result<IntentJudgement, IntentGatewayError>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
        })
    }

    pub(super) fn judging(labels: &[&str]) -> Arc<Self> {
        Self::new(
            labels
                .iter()
                .map(|label| {
                    Ok(IntentJudgement {
                        intent: label.to_string(),
                        reasoning: format!("scripted {label} verdict"),
                    })
                })
                .collect(),
        )
    }
}

#[async_trait]
impl IntentGateway for ScriptedGateway {
    async fn classify(
        &self,
        _lead: &Lead,
        _offer: &Offer,
    ) -> Result<IntentJudgement, IntentGatewayError> {
        self.responses
            .lock()
            .expect("script mutex poisoned")
            .pop_front()
            .expect("scripted gateway exhausted")
    }
}

/// Gateway double that always fails, standing in for an unreachable or
/// misbehaving completion backend.
pub(super) struct UnreachableGateway;

#[async_trait]
impl IntentGateway for UnreachableGateway {
    async fn classify(
        &self,
        _lead: &Lead,
        _offer: &Offer,
    ) -> Result<IntentJudgement, IntentGatewayError> {
        Err(IntentGatewayError::Network("connection refused".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf8 body")
}
