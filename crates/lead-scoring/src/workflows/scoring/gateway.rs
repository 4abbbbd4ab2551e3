use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{Intent, Lead, Offer};
use crate::config::AiConfig;

/// Reasoning attached when no completion backend is configured.
pub const OFFLINE_REASONING: &str = "AI not configured; using default reasoning.";
/// Reasoning substituted when the backend call or its response fails.
pub const ERROR_REASONING: &str = "Default reasoning due to AI error.";

/// Classifier verdict for one lead. `intent` is kept as the raw label so
/// downstream consumers see exactly what the model said.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentJudgement {
    pub intent: String,
    pub reasoning: String,
}

impl IntentJudgement {
    pub fn offline_default() -> Self {
        Self {
            intent: Intent::Medium.label().to_string(),
            reasoning: OFFLINE_REASONING.to_string(),
        }
    }

    pub fn error_default() -> Self {
        Self {
            intent: Intent::Medium.label().to_string(),
            reasoning: ERROR_REASONING.to_string(),
        }
    }
}

/// Completion backend failure. Callers in the scoring pass absorb every
/// variant into the error-default judgement.
#[derive(Debug, thiserror::Error)]
pub enum IntentGatewayError {
    #[error("network error: {0}")]
    Network(String),
    #[error("completion API error: {0}")]
    Api(String),
    #[error("unusable completion response: {0}")]
    Parse(String),
}

/// Classification strategy selected once at startup.
#[async_trait]
pub trait IntentGateway: Send + Sync {
    async fn classify(
        &self,
        lead: &Lead,
        offer: &Offer,
    ) -> Result<IntentJudgement, IntentGatewayError>;
}

/// Deterministic stand-in used when no credential is present. Never
/// touches the network.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineIntentGateway;

#[async_trait]
impl IntentGateway for OfflineIntentGateway {
    async fn classify(
        &self,
        _lead: &Lead,
        _offer: &Offer,
    ) -> Result<IntentJudgement, IntentGatewayError> {
        Ok(IntentJudgement::offline_default())
    }
}

/// Chat-completions backed classifier. One best-effort request per lead;
/// no retry or backoff beyond what the HTTP client enforces.
pub struct OpenAiIntentGateway {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiIntentGateway {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }
}

impl std::fmt::Debug for OpenAiIntentGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiIntentGateway")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

const SYSTEM_PROMPT: &str = "You are an expert B2B lead qualification assistant.";
const SAMPLING_TEMPERATURE: f32 = 0.4;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[async_trait]
impl IntentGateway for OpenAiIntentGateway {
    async fn classify(
        &self,
        lead: &Lead,
        offer: &Offer,
    ) -> Result<IntentJudgement, IntentGatewayError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_prompt(lead, offer)?,
                },
            ],
            temperature: SAMPLING_TEMPERATURE,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|err| IntentGatewayError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(IntentGatewayError::Api(format!("{status}: {detail}")));
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|err| IntentGatewayError::Parse(err.to_string()))?;

        let content = payload
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| IntentGatewayError::Api("no completion choices returned".to_string()))?;

        parse_judgement(&content)
    }
}

/// Select the backend from configuration: credential present means the
/// live classifier, otherwise every lead takes the deterministic default.
pub fn gateway_from_config(config: &AiConfig) -> Arc<dyn IntentGateway> {
    match &config.api_key {
        Some(key) => {
            info!(model = %config.model, "completion backend configured");
            Arc::new(OpenAiIntentGateway::new(
                key.clone(),
                config.model.clone(),
                config.base_url.clone(),
            ))
        }
        None => {
            warn!("OPENAI_API_KEY not set; intent classification uses the offline fallback");
            Arc::new(OfflineIntentGateway)
        }
    }
}

fn build_prompt(lead: &Lead, offer: &Offer) -> Result<String, IntentGatewayError> {
    let offer_json = serde_json::to_string(offer)
        .map_err(|err| IntentGatewayError::Parse(err.to_string()))?;
    let lead_json = serde_json::to_string(lead)
        .map_err(|err| IntentGatewayError::Parse(err.to_string()))?;

    Ok(format!(
        "You are a B2B sales assistant. Based on the following lead and offer,\n\
         classify the buying intent as High, Medium, or Low,\n\
         and explain in 1-2 short sentences.\n\n\
         Respond ONLY in valid JSON with keys:\n\
         - intent\n\
         - reasoning\n\n\
         Offer: {offer_json}\n\
         Lead: {lead_json}"
    ))
}

/// Models frequently wrap JSON replies in a markdown fence; strip the
/// literal markers before parsing.
fn strip_code_fence(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("```json") {
        trimmed
            .replace("```json", "")
            .replace("```", "")
            .trim()
            .to_string()
    } else {
        trimmed.to_string()
    }
}

fn parse_judgement(raw: &str) -> Result<IntentJudgement, IntentGatewayError> {
    let text = strip_code_fence(raw);
    let value: serde_json::Value = serde_json::from_str(&text)
        .map_err(|err| IntentGatewayError::Parse(format!("invalid JSON: {err}")))?;

    if !value.is_object() {
        return Err(IntentGatewayError::Parse(
            "completion did not return a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|err| IntentGatewayError::Parse(format!("missing required keys: {err}")))
}
