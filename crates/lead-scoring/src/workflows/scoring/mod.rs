//! Lead scoring pipeline: rule-based heuristics, AI intent classification,
//! score combination, and the single-session orchestration over them.
//!
//! The session owns three independently replaceable slots (offer, lead
//! batch, results) behind one mutex; a scoring pass snapshots its inputs,
//! scores sequentially, and installs the results with a single swap.

pub(crate) mod combine;
pub mod domain;
pub mod export;
pub mod gateway;
pub mod parser;
pub mod router;
pub(crate) mod rules;
pub mod session;

#[cfg(test)]
mod tests;

pub use domain::{Intent, Lead, Offer, ScoredLead};
pub use export::{export_results, ExportError, EXPORT_FILENAME};
pub use gateway::{
    gateway_from_config, IntentGateway, IntentGatewayError, IntentJudgement, OfflineIntentGateway,
    OpenAiIntentGateway,
};
pub use parser::{leads_from_path, parse_leads, LeadImportError};
pub use router::scoring_router;
pub use session::{ScoringSession, SessionError, SessionExportError};
