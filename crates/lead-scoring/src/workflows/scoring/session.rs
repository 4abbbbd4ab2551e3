use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use super::combine::combine;
use super::domain::{Lead, Offer, ScoredLead};
use super::export::{export_results, ExportError};
use super::gateway::{IntentGateway, IntentJudgement};
use super::rules::rule_score;

/// Error raised by the session orchestration. Messages double as the
/// client-facing failure detail.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please upload both offer and leads first.")]
    MissingInputs,
    #[error("No scored results available. Run /score first.")]
    NoResults,
}

#[derive(Default)]
struct SessionSlots {
    offer: Option<Offer>,
    leads: Vec<Lead>,
    results: Vec<ScoredLead>,
}

/// Process-wide scoring state: one offer, one lead batch, one results
/// collection. A single mutex guards all three slots; it is released
/// while classification runs so a slow completion call never blocks
/// uploads or reads, and results land in one swap.
pub struct ScoringSession {
    gateway: Arc<dyn IntentGateway>,
    slots: Mutex<SessionSlots>,
}

impl ScoringSession {
    pub fn new(gateway: Arc<dyn IntentGateway>) -> Self {
        Self {
            gateway,
            slots: Mutex::new(SessionSlots::default()),
        }
    }

    /// Replace the offer unconditionally, echoing the stored value.
    pub fn set_offer(&self, offer: Offer) -> Offer {
        let mut slots = self.slots.lock().expect("session mutex poisoned");
        slots.offer = Some(offer.clone());
        offer
    }

    /// Replace the lead batch unconditionally, preserving upload order.
    /// Returns the stored row count.
    pub fn set_leads(&self, leads: Vec<Lead>) -> usize {
        let mut slots = self.slots.lock().expect("session mutex poisoned");
        let rows = leads.len();
        slots.leads = leads;
        rows
    }

    /// Score every uploaded lead in order and replace the results slot.
    ///
    /// Classification failures are absorbed per lead; once the
    /// preconditions pass, the pass always completes. Leads are scored
    /// sequentially, so a hung completion call stalls the whole pass
    /// rather than corrupting state.
    pub async fn run_scoring(&self) -> Result<Vec<ScoredLead>, SessionError> {
        let (offer, leads) = {
            let slots = self.slots.lock().expect("session mutex poisoned");
            let offer = slots.offer.clone().ok_or(SessionError::MissingInputs)?;
            if slots.leads.is_empty() {
                return Err(SessionError::MissingInputs);
            }
            (offer, slots.leads.clone())
        };

        let mut results = Vec::with_capacity(leads.len());
        for lead in &leads {
            results.push(self.score_lead(lead, &offer).await);
        }

        {
            let mut slots = self.slots.lock().expect("session mutex poisoned");
            slots.results = results.clone();
        }

        info!(rows = results.len(), "scoring pass completed");
        Ok(results)
    }

    async fn score_lead(&self, lead: &Lead, offer: &Offer) -> ScoredLead {
        let rule = rule_score(lead, offer);
        let judgement = match self.gateway.classify(lead, offer).await {
            Ok(judgement) => judgement,
            Err(err) => {
                warn!(lead = %lead.field("name"), error = %err, "intent classification failed");
                IntentJudgement::error_default()
            }
        };
        let score = combine(rule, &judgement.intent);

        ScoredLead {
            name: lead.field("name").to_string(),
            role: lead.field("role").to_string(),
            company: lead.field("company").to_string(),
            intent: judgement.intent,
            score,
            reasoning: judgement.reasoning,
        }
    }

    /// Current results, or `NoResults` when no pass has completed.
    pub fn results(&self) -> Result<Vec<ScoredLead>, SessionError> {
        let slots = self.slots.lock().expect("session mutex poisoned");
        if slots.results.is_empty() {
            return Err(SessionError::NoResults);
        }
        Ok(slots.results.clone())
    }

    /// Current results rendered as a CSV download body.
    pub fn export_csv(&self) -> Result<Vec<u8>, SessionExportError> {
        let results = self.results()?;
        Ok(export_results(&results)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionExportError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
