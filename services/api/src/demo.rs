use std::path::PathBuf;

use clap::Args;
use lead_scoring::config::AppConfig;
use lead_scoring::error::AppError;
use lead_scoring::workflows::scoring::{
    gateway_from_config, leads_from_path, Offer, ScoringSession, SessionExportError,
};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to the offer definition (JSON)
    #[arg(long)]
    pub(crate) offer: PathBuf,
    /// Path to the lead batch (CSV)
    #[arg(long)]
    pub(crate) leads: PathBuf,
    /// Optionally write the scored results as CSV to this path
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
}

/// One scoring pass over files from disk, printed to stdout. Uses the
/// live classifier when a credential is configured, the offline fallback
/// otherwise.
pub(crate) async fn run_score_files(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;

    let offer_text = std::fs::read_to_string(&args.offer)?;
    let offer: Offer = serde_json::from_str(&offer_text)?;
    let leads = leads_from_path(&args.leads)?;

    let gateway = gateway_from_config(&config.ai);
    let session = ScoringSession::new(gateway);

    println!(
        "Scoring {} lead(s) against offer '{}' (AI {})",
        leads.len(),
        offer.name,
        if config.ai.is_configured() {
            "configured"
        } else {
            "offline"
        }
    );

    session.set_offer(offer);
    session.set_leads(leads);
    let results = session.run_scoring().await?;

    println!("{:<20} {:<24} {:<20} {:<8} {:>5}", "NAME", "ROLE", "COMPANY", "INTENT", "SCORE");
    for row in &results {
        println!(
            "{:<20} {:<24} {:<20} {:<8} {:>5}  {}",
            row.name, row.role, row.company, row.intent, row.score, row.reasoning
        );
    }

    if let Some(path) = args.export {
        let bytes = session.export_csv().map_err(|err| match err {
            SessionExportError::Session(inner) => AppError::from(inner),
            SessionExportError::Export(inner) => AppError::from(inner),
        })?;
        std::fs::write(&path, bytes)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}
