use super::domain::ScoredLead;

/// Download filename advertised by the export endpoint.
pub const EXPORT_FILENAME: &str = "scored_leads.csv";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to serialize scored leads: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to finalize export: {0}")]
    Io(#[from] std::io::Error),
}

/// Render the current results as CSV bytes, one row per scored lead with
/// a `name,role,company,intent,score,reasoning` header.
pub fn export_results(results: &[ScoredLead]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in results {
        writer.serialize(record)?;
    }
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(bytes)
}
