use std::io::Read;
use std::path::Path;

use super::domain::Lead;

#[derive(Debug)]
pub enum LeadImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for LeadImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadImportError::Io(err) => write!(f, "failed to read lead upload: {}", err),
            LeadImportError::Csv(err) => write!(f, "invalid lead CSV data: {}", err),
        }
    }
}

impl std::error::Error for LeadImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeadImportError::Io(err) => Some(err),
            LeadImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for LeadImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LeadImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Parse an uploaded CSV into leads, preserving row order and carrying
/// every column through under its header name.
pub fn parse_leads<R: Read>(reader: R) -> Result<Vec<Lead>, LeadImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut leads = Vec::new();

    for record in csv_reader.records() {
        let row = record?;
        let lead: Lead = headers
            .iter()
            .zip(row.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();
        leads.push(lead);
    }

    Ok(leads)
}

pub fn leads_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Lead>, LeadImportError> {
    let file = std::fs::File::open(path)?;
    parse_leads(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_rows_in_upload_order_with_open_schema() {
        let csv = "name,role,company,industry,location,linkedin_bio,twitter\n\
                   Ada,VP Sales,Acme,Finance,NY,bio,@ada\n\
                   Grace,Engineer,Initech,Retail,SF,bio2,\n";

        let leads = parse_leads(Cursor::new(csv)).expect("parses");

        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].field("name"), "Ada");
        assert_eq!(leads[0].field("twitter"), "@ada");
        assert_eq!(leads[1].field("name"), "Grace");
        assert!(!leads[1].is_filled("twitter"));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let csv = "name , role\n Ada , VP Sales \n";
        let leads = parse_leads(Cursor::new(csv)).expect("parses");
        assert_eq!(leads[0].field("name"), "Ada");
        assert_eq!(leads[0].field("role"), "VP Sales");
    }

    #[test]
    fn header_only_input_yields_an_empty_batch() {
        let leads = parse_leads(Cursor::new("name,role\n")).expect("parses");
        assert!(leads.is_empty());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let csv = "name,role\nAda,VP Sales,extra\n";
        let error = parse_leads(Cursor::new(csv)).expect_err("ragged row fails");
        assert!(matches!(error, LeadImportError::Csv(_)));
    }

    #[test]
    fn missing_files_propagate_io_errors() {
        let error = leads_from_path("./does-not-exist.csv").expect_err("expected io error");
        assert!(matches!(error, LeadImportError::Io(_)));
    }
}
