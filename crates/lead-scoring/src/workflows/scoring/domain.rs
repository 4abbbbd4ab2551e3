use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Seller's product description used as scoring context. Replaced
/// wholesale on every upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub name: String,
    pub value_props: Vec<String>,
    pub ideal_use_cases: Vec<String>,
}

impl Offer {
    /// Only the first ideal-use-case entry participates in rule scoring.
    pub fn primary_use_case(&self) -> Option<&str> {
        self.ideal_use_cases.first().map(String::as_str)
    }
}

/// One prospective customer record from an uploaded batch.
///
/// The schema is open: every column present in the upload is carried
/// through, keyed by its header name. Scoring only consults a handful of
/// well-known fields but the full record is forwarded to the classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lead {
    fields: BTreeMap<String, String>,
}

impl Lead {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Field value with absent treated as empty, the way scoring reads it.
    pub fn field(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    /// Present with a non-blank value.
    pub fn is_filled(&self, field: &str) -> bool {
        !self.field(field).trim().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, String)> for Lead {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Buying-likelihood label assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    High,
    Medium,
    Low,
}

impl Intent {
    /// Exact-match parse; unrecognized labels (including case variants)
    /// yield `None` and the combiner credits them as `Medium`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "High" => Some(Intent::High),
            "Medium" => Some(Intent::Medium),
            "Low" => Some(Intent::Low),
            _ => None,
        }
    }

    pub const fn points(self) -> u16 {
        match self {
            Intent::High => 50,
            Intent::Medium => 30,
            Intent::Low => 10,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Intent::High => "High",
            Intent::Medium => "Medium",
            Intent::Low => "Low",
        }
    }
}

/// One row of a scoring pass. The `intent` field echoes the classifier's
/// label verbatim, even when it falls outside the expected set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredLead {
    pub name: String,
    pub role: String,
    pub company: String,
    pub intent: String,
    pub score: u16,
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_parses_exact_labels_only() {
        assert_eq!(Intent::from_label("High"), Some(Intent::High));
        assert_eq!(Intent::from_label("Medium"), Some(Intent::Medium));
        assert_eq!(Intent::from_label("Low"), Some(Intent::Low));
        assert_eq!(Intent::from_label("high"), None);
        assert_eq!(Intent::from_label("Urgent"), None);
    }

    #[test]
    fn lead_treats_absent_fields_as_empty() {
        let mut lead = Lead::new();
        lead.insert("name", "Ada");
        lead.insert("role", "  ");

        assert_eq!(lead.field("name"), "Ada");
        assert_eq!(lead.field("company"), "");
        assert!(lead.is_filled("name"));
        assert!(!lead.is_filled("role"));
        assert!(!lead.is_filled("company"));
    }

    #[test]
    fn lead_serializes_as_flat_map() {
        let mut lead = Lead::new();
        lead.insert("name", "Ada");
        lead.insert("industry", "Finance");

        let json = serde_json::to_value(&lead).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({ "name": "Ada", "industry": "Finance" })
        );
    }
}
