use serde::{Deserialize, Serialize};

/// AI-generated output derived from one document and one model.
///
/// Regeneration replaces a report wholesale; there is no partial update
/// beyond editing `content`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub report_id: String,
    pub file_id: String,
    pub title: Option<String>,
    /// Markdown body.
    pub content: String,
    pub summary: String,
    pub key_points: Vec<String>,
    pub recommendations: Vec<String>,
    pub model_id: Option<String>,
    pub model_name: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

/// Result of a successful `generate` call: the id to navigate to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedReport {
    pub report_id: String,
}

impl GeneratedReport {
    pub fn new(report_id: impl Into<String>) -> Self {
        Self {
            report_id: report_id.into(),
        }
    }
}

/// Acknowledgement returned by report updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub message: Option<String>,
    pub report_id: Option<String>,
}
