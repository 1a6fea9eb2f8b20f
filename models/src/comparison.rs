use crate::Report;

use serde::{Deserialize, Serialize};

/// Rendered in place of a missing cross-model analysis.
pub const NO_ANALYSIS_AVAILABLE: &str = "No analysis available";

/// One model's output inside a comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOutput {
    pub model_id: String,
    pub model_name: String,
    pub content: String,
    pub summary: Option<String>,
    /// Set when the service could not generate output for this model.
    pub error: Option<String>,
}

impl ModelOutput {
    /// Output entry describing an already generated report.
    pub fn from_report(report: &Report) -> Self {
        let model_id = report.model_id.clone().unwrap_or_default();
        let model_name = report
            .model_name
            .clone()
            .unwrap_or_else(|| model_id.clone());

        Self {
            model_id,
            model_name,
            content: report.content.clone(),
            summary: (!report.summary.is_empty()).then(|| report.summary.clone()),
            error: None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Per-model outputs for the same source plus an optional analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub comparisons: Vec<ModelOutput>,
    pub analysis: Option<String>,
    /// Human-readable failure summary when this is a fallback result.
    pub error: Option<String>,
}

impl ComparisonResult {
    /// Result rendered when a comparison could not be produced at all.
    pub fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            comparisons: Vec::new(),
            analysis: Some(format!("Comparison failed: {message}")),
            error: Some(message),
        }
    }

    pub fn analysis_text(&self) -> &str {
        self.analysis.as_deref().unwrap_or(NO_ANALYSIS_AVAILABLE)
    }

    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}
