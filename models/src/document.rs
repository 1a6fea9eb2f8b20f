use serde::{Deserialize, Serialize};

/// Processing status of an uploaded document.
///
/// The service advances this as generation runs; the client only ever
/// displays it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Uploaded,
    Processing,
    Completed,
    Failed,
}

impl DocumentStatus {
    /// Maps the service's free-form status string.
    ///
    /// Unrecognized values fall back to [`DocumentStatus::Uploaded`].
    pub fn from_service(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "processing" => DocumentStatus::Processing,
            "completed" => DocumentStatus::Completed,
            "error" | "failed" => DocumentStatus::Failed,
            _ => DocumentStatus::Uploaded,
        }
    }
}

/// An uploaded source file awaiting or having undergone report generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub file_id: String,
    pub original_filename: String,
    pub category: String,
    /// S3 URL or key the service stored the upload under.
    pub storage_ref: Option<String>,
    pub status: DocumentStatus,
    pub uploaded_at: Option<String>,
    pub updated_at: Option<String>,
    /// Set once the service has generated a report for this document.
    pub report_id: Option<String>,
}

/// One page of documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileList {
    pub items: Vec<Document>,
    /// Opaque cursor for the next page; `None` on the last page.
    pub last_evaluated_key: Option<String>,
}

impl FileList {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Filters for a document listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileQuery {
    pub category: Option<String>,
    pub limit: Option<u32>,
    pub last_key: Option<String>,
}

impl FileQuery {
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_last_key(mut self, last_key: impl Into<String>) -> Self {
        self.last_key = Some(last_key.into());
        self
    }

    /// Query-string pairs in the order the service documents them.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push((String::from("category"), category.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push((String::from("limit"), limit.to_string()));
        }
        if let Some(last_key) = &self.last_key {
            pairs.push((String::from("last_key"), last_key.clone()));
        }
        pairs
    }
}
