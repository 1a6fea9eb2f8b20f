pub mod builder;

use serde::{Deserialize, Serialize};

/// A validated file ready for multipart upload.
///
/// Only constructed through [`builder::FileUploadBuilder`], so a missing
/// file or category is rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub(crate) filename: String,
    pub(crate) bytes: Vec<u8>,
    pub(crate) category: String,
    pub(crate) content_type: Option<String>,
}

impl FileUpload {
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}

/// Service acknowledgement of a stored upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub file_id: String,
    pub storage_url: Option<String>,
}
