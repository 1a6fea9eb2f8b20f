use crate::FileUpload;
use crate::error::model_error::ModelError;

/// Builder for creating validated [`FileUpload`] instances.
#[derive(Debug, Default)]
pub struct FileUploadBuilder {
    filename: Option<String>,
    bytes: Option<Vec<u8>>,
    category: Option<String>,
    content_type: Option<String>,
}

impl FileUploadBuilder {
    pub fn with_file(mut self, filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.filename = Some(filename.into());
        self.bytes = Some(bytes.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Build the upload with validation.
    #[track_caller]
    pub fn build(self) -> Result<FileUpload, ModelError> {
        let Some(filename) = self.filename else {
            return Err(ModelError::validation("No file selected for upload"));
        };

        let filename = filename.trim().to_string();
        if filename.is_empty() {
            return Err(ModelError::validation("File name cannot be empty"));
        }

        let bytes = self.bytes.unwrap_or_default();
        if bytes.is_empty() {
            return Err(ModelError::validation(format!("File '{filename}' is empty")));
        }

        let Some(category) = self.category else {
            return Err(ModelError::validation("No file category selected"));
        };

        let category = category.trim().to_string();
        if category.is_empty() {
            return Err(ModelError::validation("File category cannot be empty"));
        }

        Ok(FileUpload {
            filename,
            bytes,
            category,
            content_type: self.content_type,
        })
    }
}
