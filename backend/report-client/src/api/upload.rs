use super::{ApiClient, CATEGORIES_ENDPOINT, UPLOAD_ENDPOINT, degrade_shape};
use crate::error::ClientError;
use crate::normalizer::{normalize_categories, normalize_uploaded};
use crate::transport::{MultipartFile, RequestOptions};

use models::{Category, FileUpload, UploadedFile};

use log::info;
use reqwest::Method;

const FILE_FIELD: &str = "file";
const CATEGORY_FIELD: &str = "category";

impl ApiClient {
    pub async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        let payload = degrade_shape(
            self.call_json(Method::GET, CATEGORIES_ENDPOINT, RequestOptions::default())
                .await,
            "category list",
        )?;
        Ok(normalize_categories(&payload))
    }

    /// Upload a document as multipart `file` + `category`.
    ///
    /// # Errors
    /// Returns a `Shape` error if the service accepts the upload but does not
    /// return a `file_id`, since nothing downstream can proceed without it.
    pub async fn upload(&self, upload: &FileUpload) -> Result<UploadedFile, ClientError> {
        let file = MultipartFile {
            field: FILE_FIELD.to_string(),
            filename: upload.filename().to_string(),
            bytes: upload.bytes().to_vec(),
            content_type: upload.content_type().map(str::to_string),
        };
        let fields = vec![(CATEGORY_FIELD.to_string(), upload.category().to_string())];

        let payload = self
            .call_json(
                Method::POST,
                UPLOAD_ENDPOINT,
                RequestOptions::default().multipart(file, fields),
            )
            .await?;

        let uploaded = normalize_uploaded(&payload)?;
        info!(
            "Uploaded {} ({} bytes) as file {}",
            upload.filename(),
            upload.bytes().len(),
            uploaded.file_id
        );
        Ok(uploaded)
    }
}
