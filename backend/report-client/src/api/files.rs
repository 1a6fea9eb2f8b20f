use super::{ApiClient, FILES_ENDPOINT};
use crate::error::{ClientError, FailureKind};
use crate::normalizer::normalize_file_list;
use crate::transport::RequestOptions;

use models::{FileList, FileQuery};

use log::warn;
use reqwest::Method;

impl ApiClient {
    /// List uploaded documents.
    ///
    /// Listings are best effort: once retries are exhausted, a network
    /// failure or timeout yields an empty list instead of an error. Errors
    /// the server reported still surface.
    pub async fn files(&self, query: &FileQuery) -> Result<FileList, ClientError> {
        let mut query = query.clone();
        if query.limit.is_none() {
            query.limit = Some(self.page_limit);
        }

        let result = self
            .call_json(
                Method::GET,
                FILES_ENDPOINT,
                RequestOptions::default().queries(query.to_query_pairs()),
            )
            .await;

        match result {
            Ok(payload) => Ok(normalize_file_list(&payload)),
            Err(error) if matches!(error.kind(), FailureKind::Network | FailureKind::Shape) => {
                warn!(
                    "File listing unavailable ({}), returning an empty list: {error}",
                    error.error_category()
                );
                Ok(FileList::empty())
            }
            Err(error) => Err(error),
        }
    }
}
