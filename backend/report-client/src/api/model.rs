use super::{ApiClient, MODEL_COMPARE_ENDPOINT, MODEL_LIST_ENDPOINT, degrade_shape};
use crate::error::ClientError;
use crate::normalizer::{normalize_comparison, normalize_model_list};
use crate::transport::RequestOptions;

use models::{ComparisonResult, Model};

use log::warn;
use reqwest::Method;
use serde_json::{Value, json};

const MIN_COMPARED_MODELS: usize = 2;
const MALFORMED_COMPARISON: &str = "The comparison response was empty or malformed";

impl ApiClient {
    pub async fn models(&self) -> Result<Vec<Model>, ClientError> {
        let payload = degrade_shape(
            self.call_json(Method::GET, MODEL_LIST_ENDPOINT, RequestOptions::default())
                .await,
            "model list",
        )?;
        Ok(normalize_model_list(&payload))
    }

    /// Generate reports for one document under several models.
    ///
    /// Only missing input is returned as an error. Every failure after the
    /// request is sent folds into [`ComparisonResult::failed`] so the
    /// comparison screen can render it.
    pub async fn compare_models(
        &self,
        file_id: &str,
        model_ids: &[String],
        prompt: Option<&str>,
    ) -> Result<ComparisonResult, ClientError> {
        let file_id = file_id.trim();
        if file_id.is_empty() || model_ids.len() < MIN_COMPARED_MODELS {
            return Err(ClientError::user_input(
                "Select a file and at least two models to compare",
            ));
        }

        let mut body = json!({ "file_id": file_id, "model_ids": model_ids });
        if let (Some(prompt), Value::Object(fields)) = (prompt, &mut body) {
            fields.insert(String::from("prompt"), Value::from(prompt));
        }

        let result = self
            .call_json(
                Method::POST,
                MODEL_COMPARE_ENDPOINT,
                RequestOptions::default().json(body),
            )
            .await;

        match result {
            Ok(payload @ Value::Object(_)) => Ok(normalize_comparison(&payload)),
            Ok(payload) => {
                warn!("Model comparison returned a non-object payload: {payload}");
                Ok(ComparisonResult::failed(MALFORMED_COMPARISON))
            }
            Err(error) => {
                warn!("Model comparison failed ({}): {error}", error.error_category());
                Ok(ComparisonResult::failed(error.user_message()))
            }
        }
    }
}
