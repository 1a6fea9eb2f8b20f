use super::{
    ApiClient, REPORT_COMPARE_ENDPOINT, REPORT_ENDPOINT, REPORT_GENERATE_ENDPOINT,
    REPORT_LIST_ENDPOINT, degrade_shape, optional_fields, path_segment,
};
use crate::error::ClientError;
use crate::normalizer::{
    normalize_acknowledgement, normalize_comparison, normalize_generated, normalize_report,
    normalize_report_list,
};
use crate::transport::RequestOptions;

use models::{Acknowledgement, ComparisonResult, GeneratedReport, Report};

use reqwest::Method;
use serde_json::{Value, json};

impl ApiClient {
    /// Ask the service to generate a report for an uploaded document.
    pub async fn generate_report(
        &self,
        file_id: &str,
        prompt: Option<&str>,
        model_id: Option<&str>,
    ) -> Result<GeneratedReport, ClientError> {
        let file_id = path_segment(file_id, "file_id")?;

        let mut body = optional_fields(&[("prompt", prompt), ("model_id", model_id)]);
        body.insert(String::from("file_id"), Value::from(file_id));

        let payload = self
            .call_json(
                Method::POST,
                REPORT_GENERATE_ENDPOINT,
                RequestOptions::default().json(Value::Object(body)),
            )
            .await?;

        normalize_generated(&payload)
    }

    pub async fn report(&self, report_id: &str) -> Result<Report, ClientError> {
        let report_id = path_segment(report_id, "report_id")?;
        let path = format!("{REPORT_ENDPOINT}/{report_id}");

        let payload = degrade_shape(
            self.call_json(Method::GET, &path, RequestOptions::default())
                .await,
            "report",
        )?;

        Ok(with_requested_id(normalize_report(&payload), report_id))
    }

    pub async fn update_report(
        &self,
        report_id: &str,
        content: &str,
    ) -> Result<Acknowledgement, ClientError> {
        let report_id = path_segment(report_id, "report_id")?;
        let path = format!("{REPORT_ENDPOINT}/{report_id}");

        let payload = degrade_shape(
            self.call_json(
                Method::PUT,
                &path,
                RequestOptions::default().json(json!({ "content": content })),
            )
            .await,
            "update acknowledgement",
        )?;

        Ok(normalize_acknowledgement(&payload))
    }

    /// Regenerate a report; the returned report replaces the old one wholesale.
    pub async fn regenerate_report(
        &self,
        report_id: &str,
        prompt: Option<&str>,
        model_id: Option<&str>,
    ) -> Result<Report, ClientError> {
        let report_id = path_segment(report_id, "report_id")?;
        let path = format!("{REPORT_ENDPOINT}/{report_id}/regenerate");
        let body = optional_fields(&[("prompt", prompt), ("model_id", model_id)]);

        let payload = degrade_shape(
            self.call_json(
                Method::POST,
                &path,
                RequestOptions::default().json(Value::Object(body)),
            )
            .await,
            "regenerated report",
        )?;

        Ok(with_requested_id(normalize_report(&payload), report_id))
    }

    pub async fn reports(&self) -> Result<Vec<Report>, ClientError> {
        let payload = degrade_shape(
            self.call_json(Method::GET, REPORT_LIST_ENDPOINT, RequestOptions::default())
                .await,
            "report list",
        )?;
        Ok(normalize_report_list(&payload))
    }

    /// Generate a report for `model_id` from the same source as `report_id`.
    ///
    /// Unlike [`ApiClient::compare_models`], failures surface: the comparison
    /// workflow keeps its loaded data and reports which step failed.
    pub async fn compare_reports(
        &self,
        report_id: &str,
        model_id: &str,
    ) -> Result<ComparisonResult, ClientError> {
        let report_id = path_segment(report_id, "report_id")?;
        let model_id = model_id.trim();
        if model_id.is_empty() {
            return Err(ClientError::user_input("Select a model to compare against"));
        }

        let payload = degrade_shape(
            self.call_json(
                Method::POST,
                REPORT_COMPARE_ENDPOINT,
                RequestOptions::default()
                    .json(json!({ "report_id": report_id, "model_id": model_id })),
            )
            .await,
            "report comparison",
        )?;

        Ok(normalize_comparison(&payload))
    }
}

/// The path already names the report; use it when the payload omits its id.
fn with_requested_id(mut report: Report, report_id: &str) -> Report {
    if report.report_id.is_empty() {
        report.report_id = report_id.to_string();
    }
    report
}
