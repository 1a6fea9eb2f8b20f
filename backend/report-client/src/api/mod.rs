//! Typed operations against the report service.
//!
//! [`ApiClient`] is built once from [`ClientConfig`] and passed to whatever
//! needs it; it is cheap to clone. Every call runs through [`with_retry`]
//! and every payload through the normalizer before it is returned.

mod download;
mod files;
mod model;
mod report;
mod upload;

pub use download::{ReportDownload, filename_from_content_disposition};

use crate::config::ClientConfig;
use crate::error::{ClientError, ConfigError, FailureKind};
use crate::retry::{RetryPolicy, with_retry};
use crate::transport::{RequestOptions, Transport, TransportResponse};

use const_format::concatcp;
use log::warn;
use reqwest::Method;
use serde_json::{Map, Value};

const UPLOAD_ENDPOINT: &str = "upload";
const CATEGORIES_ENDPOINT: &str = concatcp!(UPLOAD_ENDPOINT, "/categories");
const REPORT_ENDPOINT: &str = "report";
const REPORT_GENERATE_ENDPOINT: &str = concatcp!(REPORT_ENDPOINT, "/generate");
const REPORT_LIST_ENDPOINT: &str = concatcp!(REPORT_ENDPOINT, "/list");
const REPORT_COMPARE_ENDPOINT: &str = concatcp!(REPORT_ENDPOINT, "/compare");
const FILES_ENDPOINT: &str = "files";
const MODEL_ENDPOINT: &str = "model";
const MODEL_LIST_ENDPOINT: &str = concatcp!(MODEL_ENDPOINT, "/list");
const MODEL_COMPARE_ENDPOINT: &str = concatcp!(MODEL_ENDPOINT, "/compare");

#[derive(Clone, Debug)]
pub struct ApiClient {
    transport: Transport,
    policy: RetryPolicy<ClientError>,
    page_limit: u32,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            transport: Transport::new(config)?,
            policy: RetryPolicy::from_settings(&config.retry),
            page_limit: config.files.page_limit,
        })
    }

    /// Replace the retry policy, e.g. to shorten delays.
    pub fn with_policy(mut self, policy: RetryPolicy<ClientError>) -> Self {
        self.policy = policy;
        self
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn policy(&self) -> &RetryPolicy<ClientError> {
        &self.policy
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<TransportResponse, ClientError> {
        with_retry(&self.policy, || {
            let method = method.clone();
            let options = options.clone();
            async move { self.transport.send(method, path, options).await }
        })
        .await
    }

    async fn call_json(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, ClientError> {
        self.call(method, path, options).await?.into_json()
    }
}

/// Undecodable bodies become `Null`, which every total normalizer maps to
/// its empty shape.
fn degrade_shape(result: Result<Value, ClientError>, what: &str) -> Result<Value, ClientError> {
    match result {
        Err(error) if error.kind() == FailureKind::Shape => {
            warn!("Unusable {what} payload, falling back to an empty value: {error}");
            Ok(Value::Null)
        }
        other => other,
    }
}

/// Validate an identifier that is interpolated into a path segment.
#[track_caller]
fn path_segment<'a>(id: &'a str, what: &str) -> Result<&'a str, ClientError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ClientError::user_input(format!("{what} is required")));
    }
    if id.contains(['/', '\\', '?', '#']) {
        return Err(ClientError::user_input(format!(
            "{what} contains characters not allowed in a path: {id}"
        )));
    }
    // URL joining resolves these (and their %2e spellings) as dot segments.
    let decoded = id.to_ascii_lowercase().replace("%2e", ".");
    if decoded == "." || decoded == ".." {
        return Err(ClientError::user_input(format!(
            "{what} is not a valid identifier: {id}"
        )));
    }
    Ok(id)
}

/// JSON object containing only the options that are set.
fn optional_fields(fields: &[(&str, Option<&str>)]) -> Map<String, Value> {
    fields
        .iter()
        .filter_map(|(key, value)| value.map(|v| ((*key).to_string(), Value::from(v))))
        .collect()
}
