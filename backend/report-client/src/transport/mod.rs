//! Configured HTTP transport for the report service.
//!
//! The single place that knows the base URL, default headers and request
//! timeout. Each request gets a short id so the request, response and error
//! log lines can be correlated; logging never changes the result.

mod request;

pub use request::{MultipartFile, RequestBody, RequestOptions, ResponseType};

use crate::config::ClientConfig;
use crate::error::{ClientError, ConfigError};

use common::ErrorLocation;

use std::panic::Location;

use log::{debug, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;
use uuid::Uuid;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Raw bytes plus the headers needed to interpret them.
#[derive(Debug, Clone)]
pub struct BinaryResponse {
    pub bytes: Vec<u8>,
    pub headers: HeaderMap,
}

#[derive(Debug, Clone)]
pub enum TransportResponse {
    Json(Value),
    Binary(BinaryResponse),
}

impl TransportResponse {
    #[track_caller]
    pub fn into_json(self) -> Result<Value, ClientError> {
        match self {
            TransportResponse::Json(value) => Ok(value),
            TransportResponse::Binary(_) => Err(ClientError::shape(
                "Expected a JSON response but the request asked for binary",
            )),
        }
    }

    #[track_caller]
    pub fn into_binary(self) -> Result<BinaryResponse, ClientError> {
        match self {
            TransportResponse::Binary(binary) => Ok(binary),
            TransportResponse::Json(_) => Err(ClientError::shape(
                "Expected a binary response but the request asked for JSON",
            )),
        }
    }
}

#[derive(Clone)]
pub struct Transport {
    base_url: Url,
    client: Client,
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl Transport {
    #[track_caller]
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let base_url =
            Url::parse(&config.normalized_base_url()).map_err(|e| ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid base URL {}: {e}", config.base_url),
            })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::ClientBuild {
                location: ErrorLocation::from(Location::caller()),
                reason: e.to_string(),
            })?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn get(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<TransportResponse, ClientError> {
        self.send(Method::GET, path, options).await
    }

    pub async fn post(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<TransportResponse, ClientError> {
        self.send(Method::POST, path, options).await
    }

    pub async fn put(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<TransportResponse, ClientError> {
        self.send(Method::PUT, path, options).await
    }

    /// Resolve a service path against the base URL. A leading `/` is ignored
    /// so `/report/list` and `report/list` both stay under the base path.
    pub fn url_for(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<TransportResponse, ClientError> {
        let url = self.url_for(path)?;
        let request_id = Uuid::new_v4().simple().to_string();
        let request_id = &request_id[..8];

        debug!("[{request_id}] {method} {url}");

        let RequestOptions {
            body,
            query,
            response_type,
        } = options;

        let mut request = self.client.request(method.clone(), url.clone());
        if !query.is_empty() {
            request = request.query(&query);
        }
        request = match body {
            Some(RequestBody::Json(value)) => request.json(&value),
            Some(RequestBody::Multipart { file, fields }) => {
                request.multipart(build_form(file, fields)?)
            }
            None => request,
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let error = ClientError::from_reqwest(&e);
                warn!(
                    "[{request_id}] {method} {url} failed ({}): {error}",
                    error.error_category()
                );
                return Err(error);
            }
        };

        let status = response.status();
        debug!("[{request_id}] {method} {url} -> {}", status.as_u16());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = ClientError::from_http_response(status.as_u16(), &body);
            warn!(
                "[{request_id}] {method} {url} failed ({}): {error}",
                error.error_category()
            );
            return Err(error);
        }

        match response_type {
            ResponseType::Json => {
                let bytes = response.bytes().await.inspect_err(|e| {
                    warn!("[{request_id}] failed reading body from {url}: {e}");
                })?;
                if bytes.iter().all(u8::is_ascii_whitespace) {
                    return Ok(TransportResponse::Json(Value::Null));
                }
                let value = serde_json::from_slice(&bytes).inspect_err(|e| {
                    warn!("[{request_id}] response from {url} is not JSON: {e}");
                })?;
                Ok(TransportResponse::Json(value))
            }
            ResponseType::Binary => {
                let headers = response.headers().clone();
                let bytes = response.bytes().await.inspect_err(|e| {
                    warn!("[{request_id}] failed reading body from {url}: {e}");
                })?;
                Ok(TransportResponse::Binary(BinaryResponse {
                    bytes: bytes.to_vec(),
                    headers,
                }))
            }
        }
    }
}

fn build_form(file: MultipartFile, fields: Vec<(String, String)>) -> Result<Form, ClientError> {
    let mut part = Part::bytes(file.bytes).file_name(file.filename);
    if let Some(content_type) = file.content_type {
        part = part.mime_str(&content_type)?;
    }

    let mut form = Form::new().part(file.field, part);
    for (name, value) in fields {
        form = form.text(name, value);
    }
    Ok(form)
}
