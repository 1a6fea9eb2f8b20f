//! Error types for calls against the report service.
//!
//! Key design decisions:
//! - A failure is classified once, where it is created, never by inspecting
//!   message text afterwards
//! - HTTP status codes are stored directly on `Server` failures
//! - Only failures without a status code are retryable
//! - All errors include ErrorLocation, captured through `#[track_caller]`

use common::{ErrorLocation, HttpStatusCode};
use models::ModelError;

use std::fmt::{Display, Formatter, Result as FormatResult};
use std::panic::Location;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error as ThisError;

/// Coarse classification carried by every [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No response was received at all. Retryable.
    Network,
    /// The service answered with an error status. Terminal.
    Server,
    /// The service answered, but the payload could not be used.
    Shape,
    /// Rejected locally before any request was made.
    UserInput,
}

impl Display for FailureKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatResult {
        let label = match self {
            FailureKind::Network => "network",
            FailureKind::Server => "server",
            FailureKind::Shape => "shape",
            FailureKind::UserInput => "user_input",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, ThisError)]
pub enum ClientError {
    #[error("Network Error: {message} {location}")]
    Network {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("Server Error: HTTP {status_code} - {message} {location}")]
    Server {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Shape Error: {message} {location}")]
    Shape {
        message: String,
        location: ErrorLocation,
    },

    #[error("User Input Error: {message} {location}")]
    UserInput {
        message: String,
        location: ErrorLocation,
    },
}

impl ClientError {
    #[track_caller]
    pub fn network(message: impl Into<String>, is_timeout: bool, is_connection: bool) -> Self {
        ClientError::Network {
            message: message.into(),
            is_timeout,
            is_connection,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn shape(message: impl Into<String>) -> Self {
        ClientError::Shape {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn user_input(message: impl Into<String>) -> Self {
        ClientError::UserInput {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from an error status and the raw response body.
    ///
    /// The service reports failures as `{"error": "..."}`; that text is
    /// preferred over the raw body so views can show it as-is.
    #[track_caller]
    pub fn from_http_response(status_code: u16, body: &str) -> Self {
        ClientError::Server {
            status_code: HttpStatusCode(status_code),
            message: server_message(status_code, body),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from a reqwest error with proper categorization.
    #[track_caller]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        let location = ErrorLocation::from(Location::caller());

        // Check for specific error types BEFORE converting to string
        if error.is_decode() {
            return ClientError::Shape {
                message: error.to_string(),
                location,
            };
        }

        if error.is_builder() {
            return ClientError::UserInput {
                message: error.to_string(),
                location,
            };
        }

        if let Some(status) = error.status() {
            return ClientError::Server {
                status_code: HttpStatusCode(status.as_u16()),
                message: error.to_string(),
                location,
            };
        }

        ClientError::Network {
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            location,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::Network { .. } => FailureKind::Network,
            ClientError::Server { .. } => FailureKind::Server,
            ClientError::Shape { .. } => FailureKind::Shape,
            ClientError::UserInput { .. } => FailureKind::UserInput,
        }
    }

    /// Only failures that never reached the server are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Network { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Network { is_timeout: true, .. })
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Server { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }

    /// Message without location, suitable for an inline notice.
    pub fn user_message(&self) -> &str {
        match self {
            ClientError::Network { message, .. }
            | ClientError::Server { message, .. }
            | ClientError::Shape { message, .. }
            | ClientError::UserInput { message, .. } => message,
        }
    }

    /// Get error category for log lines.
    pub fn error_category(&self) -> &'static str {
        match self {
            ClientError::Network { is_timeout: true, .. } => "timeout",
            ClientError::Network { is_connection: true, .. } => "connection",
            ClientError::Network { .. } => "network",
            ClientError::Server { status_code, .. } => status_code.category(),
            ClientError::Shape { .. } => "shape",
            ClientError::UserInput { .. } => "user_input",
        }
    }
}

fn server_message(status_code: u16, body: &str) -> String {
    if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message"] {
            if let Some(Value::String(text)) = fields.get(key) {
                if !text.trim().is_empty() {
                    return text.clone();
                }
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    StatusCode::from_u16(status_code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("Unknown status")
        .to_string()
}

impl From<reqwest::Error> for ClientError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        ClientError::from_reqwest(&error)
    }
}

impl From<url::ParseError> for ClientError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ClientError::UserInput {
            message: format!("Invalid request path: {error}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ClientError::Shape {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ModelError> for ClientError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        ClientError::UserInput {
            message: error.message().to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
