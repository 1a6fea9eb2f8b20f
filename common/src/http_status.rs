//! HTTP status code utilities for error classification.

/// HTTP status code returned by the report service.
///
/// Stored directly rather than parsed from error messages. Its presence on
/// an error means the server answered, which makes the failure terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpStatusCode(pub u16);

impl HttpStatusCode {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    /// 4xx client errors.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// 5xx server errors.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }

    /// Short label used in log lines.
    pub fn category(&self) -> &'static str {
        if self.is_success() {
            "success"
        } else if self.is_client_error() {
            "client_error"
        } else if self.is_server_error() {
            "server_error"
        } else {
            "unexpected_status"
        }
    }
}

impl From<u16> for HttpStatusCode {
    fn from(code: u16) -> Self {
        HttpStatusCode(code)
    }
}

impl std::fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
