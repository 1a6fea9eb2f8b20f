use serde_json::Value;

/// How the response body should be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseType {
    #[default]
    Json,
    /// Raw bytes, e.g. report downloads.
    Binary,
}

/// File part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartFile {
    pub field: String,
    pub filename: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Multipart {
        file: MultipartFile,
        fields: Vec<(String, String)>,
    },
}

/// Per-request options. `Clone` so a retried attempt can resend the body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub(crate) body: Option<RequestBody>,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) response_type: ResponseType,
}

impl RequestOptions {
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn multipart(mut self, file: MultipartFile, fields: Vec<(String, String)>) -> Self {
        self.body = Some(RequestBody::Multipart { file, fields });
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn queries(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn binary(mut self) -> Self {
        self.response_type = ResponseType::Binary;
        self
    }

    pub fn response_type(&self) -> ResponseType {
        self.response_type
    }
}
