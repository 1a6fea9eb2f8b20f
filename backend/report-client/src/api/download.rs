use super::{ApiClient, REPORT_ENDPOINT, path_segment};
use crate::error::ClientError;
use crate::transport::RequestOptions;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::info;
use regex::Regex;
use reqwest::Method;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};

const DOWNLOAD_FORMAT: &str = "s3";
const FILENAME_PATTERN: &str = r#"(?i)filename[^;=\n]*=\s*(?:"([^"]*)"|'([^']*)'|([^;\n]*))"#;
const RFC5987_UTF8_PREFIX: &str = "UTF-8''";

static FILENAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn filename_regex() -> &'static Regex {
    FILENAME_REGEX.get_or_init(|| Regex::new(FILENAME_PATTERN).expect("valid regex pattern"))
}

/// A downloaded report file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDownload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ReportDownload {
    /// Write the file into `dir` under its own name and return the path.
    pub async fn save_into(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let name = Path::new(&self.filename).file_name().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Not a file name: {}", self.filename),
            )
        })?;
        let path = dir.join(name);
        tokio::fs::write(&path, &self.bytes).await?;
        info!("Saved {} bytes to {}", self.bytes.len(), path.display());
        Ok(path)
    }
}

/// Extract a bare file name from a `content-disposition` header value.
///
/// Quoted and unquoted values are accepted. Directory components are
/// stripped so the name is always safe to join onto a download directory.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let captures = filename_regex().captures(header)?;
    let raw = captures
        .get(1)
        .or_else(|| captures.get(2))
        .or_else(|| captures.get(3))?
        .as_str()
        .trim();

    let raw = raw.strip_prefix(RFC5987_UTF8_PREFIX).unwrap_or(raw);
    let name = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim_matches(['"', '\''])
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_string())
    }
}

impl ApiClient {
    pub async fn download_report(&self, report_id: &str) -> Result<ReportDownload, ClientError> {
        let report_id = path_segment(report_id, "report_id")?;
        let path = format!("{REPORT_ENDPOINT}/{report_id}/download");

        let binary = self
            .call(
                Method::GET,
                &path,
                RequestOptions::default()
                    .query("format", DOWNLOAD_FORMAT)
                    .binary(),
            )
            .await?
            .into_binary()?;

        let filename = binary
            .headers
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_content_disposition)
            .unwrap_or_else(|| format!("file_{report_id}"));

        let content_type = binary
            .headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Ok(ReportDownload {
            filename,
            content_type,
            bytes: binary.bytes,
        })
    }
}
