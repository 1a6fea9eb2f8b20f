//! Shared error plumbing for the report client workspace.
//!
//! Every error type in the workspace records where it was raised through
//! [`ErrorLocation`], and HTTP failures carry an [`HttpStatusCode`] instead
//! of a status parsed back out of a message string.

pub mod error;
pub mod http_status;

pub use error::error_location::ErrorLocation;
pub use http_status::HttpStatusCode;

#[cfg(test)]
mod tests;
