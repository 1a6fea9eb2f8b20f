//! Domain models for the report client.
//!
//! Pure data structures for documents, reports, generation models and
//! comparisons. Shapes here are already normalized: the client's
//! normalizer repairs whatever the service sends before it reaches these
//! types, so callers never defend against missing arrays or alias fields.

pub mod category;
pub mod comparison;
pub mod document;
pub mod error;
pub mod model_info;
pub mod report;
pub mod upload;

pub use category::Category;
pub use common::ErrorLocation;
pub use comparison::{ComparisonResult, ModelOutput, NO_ANALYSIS_AVAILABLE};
pub use document::{Document, DocumentStatus, FileList, FileQuery};
pub use error::model_error::ModelError;
pub use model_info::{Model, UNKNOWN_PLACEHOLDER};
pub use report::{Acknowledgement, GeneratedReport, Report};
pub use upload::builder::FileUploadBuilder;
pub use upload::{FileUpload, UploadedFile};

#[cfg(test)]
mod tests;
