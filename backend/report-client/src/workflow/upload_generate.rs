//! Upload a document, then generate its report.
//!
//! ```text
//! Idle -> Uploading -> Generating -> Succeeded(report_id)
//!            |             |
//!            +-------------+--> Failed { step, error, file_id }
//! ```
//!
//! A completed upload is never rolled back. If generation fails the
//! uploaded file id stays in the `Failed` state and
//! [`UploadAndGenerate::retry_generation`] reruns only the second step.

use super::flow_cell::FlowCell;
use crate::api::ApiClient;
use crate::error::ClientError;

use models::{FileUploadBuilder, GeneratedReport};

use std::fmt::{Display, Formatter, Result as FormatResult};

use log::{info, warn};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStep {
    Upload,
    Generate,
}

impl Display for UploadStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatResult {
        match self {
            UploadStep::Upload => write!(f, "upload"),
            UploadStep::Generate => write!(f, "generate"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum UploadFlowState {
    #[default]
    Idle,
    Uploading,
    Generating {
        file_id: String,
    },
    Succeeded(GeneratedReport),
    Failed {
        step: UploadStep,
        error: ClientError,
        /// Id of the document if the upload itself completed.
        file_id: Option<String>,
    },
}

impl UploadFlowState {
    pub fn tag(&self) -> &'static str {
        match self {
            UploadFlowState::Idle => "idle",
            UploadFlowState::Uploading => "uploading",
            UploadFlowState::Generating { .. } => "generating",
            UploadFlowState::Succeeded(_) => "succeeded",
            UploadFlowState::Failed { .. } => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            UploadFlowState::Succeeded(_) | UploadFlowState::Failed { .. }
        )
    }

    /// A run is uploading or generating.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            UploadFlowState::Uploading | UploadFlowState::Generating { .. }
        )
    }
}

pub struct UploadAndGenerate {
    api: ApiClient,
    cell: FlowCell<UploadFlowState>,
}

impl UploadAndGenerate {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cell: FlowCell::new(UploadFlowState::Idle),
        }
    }

    pub fn state(&self) -> UploadFlowState {
        self.cell.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<UploadFlowState> {
        self.cell.subscribe()
    }

    pub fn last_error(&self) -> Option<ClientError> {
        match self.cell.snapshot() {
            UploadFlowState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// The generated report to navigate to, once the flow has succeeded.
    pub fn outcome(&self) -> Option<GeneratedReport> {
        match self.cell.snapshot() {
            UploadFlowState::Succeeded(generated) => Some(generated),
            _ => None,
        }
    }

    /// Id of a document uploaded by this flow that has no report yet.
    pub fn uploaded_file_id(&self) -> Option<String> {
        match self.cell.snapshot() {
            UploadFlowState::Generating { file_id } => Some(file_id),
            UploadFlowState::Failed { file_id, .. } => file_id,
            _ => None,
        }
    }

    /// Validate, upload and generate. Returns the state this run ended in;
    /// if a newer run superseded it, that state was not published.
    ///
    /// A builder that fails validation never starts a run: its `Failed`
    /// state is returned, and only published when no run is in flight.
    pub async fn run(&self, upload: FileUploadBuilder) -> UploadFlowState {
        let upload = match upload.build() {
            Ok(upload) => upload,
            Err(e) => {
                return self.reject(UploadFlowState::Failed {
                    step: UploadStep::Upload,
                    error: ClientError::from(e),
                    file_id: None,
                });
            }
        };

        let ticket = self.cell.begin(UploadFlowState::Uploading);
        info!("Upload flow #{ticket}: uploading {}", upload.filename());

        let uploaded = match self.api.upload(&upload).await {
            Ok(uploaded) => uploaded,
            Err(error) => {
                return self.settle(
                    ticket,
                    UploadFlowState::Failed {
                        step: UploadStep::Upload,
                        error,
                        file_id: None,
                    },
                );
            }
        };

        let generating = UploadFlowState::Generating {
            file_id: uploaded.file_id.clone(),
        };
        if !self.cell.publish(ticket, generating.clone()) {
            return generating;
        }

        self.generate(ticket, uploaded.file_id).await
    }

    /// Rerun generation for the document a failed run already uploaded.
    pub async fn retry_generation(&self) -> UploadFlowState {
        let Some(file_id) = self.uploaded_file_id() else {
            return self.reject(UploadFlowState::Failed {
                step: UploadStep::Generate,
                error: ClientError::user_input("No uploaded document to generate a report for"),
                file_id: None,
            });
        };

        let ticket = self.cell.begin(UploadFlowState::Generating {
            file_id: file_id.clone(),
        });
        self.generate(ticket, file_id).await
    }

    async fn generate(&self, ticket: u64, file_id: String) -> UploadFlowState {
        info!("Upload flow #{ticket}: generating report for file {file_id}");

        let next = match self.api.generate_report(&file_id, None, None).await {
            Ok(generated) => UploadFlowState::Succeeded(generated),
            Err(error) => UploadFlowState::Failed {
                step: UploadStep::Generate,
                error,
                file_id: Some(file_id),
            },
        };
        self.settle(ticket, next)
    }

    fn reject(&self, state: UploadFlowState) -> UploadFlowState {
        if let UploadFlowState::Failed { step, error, .. } = &state {
            warn!("Upload flow: {step} rejected: {error}");
        }
        self.cell.reject(state.clone(), UploadFlowState::is_in_flight);
        state
    }

    fn settle(&self, ticket: u64, state: UploadFlowState) -> UploadFlowState {
        match &state {
            UploadFlowState::Succeeded(generated) => {
                info!("Upload flow #{ticket}: report {} ready", generated.report_id)
            }
            UploadFlowState::Failed { step, error, .. } => {
                warn!("Upload flow #{ticket}: {step} step failed: {error}")
            }
            _ => {}
        }
        self.cell.publish(ticket, state.clone());
        state
    }
}
