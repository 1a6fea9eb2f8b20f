//! Load a report and its alternative models, then compare on demand.
//!
//! ```text
//! Idle -> LoadingBase -> LoadingModels -> Ready <-> Comparing -> Succeeded
//!             |               |                        |
//!             +---------------+------------------------+--> Failed
//! ```
//!
//! A failed comparison keeps the loaded base report and candidate list, so
//! [`LoadAndCompare::compare`] can be retried without refetching.

use super::flow_cell::FlowCell;
use crate::api::ApiClient;
use crate::error::ClientError;
use crate::merger::ComparisonView;

use models::{ComparisonResult, Model, ModelOutput, Report};

use std::fmt::{Display, Formatter, Result as FormatResult};

use log::{info, warn};
use tokio::sync::watch;

const MIN_COMPARISON_OUTPUTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareStep {
    LoadBase,
    LoadModels,
    Compare,
}

impl Display for CompareStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatResult {
        match self {
            CompareStep::LoadBase => write!(f, "load report"),
            CompareStep::LoadModels => write!(f, "load models"),
            CompareStep::Compare => write!(f, "compare"),
        }
    }
}

/// Data a comparison is started from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareCandidates {
    pub base: Report,
    /// Available models other than the one that produced `base`.
    pub candidates: Vec<Model>,
    pub selected: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub enum CompareFlowState {
    #[default]
    Idle,
    LoadingBase {
        report_id: String,
    },
    LoadingModels {
        base: Report,
    },
    Ready(CompareCandidates),
    Comparing(CompareCandidates),
    Succeeded {
        candidates: CompareCandidates,
        comparison: ComparisonView,
    },
    Failed {
        step: CompareStep,
        error: ClientError,
        candidates: Option<CompareCandidates>,
    },
}

impl CompareFlowState {
    pub fn tag(&self) -> &'static str {
        match self {
            CompareFlowState::Idle => "idle",
            CompareFlowState::LoadingBase { .. } => "loading_base",
            CompareFlowState::LoadingModels { .. } => "loading_models",
            CompareFlowState::Ready(_) => "ready",
            CompareFlowState::Comparing(_) => "comparing",
            CompareFlowState::Succeeded { .. } => "succeeded",
            CompareFlowState::Failed { .. } => "failed",
        }
    }

    /// Loaded candidates, if this state carries them.
    pub fn candidates(&self) -> Option<&CompareCandidates> {
        match self {
            CompareFlowState::Ready(candidates)
            | CompareFlowState::Comparing(candidates)
            | CompareFlowState::Succeeded { candidates, .. } => Some(candidates),
            CompareFlowState::Failed { candidates, .. } => candidates.as_ref(),
            _ => None,
        }
    }

    /// A load or comparison is awaiting the server.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            CompareFlowState::LoadingBase { .. }
                | CompareFlowState::LoadingModels { .. }
                | CompareFlowState::Comparing(_)
        )
    }

    fn candidates_mut(&mut self) -> Option<&mut CompareCandidates> {
        match self {
            CompareFlowState::Ready(candidates)
            | CompareFlowState::Succeeded { candidates, .. } => Some(candidates),
            CompareFlowState::Failed { candidates, .. } => candidates.as_mut(),
            _ => None,
        }
    }
}

pub struct LoadAndCompare {
    api: ApiClient,
    cell: FlowCell<CompareFlowState>,
}

impl LoadAndCompare {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cell: FlowCell::new(CompareFlowState::Idle),
        }
    }

    pub fn state(&self) -> CompareFlowState {
        self.cell.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<CompareFlowState> {
        self.cell.subscribe()
    }

    pub fn last_error(&self) -> Option<ClientError> {
        match self.cell.snapshot() {
            CompareFlowState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn comparison(&self) -> Option<ComparisonView> {
        match self.cell.snapshot() {
            CompareFlowState::Succeeded { comparison, .. } => Some(comparison),
            _ => None,
        }
    }

    /// Fetch the base report, then the models it can be compared against.
    pub async fn load(&self, report_id: &str) -> CompareFlowState {
        let ticket = self.cell.begin(CompareFlowState::LoadingBase {
            report_id: report_id.to_string(),
        });
        info!("Compare flow #{ticket}: loading report {report_id}");

        let base = match self.api.report(report_id).await {
            Ok(base) => base,
            Err(error) => {
                return self.settle(ticket, failed(CompareStep::LoadBase, error, None));
            }
        };

        let loading_models = CompareFlowState::LoadingModels { base: base.clone() };
        if !self.cell.publish(ticket, loading_models.clone()) {
            return loading_models;
        }

        let models = match self.api.models().await {
            Ok(models) => models,
            Err(error) => {
                return self.settle(ticket, failed(CompareStep::LoadModels, error, None));
            }
        };

        let candidates = exclude_base_model(models, base.model_id.as_deref());
        if candidates.is_empty() {
            return self.settle(
                ticket,
                failed(
                    CompareStep::LoadModels,
                    ClientError::user_input("No other models available for comparison"),
                    None,
                ),
            );
        }

        let selected = candidates.first().map(|model| model.id.clone());
        self.settle(
            ticket,
            CompareFlowState::Ready(CompareCandidates {
                base,
                candidates,
                selected,
            }),
        )
    }

    /// Choose the model to compare against.
    ///
    /// # Errors
    /// Returns a `UserInput` error if nothing is loaded yet, a comparison is
    /// running, or the id is not one of the candidates.
    pub fn select_model(&self, model_id: &str) -> Result<(), ClientError> {
        let mut outcome = Err(ClientError::user_input(
            "No comparison candidates are loaded",
        ));

        self.cell.modify(|state| {
            if matches!(state, CompareFlowState::Comparing(_)) {
                outcome = Err(ClientError::user_input(
                    "A comparison is already in progress",
                ));
                return false;
            }
            let Some(loaded) = state.candidates_mut() else {
                return false;
            };
            if !loaded.candidates.iter().any(|model| model.id == model_id) {
                outcome = Err(ClientError::user_input(format!(
                    "Model {model_id} is not available for comparison"
                )));
                return false;
            }
            loaded.selected = Some(model_id.to_string());
            outcome = Ok(());
            true
        });

        outcome
    }

    /// Compare the base report against the selected model.
    ///
    /// Without loaded candidates or a selection nothing is started: the
    /// `Failed` state is returned, and only published when no load or
    /// comparison is in flight.
    pub async fn compare(&self) -> CompareFlowState {
        let Some(candidates) = self.cell.snapshot().candidates().cloned() else {
            return self.reject(failed(
                CompareStep::Compare,
                ClientError::user_input("Load a report before comparing"),
                None,
            ));
        };

        let Some(model_id) = candidates.selected.clone() else {
            return self.reject(failed(
                CompareStep::Compare,
                ClientError::user_input("Select a model to compare against"),
                Some(candidates),
            ));
        };

        let ticket = self.cell.begin(CompareFlowState::Comparing(candidates.clone()));
        let report_id = candidates.base.report_id.clone();
        info!("Compare flow #{ticket}: comparing report {report_id} against {model_id}");

        let result = match self.api.compare_reports(&report_id, &model_id).await {
            Ok(result) => result,
            Err(error) => {
                return self.settle(
                    ticket,
                    failed(CompareStep::Compare, error, Some(candidates)),
                );
            }
        };

        let outputs = merge_outputs(&candidates.base, &result);
        if outputs.len() < MIN_COMPARISON_OUTPUTS {
            let reason = result
                .error
                .clone()
                .unwrap_or_else(|| result.analysis_text().to_string());
            return self.settle(
                ticket,
                failed(
                    CompareStep::Compare,
                    ClientError::shape(format!("Comparison returned no alternate output: {reason}")),
                    Some(candidates),
                ),
            );
        }

        self.settle(
            ticket,
            CompareFlowState::Succeeded {
                comparison: ComparisonView::from_outputs(outputs, &result),
                candidates,
            },
        )
    }

    fn reject(&self, state: CompareFlowState) -> CompareFlowState {
        if let CompareFlowState::Failed { step, error, .. } = &state {
            warn!("Compare flow: {step} rejected: {error}");
        }
        self.cell.reject(state.clone(), CompareFlowState::is_in_flight);
        state
    }

    fn settle(&self, ticket: u64, state: CompareFlowState) -> CompareFlowState {
        match &state {
            CompareFlowState::Failed { step, error, .. } => {
                warn!("Compare flow #{ticket}: {step} step failed: {error}")
            }
            other => info!("Compare flow #{ticket}: {}", other.tag()),
        }
        self.cell.publish(ticket, state.clone());
        state
    }
}

fn failed(
    step: CompareStep,
    error: ClientError,
    candidates: Option<CompareCandidates>,
) -> CompareFlowState {
    CompareFlowState::Failed {
        step,
        error,
        candidates,
    }
}

/// Models other than the one that produced the base report (exact id match).
fn exclude_base_model(models: Vec<Model>, base_model_id: Option<&str>) -> Vec<Model> {
    models
        .into_iter()
        .filter(|model| Some(model.id.as_str()) != base_model_id)
        .collect()
}

/// Base report output first, then the alternates in arrival order. An
/// alternate from the base model would duplicate the left column.
fn merge_outputs(base: &Report, result: &ComparisonResult) -> Vec<ModelOutput> {
    let base_output = ModelOutput::from_report(base);
    let base_model_id = base_output.model_id.clone();
    let alternates = result
        .comparisons
        .iter()
        .filter(move |output| base_model_id.is_empty() || output.model_id != base_model_id)
        .cloned();

    std::iter::once(base_output).chain(alternates).collect()
}
