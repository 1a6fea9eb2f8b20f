//! Multi-step workflows with observable state.
//!
//! Each flow publishes its state through a `tokio::sync::watch` channel.
//! Views read [`UploadAndGenerate::state`] / [`LoadAndCompare::state`] or
//! subscribe for changes; they never hold the futures driving the flow.
//!
//! # Superseded runs
//!
//! Every trigger takes a new ticket from the flow. A run only publishes
//! while its ticket is still the newest, so re-triggering a flow while an
//! earlier run is in flight discards the earlier run's late results.

pub(crate) mod flow_cell;
mod load_compare;
mod upload_generate;

pub use load_compare::{CompareCandidates, CompareFlowState, CompareStep, LoadAndCompare};
pub use upload_generate::{UploadAndGenerate, UploadFlowState, UploadStep};
