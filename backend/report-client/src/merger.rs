//! Pairs comparison outputs into left/right display rows.

use models::{ComparisonResult, ModelOutput};

use serde::Serialize;

/// One display row: `left` is always present, `right` is empty only on the
/// final row of an odd-length input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayPair<T> {
    pub left: T,
    pub right: Option<T>,
}

/// Pair items strictly by position: row `k` holds `items[2k]` and
/// `items[2k + 1]`.
pub fn pair_up<T: Clone>(items: &[T]) -> Vec<DisplayPair<T>> {
    items
        .chunks(2)
        .map(|chunk| DisplayPair {
            left: chunk[0].clone(),
            right: chunk.get(1).cloned(),
        })
        .collect()
}

/// A comparison ready for the side-by-side screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonView {
    pub outputs: Vec<ModelOutput>,
    pub rows: Vec<DisplayPair<ModelOutput>>,
    pub analysis: String,
    pub error: Option<String>,
}

impl ComparisonView {
    pub fn from_result(result: &ComparisonResult) -> Self {
        Self::from_outputs(result.comparisons.clone(), result)
    }

    /// Build a view from an explicit output order, keeping the analysis and
    /// error of `result`.
    pub fn from_outputs(outputs: Vec<ModelOutput>, result: &ComparisonResult) -> Self {
        Self {
            rows: pair_up(&outputs),
            outputs,
            analysis: result.analysis_text().to_string(),
            error: result.error.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}
