// Unit tests for merger module

use crate::merger::{ComparisonView, DisplayPair, pair_up};

use models::{ComparisonResult, ModelOutput, NO_ANALYSIS_AVAILABLE};

fn output(model_id: &str) -> ModelOutput {
    ModelOutput {
        model_id: model_id.to_string(),
        model_name: model_id.to_uppercase(),
        content: format!("# {model_id}"),
        ..ModelOutput::default()
    }
}

#[test]
fn given_no_items_when_pairing_then_no_rows() {
    let rows: Vec<DisplayPair<u32>> = pair_up(&[]);
    assert!(rows.is_empty());
}

#[test]
fn given_single_item_when_pairing_then_one_row_without_right() {
    assert_eq!(
        pair_up(&["a"]),
        vec![DisplayPair {
            left: "a",
            right: None
        }]
    );
}

/// **VALUE**: Verifies rows are formed strictly by position.
///
/// **BUG THIS CATCHES**: Pairing by model id or sorting before pairing would
/// move outputs between rows.
#[test]
fn given_even_count_when_pairing_then_rows_follow_input_order() {
    let rows = pair_up(&[4, 3, 2, 1]);

    assert_eq!(
        rows,
        vec![
            DisplayPair {
                left: 4,
                right: Some(3)
            },
            DisplayPair {
                left: 2,
                right: Some(1)
            },
        ]
    );
}

#[test]
fn given_odd_count_when_pairing_then_only_last_row_lacks_right() {
    let rows = pair_up(&[1, 2, 3, 4, 5]);

    assert_eq!(rows.len(), 3);
    assert!(rows[..2].iter().all(|row| row.right.is_some()));
    assert_eq!(
        rows[2],
        DisplayPair {
            left: 5,
            right: None
        }
    );
}

#[test]
fn given_result_when_building_view_then_rows_and_analysis_carried() {
    let result = ComparisonResult {
        comparisons: vec![output("m1"), output("m2"), output("m3")],
        analysis: Some(String::from("m2 is shorter")),
        error: None,
    };

    let view = ComparisonView::from_result(&result);

    assert_eq!(view.outputs.len(), 3);
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[0].left.model_id, "m1");
    assert_eq!(view.rows[0].right.as_ref().map(|o| o.model_id.as_str()), Some("m2"));
    assert_eq!(view.rows[1].left.model_id, "m3");
    assert!(view.rows[1].right.is_none());
    assert_eq!(view.analysis, "m2 is shorter");
    assert!(view.error.is_none());
}

#[test]
fn given_fallback_result_when_building_view_then_empty_with_error() {
    let view = ComparisonView::from_result(&ComparisonResult::failed("HTTP 500"));

    assert!(view.is_empty());
    assert!(view.rows.is_empty());
    assert_eq!(view.analysis, "Comparison failed: HTTP 500");
    assert_eq!(view.error.as_deref(), Some("HTTP 500"));
}

#[test]
fn given_missing_analysis_when_building_view_then_placeholder_shown() {
    let result = ComparisonResult {
        comparisons: vec![output("m1")],
        ..ComparisonResult::default()
    };

    assert_eq!(ComparisonView::from_result(&result).analysis, NO_ANALYSIS_AVAILABLE);
}
