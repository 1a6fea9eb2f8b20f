// Unit tests for model and category normalization

use crate::normalizer::{normalize_categories, normalize_model, normalize_model_list};

use models::UNKNOWN_PLACEHOLDER;

use serde_json::{Value, json};

#[test]
fn given_bare_array_when_normalizing_models_then_all_kept_in_order() {
    let models = normalize_model_list(&json!([
        { "id": "m1", "name": "Claude", "provider": "anthropic" },
        { "id": "m2", "name": "GPT" },
        "m3"
    ]));

    let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m1", "m2", "m3"]);
    assert_eq!(models[0].provider, "anthropic");
    assert_eq!(models[2].name, "m3");
}

#[test]
fn given_wrapped_list_when_normalizing_models_then_items_used() {
    assert_eq!(normalize_model_list(&json!({ "items": [{ "id": "m1", "name": "A" }] })).len(), 1);
    assert_eq!(normalize_model_list(&json!({ "models": [{ "id": "m1", "name": "A" }] })).len(), 1);
}

/// **VALUE**: Verifies entries missing an id or name are kept with a
/// placeholder instead of being dropped.
///
/// **BUG THIS CATCHES**: A model silently vanishing from the picker.
#[test]
fn given_incomplete_entry_when_normalizing_model_then_placeholder_used() {
    let model = normalize_model(&json!({ "name": "Mystery" }));

    assert_eq!(model.id, UNKNOWN_PLACEHOLDER);
    assert_eq!(model.name, "Mystery");

    let model = normalize_model(&json!({ "model_id": "m7" }));
    assert_eq!(model.id, "m7");
    assert_eq!(model.name, UNKNOWN_PLACEHOLDER);
}

#[test]
fn given_malformed_payload_when_normalizing_models_then_empty() {
    assert!(normalize_model_list(&Value::Null).is_empty());
    assert!(normalize_model_list(&json!({})).is_empty());
    assert!(normalize_model_list(&json!({ "items": {} })).is_empty());
}

#[test]
fn given_category_shapes_when_normalizing_then_ids_and_names_kept() {
    let categories = normalize_categories(&json!([
        { "id": "finance", "name": "Finance" },
        "legal"
    ]));

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].id, "finance");
    assert_eq!(categories[0].name, "Finance");
    assert_eq!(categories[1].id, "legal");
    assert_eq!(categories[1].name, "legal");
    assert!(normalize_categories(&json!("finance")).is_empty());
}
