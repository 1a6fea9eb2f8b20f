use crate::{DocumentStatus, FileQuery};

#[test]
fn given_service_status_strings_when_mapped_then_known_values_are_recognized() {
    assert_eq!(DocumentStatus::from_service("pending"), DocumentStatus::Uploaded);
    assert_eq!(DocumentStatus::from_service("uploaded"), DocumentStatus::Uploaded);
    assert_eq!(DocumentStatus::from_service("Processing"), DocumentStatus::Processing);
    assert_eq!(DocumentStatus::from_service("completed"), DocumentStatus::Completed);
    assert_eq!(DocumentStatus::from_service("error"), DocumentStatus::Failed);
    assert_eq!(DocumentStatus::from_service("failed"), DocumentStatus::Failed);
    assert_eq!(DocumentStatus::from_service("archived"), DocumentStatus::Uploaded);
}

/// **VALUE**: Unset filters must not leak into the query string.
///
/// **BUG THIS CATCHES**: Sending `limit=` or `category=` with empty values makes the
/// service filter on an empty category and return nothing.
#[test]
fn given_partial_query_when_converted_then_only_set_pairs_are_emitted() {
    let pairs = FileQuery::default().with_limit(10).to_query_pairs();

    assert_eq!(pairs, vec![(String::from("limit"), String::from("10"))]);
}

#[test]
fn given_full_query_when_converted_then_pairs_follow_documented_order() {
    let pairs = FileQuery::default()
        .with_last_key("cursor-1")
        .with_category("meeting")
        .with_limit(50)
        .to_query_pairs();

    let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["category", "limit", "last_key"]);
}
