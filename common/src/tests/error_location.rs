use crate::ErrorLocation;
use std::panic::Location;

#[track_caller]
fn capture_location() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

/// **VALUE**: Verifies that `ErrorLocation::from()` records the call site, not the helper.
///
/// **WHY THIS MATTERS**: Every client error prints this location. If it pointed at the
/// constructor instead of the failing call, all transport and workflow errors would look
/// like they came from the same line.
#[test]
fn given_track_caller_helper_when_capturing_location_then_reports_call_site() {
    let location = capture_location();

    assert!(location.file.contains("error_location.rs"));
    assert!(location.line > 0);
    assert!(location.column > 0);
}

#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    let location = capture_location();

    let formatted = format!("{}", location);

    assert!(formatted.starts_with('['), "Should start with '['");
    assert!(formatted.ends_with(']'), "Should end with ']'");
    assert!(formatted.contains(&location.line.to_string()));
    assert_eq!(
        formatted.matches(':').count(),
        2,
        "Should have exactly 2 colons"
    );
}

#[test]
fn given_multiple_call_sites_when_capturing_location_then_lines_are_sequential() {
    let first = capture_location();
    let second = capture_location();

    assert_eq!(first.file, second.file);
    assert_eq!(first.line + 1, second.line, "Lines should be sequential");
}
