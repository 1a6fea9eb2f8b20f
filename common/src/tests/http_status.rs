use crate::HttpStatusCode;

/// **VALUE**: The status ranges drive the log category attached to every server failure.
///
/// **BUG THIS CATCHES**: An off-by-one on the range bounds would label a 500 as a client
/// error (or a 400 as a server error) in the request logs.
#[test]
fn given_boundary_codes_when_categorized_then_fall_in_expected_ranges() {
    assert_eq!(HttpStatusCode(200).category(), "success");
    assert_eq!(HttpStatusCode(299).category(), "success");
    assert_eq!(HttpStatusCode(400).category(), "client_error");
    assert_eq!(HttpStatusCode(499).category(), "client_error");
    assert_eq!(HttpStatusCode(500).category(), "server_error");
    assert_eq!(HttpStatusCode(599).category(), "server_error");
    assert_eq!(HttpStatusCode(302).category(), "unexpected_status");
}

#[test]
fn given_u16_when_converted_then_displays_bare_number() {
    let status = HttpStatusCode::from(404);

    assert!(status.is_client_error());
    assert!(!status.is_server_error());
    assert_eq!(status.to_string(), "404");
}
