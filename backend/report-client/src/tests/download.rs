// Unit tests for content-disposition parsing

use crate::api::filename_from_content_disposition;

#[test]
fn given_quoted_filename_when_parsing_then_returns_name() {
    assert_eq!(
        filename_from_content_disposition(r#"attachment; filename="report-r1.pdf""#),
        Some(String::from("report-r1.pdf"))
    );
}

#[test]
fn given_unquoted_filename_when_parsing_then_stops_at_semicolon() {
    assert_eq!(
        filename_from_content_disposition("attachment; filename=report.md; size=42"),
        Some(String::from("report.md"))
    );
}

#[test]
fn given_single_quoted_filename_when_parsing_then_returns_name() {
    assert_eq!(
        filename_from_content_disposition("attachment; filename='summary.txt'"),
        Some(String::from("summary.txt"))
    );
}

#[test]
fn given_extended_filename_when_parsing_then_strips_charset_prefix() {
    assert_eq!(
        filename_from_content_disposition("attachment; filename*=UTF-8''annual.pdf"),
        Some(String::from("annual.pdf"))
    );
}

/// **VALUE**: Verifies directory components never survive parsing.
///
/// **WHY THIS MATTERS**: The name is joined onto a download directory; a
/// `../` prefix would write outside it.
#[test]
fn given_path_in_filename_when_parsing_then_keeps_last_component() {
    assert_eq!(
        filename_from_content_disposition(r#"attachment; filename="../../etc/passwd""#),
        Some(String::from("passwd"))
    );
    assert_eq!(
        filename_from_content_disposition(r#"attachment; filename="C:\\tmp\\out.pdf""#),
        Some(String::from("out.pdf"))
    );
}

#[test]
fn given_no_usable_filename_when_parsing_then_none() {
    assert_eq!(filename_from_content_disposition("attachment"), None);
    assert_eq!(filename_from_content_disposition(r#"attachment; filename="""#), None);
    assert_eq!(filename_from_content_disposition(r#"attachment; filename="..""#), None);
}
