use crate::{FileUploadBuilder, ModelError};

/// **VALUE**: Verifies that a missing file is rejected before any upload is attempted.
///
/// **WHY THIS MATTERS**: The upload workflow relies on this validation to fail with a
/// user-input error instead of sending an empty multipart request to the service.
#[test]
fn given_no_file_when_building_upload_then_returns_validation_error() {
    let result = FileUploadBuilder::default().with_category("meeting").build();

    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "No file selected for upload");
        }
        Ok(upload) => panic!("expected validation error, got {upload:?}"),
    }
}

#[test]
fn given_no_category_when_building_upload_then_returns_validation_error() {
    let result = FileUploadBuilder::default()
        .with_file("report.txt", b"minutes".to_vec())
        .build();

    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "No file category selected");
        }
        Ok(upload) => panic!("expected validation error, got {upload:?}"),
    }
}

#[test]
fn given_empty_bytes_when_building_upload_then_names_the_file() {
    let result = FileUploadBuilder::default()
        .with_file("report.txt", Vec::new())
        .with_category("meeting")
        .build();

    let Err(ModelError::Validation { message, .. }) = result else {
        panic!("expected validation error");
    };
    assert!(message.contains("report.txt"));
}

#[test]
fn given_padded_fields_when_building_upload_then_trims_them() {
    let upload = FileUploadBuilder::default()
        .with_file("  report.txt ", b"minutes".to_vec())
        .with_category(" meeting")
        .with_content_type("text/plain")
        .build()
        .expect("valid upload");

    assert_eq!(upload.filename(), "report.txt");
    assert_eq!(upload.category(), "meeting");
    assert_eq!(upload.bytes(), b"minutes");
    assert_eq!(upload.content_type(), Some("text/plain"));
}

#[test]
fn given_whitespace_category_when_building_upload_then_rejects_it() {
    let result = FileUploadBuilder::default()
        .with_file("report.txt", b"minutes".to_vec())
        .with_category("   ")
        .build();

    assert!(matches!(result, Err(ModelError::Validation { .. })));
}
