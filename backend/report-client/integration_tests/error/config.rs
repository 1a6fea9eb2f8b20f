use report_client::{ApiClient, ClientConfig, ConfigError, CoreError};

#[test]
fn given_base_url_without_host_when_building_client_then_validation_error() {
    let error = ApiClient::new(&ClientConfig::new("http://")).unwrap_err();

    match &error {
        ConfigError::ValidationError { reason, .. } => {
            assert!(reason.contains("Invalid base URL"));
        }
        other => panic!("expected ValidationError, got {other:?}"),
    }
}

#[test]
fn given_non_http_base_url_when_building_client_then_rejected() {
    let error = ApiClient::new(&ClientConfig::new("ftp://reports.example.com")).unwrap_err();

    assert!(error.to_string().starts_with("Config Validation Error: Invalid URL format"));
}

#[test]
fn given_config_error_when_wrapped_then_display_is_transparent() {
    let error: CoreError = ApiClient::new(&ClientConfig::new("")).unwrap_err().into();

    assert!(error.to_string().contains("base_url cannot be empty"));
}
