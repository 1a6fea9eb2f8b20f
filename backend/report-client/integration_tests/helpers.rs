//! Test helpers for report service integration tests.
//!
//! - A wiremock server standing in for the report service
//! - Clients with short retry delays so exhausted retries stay fast
//! - A base URL nothing listens on, for network failures

use report_client::retry::RetryPolicy;
use report_client::{ApiClient, ClientConfig, ClientError};

use std::net::TcpListener;
use std::time::Duration;

use wiremock::MockServer;

/// Path prefix every service route lives under.
pub const API_PREFIX: &str = "/api";

/// Network-only policy with millisecond delays.
pub fn fast_policy(max_retries: u32) -> RetryPolicy<ClientError> {
    RetryPolicy::network_only(max_retries).with_schedule(
        Duration::from_millis(10),
        Duration::from_millis(40),
        2.0,
    )
}

pub fn config_for(base_url: &str) -> ClientConfig {
    ClientConfig::new(format!("{base_url}{API_PREFIX}")).with_timeout_secs(5)
}

pub fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&config_for(&server.uri()))
        .expect("client should build")
        .with_policy(fast_policy(2))
}

/// Client whose requests time out after one second.
pub fn impatient_client_for(server: &MockServer, max_retries: u32) -> ApiClient {
    ApiClient::new(&config_for(&server.uri()).with_timeout_secs(1))
        .expect("client should build")
        .with_policy(fast_policy(max_retries))
}

/// Client pointed at a local port that was just released, so every
/// connection is refused.
pub fn unreachable_client(max_retries: u32) -> ApiClient {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);

    ApiClient::new(&config_for(&format!("http://127.0.0.1:{port}")))
        .expect("client should build")
        .with_policy(fast_policy(max_retries))
}

pub fn api_path(route: &str) -> String {
    format!("{API_PREFIX}/{route}")
}

pub async fn received_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or_default()
}
