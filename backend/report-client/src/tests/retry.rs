// Unit tests for retry module
// Time is paused, so backoff sleeps complete instantly but still advance the clock

use crate::error::ClientError;
use crate::retry::{RetryPolicy, with_retry};

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

fn network_failure() -> ClientError {
    ClientError::network("connection refused", false, true)
}

fn server_failure() -> ClientError {
    ClientError::from_http_response(500, r#"{"error": "boom"}"#)
}

/// **VALUE**: Verifies the default schedule is exactly 1s, 2s, 4s, 8s, 10s.
///
/// **WHY THIS MATTERS**: Jitter or a wrong multiplier would make retry timing
/// unpredictable for views that show a "retrying" notice.
///
/// **BUG THIS CATCHES**: Randomization left at the backoff crate's default of 0.5.
#[test]
fn given_default_schedule_when_listing_delays_then_doubles_up_to_cap() {
    let policy = RetryPolicy::network_only(5);

    let delays: Vec<u128> = policy.delays().iter().map(Duration::as_millis).collect();

    assert_eq!(delays, vec![1_000, 2_000, 4_000, 8_000, 10_000]);
}

#[test]
fn given_zero_retries_when_listing_delays_then_empty() {
    assert!(RetryPolicy::network_only(0).delays().is_empty());
}

#[test]
fn given_client_errors_when_checking_retryable_then_only_network_qualifies() {
    let policy = RetryPolicy::network_only(3);

    assert!(policy.is_retryable(&network_failure()));
    assert!(policy.is_retryable(&ClientError::network("timed out", true, false)));
    assert!(!policy.is_retryable(&server_failure()));
    assert!(!policy.is_retryable(&ClientError::from_http_response(404, "")));
    assert!(!policy.is_retryable(&ClientError::shape("bad json")));
    assert!(!policy.is_retryable(&ClientError::user_input("missing file")));
}

/// **VALUE**: Verifies an operation that always fails on the network is
/// attempted `max_retries + 1` times with 1s, 2s, 4s between attempts.
///
/// **BUG THIS CATCHES**: Off-by-one in the retry bound, or sleeping before the
/// first attempt.
#[tokio::test(start_paused = true)]
async fn given_persistent_network_failure_when_retrying_then_attempts_four_times_with_backoff() {
    let policy = RetryPolicy::network_only(3);
    let attempts: Arc<Mutex<Vec<Instant>>> = Arc::new(Mutex::new(Vec::new()));

    let result: Result<(), ClientError> = with_retry(&policy, || {
        let attempts = Arc::clone(&attempts);
        async move {
            attempts.lock().unwrap().push(Instant::now());
            Err(network_failure())
        }
    })
    .await;

    let error = result.unwrap_err();
    assert!(error.is_retryable());

    let attempts = attempts.lock().unwrap();
    assert_eq!(attempts.len(), 4);
    let gaps: Vec<u128> = attempts
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).as_millis())
        .collect();
    assert_eq!(gaps, vec![1_000, 2_000, 4_000]);
}

/// **VALUE**: Verifies a server error is returned after exactly one attempt.
///
/// **WHY THIS MATTERS**: Retrying a 4xx/5xx repeats a request the service
/// already rejected, and delays the error by up to 15 seconds.
#[tokio::test(start_paused = true)]
async fn given_server_error_when_retrying_then_attempts_once() {
    let policy = RetryPolicy::network_only(3);
    let calls = AtomicU32::new(0);
    let started = Instant::now();

    let result: Result<(), ClientError> = with_retry(&policy, || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(server_failure()) }
    })
    .await;

    assert_eq!(result.unwrap_err().status_code(), Some(500));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn given_transient_failure_when_retrying_then_returns_later_success() {
    let policy = RetryPolicy::network_only(3);
    let calls = AtomicU32::new(0);

    let result = with_retry(&policy, || {
        let attempt = calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if attempt < 2 {
                Err(network_failure())
            } else {
                Ok("report")
            }
        }
    })
    .await;

    assert_eq!(result.unwrap(), "report");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn given_zero_retries_when_network_fails_then_attempts_once() {
    let policy = RetryPolicy::network_only(0);
    let calls = AtomicU32::new(0);

    let result: Result<(), ClientError> = with_retry(&policy, || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(network_failure()) }
    })
    .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn given_custom_predicate_when_retrying_then_policy_is_error_agnostic() {
    let policy: RetryPolicy<String> =
        RetryPolicy::new(2, |error: &String| error.starts_with("transient"))
            .with_schedule(Duration::from_millis(10), Duration::from_millis(10), 1.0);
    let calls = AtomicU32::new(0);

    let result: Result<(), String> = with_retry(&policy, || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(String::from("transient glitch")) }
    })
    .await;

    assert_eq!(result.unwrap_err(), "transient glitch");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}
