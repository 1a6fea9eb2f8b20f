//! Bounded retry with exponential backoff.
//!
//! [`with_retry`] knows nothing about HTTP. The policy decides which errors
//! are worth another attempt and how long to wait; for the report service
//! that is [`RetryPolicy::network_only`], which retries only failures that
//! never produced a response.

use crate::config::RetrySettings;
use crate::error::ClientError;

use std::fmt::Display;
use std::time::Duration;

use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;
use log::{debug, warn};
use tokio::time::sleep as TokioSleep;

const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(1_000);
const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(10_000);
const DEFAULT_MULTIPLIER: f64 = 2.0;

/// Retry bound, backoff schedule and retryable predicate for one error type.
pub struct RetryPolicy<E> {
    max_retries: u32,
    initial_delay: Duration,
    max_delay: Duration,
    multiplier: f64,
    retryable: fn(&E) -> bool,
}

impl<E> Clone for RetryPolicy<E> {
    fn clone(&self) -> Self {
        Self {
            max_retries: self.max_retries,
            initial_delay: self.initial_delay,
            max_delay: self.max_delay,
            multiplier: self.multiplier,
            retryable: self.retryable,
        }
    }
}

impl<E> std::fmt::Debug for RetryPolicy<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_retries", &self.max_retries)
            .field("initial_delay", &self.initial_delay)
            .field("max_delay", &self.max_delay)
            .field("multiplier", &self.multiplier)
            .finish()
    }
}

impl<E> RetryPolicy<E> {
    /// Policy with the default schedule: 1s doubling up to 10s.
    pub fn new(max_retries: u32, retryable: fn(&E) -> bool) -> Self {
        Self {
            max_retries,
            initial_delay: DEFAULT_INITIAL_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            multiplier: DEFAULT_MULTIPLIER,
            retryable,
        }
    }

    pub fn with_schedule(mut self, initial_delay: Duration, max_delay: Duration, multiplier: f64) -> Self {
        self.initial_delay = initial_delay;
        self.max_delay = max_delay;
        self.multiplier = multiplier;
        self
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn is_retryable(&self, error: &E) -> bool {
        (self.retryable)(error)
    }

    /// Fresh, jitter-free backoff schedule with no elapsed-time cap.
    pub fn schedule(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            current_interval: self.initial_delay,
            initial_interval: self.initial_delay,
            randomization_factor: 0.0,
            multiplier: self.multiplier,
            max_interval: self.max_delay,
            max_elapsed_time: None,
            ..Default::default()
        }
    }

    /// The delays slept before retry 1, 2, ... `max_retries`.
    pub fn delays(&self) -> Vec<Duration> {
        let mut schedule = self.schedule();
        (0..self.max_retries)
            .map_while(|_| schedule.next_backoff())
            .collect()
    }
}

impl RetryPolicy<ClientError> {
    /// Retries network-level failures only; anything with a status is terminal.
    pub fn network_only(max_retries: u32) -> Self {
        Self::new(max_retries, ClientError::is_retryable)
    }

    pub fn from_settings(settings: &RetrySettings) -> Self {
        Self::network_only(settings.max_retries).with_schedule(
            settings.initial_delay(),
            settings.max_delay(),
            settings.multiplier,
        )
    }
}

impl Default for RetryPolicy<ClientError> {
    fn default() -> Self {
        Self::network_only(DEFAULT_MAX_RETRIES)
    }
}

/// Run `operation` until it succeeds, fails terminally, or retries run out.
///
/// Attempts are strictly sequential. A retryable failure after the last
/// retry is returned unchanged, so the caller still sees its classification.
pub async fn with_retry<T, E, F, Fut>(policy: &RetryPolicy<E>, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut schedule = policy.schedule();
    let mut retries: u32 = 0;

    loop {
        if retries > 0 {
            debug!("Retry attempt {retries} of {}", policy.max_retries);
        }

        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        if !policy.is_retryable(&error) {
            return Err(error);
        }

        if retries >= policy.max_retries {
            warn!("Giving up after {retries} retries: {error}");
            return Err(error);
        }

        let Some(delay) = schedule.next_backoff() else {
            return Err(error);
        };

        retries += 1;
        warn!("Retryable failure, retrying in {}ms: {error}", delay.as_millis());
        TokioSleep(delay).await;
    }
}
