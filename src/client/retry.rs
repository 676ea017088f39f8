//! Retry policy for the request pipeline

use std::time::Duration;

use reqwest::StatusCode;

use super::context::Context;
use super::rate_limit::RateLimitBackoff;

/// Result of one attempt, as seen by a [`RetryPolicy`].
#[derive(Debug)]
pub enum Outcome<'a> {
    /// The server answered with this status.
    Status(StatusCode),
    /// The request failed before a response arrived.
    Failed(&'a reqwest::Error),
}

/// Decides whether an attempt should be retried.
pub trait RetryPolicy: Send + Sync {
    fn should_retry(&self, ctx: &Context, outcome: &Outcome<'_>) -> bool;
}

/// Retries throttling and gateway failures plus transient transport errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRetryPolicy;

impl RetryPolicy for DefaultRetryPolicy {
    fn should_retry(&self, ctx: &Context, outcome: &Outcome<'_>) -> bool {
        if ctx.err().is_some() {
            return false;
        }

        match outcome {
            Outcome::Status(status) => matches!(
                *status,
                StatusCode::TOO_MANY_REQUESTS | StatusCode::BAD_GATEWAY | StatusCode::GATEWAY_TIMEOUT
            ),
            Outcome::Failed(err) => is_transient(err),
        }
    }
}

/// Connection failures and timeouts are worth another attempt; a request we
/// could not even build or a redirect loop is not.
fn is_transient(err: &reqwest::Error) -> bool {
    !(err.is_builder() || err.is_redirect() || err.is_decode())
}

/// Attempt limits and backoff window for the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrySettings {
    /// Total requests per call, the first one included
    pub max_attempts: usize,
    pub backoff: RateLimitBackoff,
}

impl RetrySettings {
    pub const DEFAULT_MAX_ATTEMPTS: usize = 15;

    pub fn new(max_attempts: usize, min_wait: Duration, max_wait: Duration) -> Self {
        Self {
            max_attempts,
            backoff: RateLimitBackoff::new(min_wait, max_wait),
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            backoff: RateLimitBackoff::default(),
        }
    }
}
