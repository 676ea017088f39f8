//! Rate-limit aware backoff for the Honeycomb API
//!
//! The API signals throttling with a draft-IETF `RateLimit` header
//! (`limit=100, remaining=0, reset=30`) and, on some endpoints, an RFC 3339
//! `Retry-After` timestamp. The wait before the next attempt is
//! `max(min, reset) + jitter`, where jitter is drawn uniformly from
//! `[0, max - min)`.
//!
//! Unparseable headers are ignored; computing a wait never fails.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use reqwest::header::{HeaderMap, RETRY_AFTER};

/// Name of the structured rate-limit header.
pub const RATE_LIMIT_HEADER: &str = "ratelimit";

/// Parsed `RateLimit` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub limit: u64,
    pub remaining: u64,
    /// Seconds until the window resets
    pub reset: u64,
}

/// Parse a `limit=X, remaining=Y, reset=Z` header value.
///
/// Keys may appear in any order. A negative `reset` clamps to zero. Returns
/// `None` if any of the three keys is missing or malformed.
pub fn parse_rate_limit(value: &str) -> Option<RateLimitInfo> {
    let mut limit = None;
    let mut remaining = None;
    let mut reset = None;

    for part in value.split(',') {
        let (key, raw) = part.trim().split_once('=')?;
        let raw = raw.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "limit" => limit = Some(raw.parse::<u64>().ok()?),
            "remaining" => remaining = Some(raw.parse::<u64>().ok()?),
            "reset" => reset = Some(raw.parse::<i64>().ok()?.max(0) as u64),
            _ => {}
        }
    }

    Some(RateLimitInfo {
        limit: limit?,
        remaining: remaining?,
        reset: reset?,
    })
}

/// Parse an RFC 3339 `Retry-After` value into the time left until it,
/// relative to `now`. Timestamps in the past yield zero.
pub fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let at = DateTime::parse_from_rfc3339(value.trim()).ok()?;
    Some(
        at.with_timezone(&Utc)
            .signed_duration_since(now)
            .to_std()
            .unwrap_or(Duration::ZERO),
    )
}

/// Backoff calculator bounded by a `(min, max)` jitter window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitBackoff {
    pub min: Duration,
    pub max: Duration,
}

impl RateLimitBackoff {
    pub const DEFAULT_MIN: Duration = Duration::from_millis(200);
    pub const DEFAULT_MAX: Duration = Duration::from_secs(10);

    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    /// Compute the wait before the next attempt.
    ///
    /// `headers` are the response headers of the failed attempt, if there was
    /// a response at all.
    pub fn wait<R: Rng>(
        &self,
        headers: Option<&HeaderMap>,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Duration {
        let window = self.max.saturating_sub(self.min);
        let jitter = window.mul_f64(rng.random::<f64>());

        let floor = headers
            .and_then(|headers| Self::server_floor(headers, now))
            .unwrap_or(Duration::ZERO);

        self.min.max(floor) + jitter
    }

    /// The minimum wait the server asked for, `RateLimit` taking precedence.
    fn server_floor(headers: &HeaderMap, now: DateTime<Utc>) -> Option<Duration> {
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

        if let Some(info) = header(RATE_LIMIT_HEADER).and_then(parse_rate_limit) {
            return Some(Duration::from_secs(info.reset));
        }

        header(RETRY_AFTER.as_str()).and_then(|v| parse_retry_after(v, now))
    }
}

impl Default for RateLimitBackoff {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN, Self::DEFAULT_MAX)
    }
}
