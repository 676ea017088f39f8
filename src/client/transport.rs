//! Authenticated, retrying request pipeline
//!
//! Every facade and the [`Pager`](super::pagination::Pager) funnel their
//! requests through [`Transport::send`] / [`Transport::execute`].

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::Utc;
use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client as HttpClient, Method, Response};
use url::Url;

use super::config::ResolvedConfig;
use super::context::Context;
use super::jsonapi::{self, MEDIA_TYPE, Resource};
use super::retry::{Outcome, RetryPolicy, RetrySettings};
use crate::error::{ConfigError, Error, Result};

/// Request timeout used when the caller does not supply an HTTP client
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared request pipeline. Read-only after construction.
pub struct Transport {
    http: HttpClient,
    base_url: Url,
    headers: HeaderMap,
    retry: RetrySettings,
    policy: Arc<dyn RetryPolicy>,
    rng: Mutex<StdRng>,
    debug: bool,
}

impl Transport {
    pub fn new(config: ResolvedConfig) -> Result<Self> {
        let http = match config.http {
            Some(http) => http,
            None => HttpClient::builder().timeout(DEFAULT_TIMEOUT).build()?,
        };

        let mut headers = HeaderMap::new();
        let mut token =
            HeaderValue::from_str(&format!("Bearer {}:{}", config.key_id, config.key_secret))
                .map_err(|_| ConfigError::Invalid("API key contains invalid characters".to_string()))?;
        token.set_sensitive(true);
        headers.insert(AUTHORIZATION, token);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(MEDIA_TYPE));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|_| ConfigError::Invalid(format!("invalid user agent '{}'", config.user_agent)))?,
        );

        let rng = match config.jitter_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            http,
            base_url: config.base_url,
            headers,
            retry: config.retry,
            policy: config.retry_policy,
            rng: Mutex::new(rng),
            debug: config.debug,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a path (or absolute URL) against the base URL.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|err| Error::InvalidPath(path.to_string(), err))
    }

    /// Serialize `body` as a JSON:API payload and execute the request.
    pub async fn send<R: Resource>(
        &self,
        ctx: &Context,
        method: Method,
        path: &str,
        body: Option<&R>,
    ) -> Result<Response> {
        let payload = body.map(jsonapi::marshal_payload).transpose()?;
        self.execute(ctx, method, path, payload).await
    }

    /// Execute a request with retries.
    ///
    /// Returns the final response whatever its status; interpreting it is the
    /// caller's job. Once attempts are exhausted on a retryable status, that
    /// last response is returned so callers can normalize it. A response that
    /// has arrived is never discarded in favour of a cancellation: the context
    /// is only consulted before each attempt and each backoff sleep.
    pub async fn execute(
        &self,
        ctx: &Context,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Response> {
        let url = self.resolve(path)?;
        let mut attempt = 0;

        loop {
            if let Some(err) = ctx.err() {
                return Err(err);
            }
            attempt += 1;

            let mut request = self
                .http
                .request(method.clone(), url.clone())
                .headers(self.headers.clone());
            if let Some(body) = &body {
                request = request.body(body.clone());
            }

            if self.debug {
                debug!(
                    "request: {} {} (attempt {}) {}",
                    method,
                    url,
                    attempt,
                    body.as_deref().map(String::from_utf8_lossy).unwrap_or_default()
                );
            }

            let result = tokio::select! {
                biased;
                err = ctx.done() => return Err(err),
                result = request.send() => result,
            };

            let wait = match &result {
                Ok(response) => {
                    if self.debug {
                        debug!("response: {} {} -> {}", method, url, response.status());
                    }
                    self.policy
                        .should_retry(ctx, &Outcome::Status(response.status()))
                        .then(|| self.backoff(Some(response.headers())))
                }
                Err(err) => {
                    debug!("request {} {} failed: {}", method, url, err);
                    self.policy
                        .should_retry(ctx, &Outcome::Failed(err))
                        .then(|| self.backoff(None))
                }
            };

            let Some(wait) = wait else {
                return result.map_err(Error::from);
            };

            if attempt >= self.retry.max_attempts {
                warn!("{} {} giving up after {} attempts", method, url, attempt);
                return result.map_err(Error::from);
            }

            match &result {
                Ok(response) => warn!(
                    "{} {} returned {}, retrying in {:?}",
                    method,
                    url,
                    response.status(),
                    wait
                ),
                Err(err) => warn!("{} {} failed ({}), retrying in {:?}", method, url, err, wait),
            }
            drop(result);

            if let Some(err) = ctx.err() {
                return Err(err);
            }
            tokio::select! {
                biased;
                err = ctx.done() => return Err(err),
                _ = tokio::time::sleep(wait) => {}
            }
        }
    }

    fn backoff(&self, headers: Option<&HeaderMap>) -> Duration {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.retry.backoff.wait(headers, Utc::now(), &mut *rng)
    }
}
