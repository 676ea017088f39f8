//! Client configuration and credential resolution

use std::fmt;
use std::sync::Arc;

use url::Url;

use super::retry::{DefaultRetryPolicy, RetryPolicy, RetrySettings};
use crate::error::{ConfigError, Result};

/// Default Honeycomb API endpoint
pub const DEFAULT_API_HOST: &str = "https://api.honeycomb.io";

/// Environment variable overriding the API endpoint
pub const ENV_API_ENDPOINT: &str = "HONEYCOMB_API_ENDPOINT";
/// Environment variable holding the API key ID
pub const ENV_KEY_ID: &str = "HONEYCOMB_KEY_ID";
/// Environment variable holding the API key secret
pub const ENV_KEY_SECRET: &str = "HONEYCOMB_KEY_SECRET";

/// Default `User-Agent` sent with every request
pub fn default_user_agent() -> String {
    format!("honeycombio-rs/{}", env!("CARGO_PKG_VERSION"))
}

/// Client settings as supplied by the caller.
///
/// Unset credentials and endpoint fall back to the environment when the
/// configuration is resolved.
#[derive(Clone, Default)]
pub struct ClientConfig {
    pub key_id: Option<String>,
    pub key_secret: Option<String>,
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    /// Pre-built HTTP client; one with a 30s timeout is created otherwise
    pub http: Option<reqwest::Client>,
    /// Log request and response dumps at debug level
    pub debug: bool,
    pub retry: RetrySettings,
    pub retry_policy: Option<Arc<dyn RetryPolicy>>,
    /// Seed for the backoff jitter source
    pub jitter_seed: Option<u64>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &self.key_secret.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("debug", &self.debug)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(mut self, key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        self.key_id = Some(key_id.into());
        self.key_secret = Some(key_secret.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_retry(mut self, retry: RetrySettings) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_retry_policy(mut self, policy: Arc<dyn RetryPolicy>) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    pub fn with_jitter_seed(mut self, seed: u64) -> Self {
        self.jitter_seed = Some(seed);
        self
    }

    /// Resolve against the process environment.
    pub fn resolve(self) -> Result<ResolvedConfig> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve using `lookup` for environment fallbacks.
    ///
    /// Fails if either half of the credential pair is missing or the
    /// endpoint is not a valid base URL.
    pub fn resolve_with<F>(self, lookup: F) -> Result<ResolvedConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |explicit: Option<String>, var: &str| {
            explicit
                .filter(|v| !v.is_empty())
                .or_else(|| lookup(var).filter(|v| !v.is_empty()))
        };

        let key_id = pick(self.key_id, ENV_KEY_ID).ok_or(ConfigError::MissingKeyId)?;
        let key_secret = pick(self.key_secret, ENV_KEY_SECRET).ok_or(ConfigError::MissingKeySecret)?;
        let raw_url =
            pick(self.base_url, ENV_API_ENDPOINT).unwrap_or_else(|| DEFAULT_API_HOST.to_string());

        let base_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidUrl(raw_url.clone(), e.to_string()))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(raw_url, "expected an http(s) URL".to_string()).into());
        }

        Ok(ResolvedConfig {
            key_id,
            key_secret,
            base_url,
            user_agent: self
                .user_agent
                .filter(|v| !v.is_empty())
                .unwrap_or_else(default_user_agent),
            http: self.http,
            debug: self.debug,
            retry: self.retry,
            retry_policy: self
                .retry_policy
                .unwrap_or_else(|| Arc::new(DefaultRetryPolicy)),
            jitter_seed: self.jitter_seed,
        })
    }
}

/// Validated configuration. Immutable once the client is built.
#[derive(Clone)]
pub struct ResolvedConfig {
    pub key_id: String,
    pub key_secret: String,
    pub base_url: Url,
    pub user_agent: String,
    pub http: Option<reqwest::Client>,
    pub debug: bool,
    pub retry: RetrySettings,
    pub retry_policy: Arc<dyn RetryPolicy>,
    pub jitter_seed: Option<u64>,
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("key_id", &self.key_id)
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .field("debug", &self.debug)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_explicit_credentials() {
        let resolved = ClientConfig::new()
            .with_credentials("kid", "ksecret")
            .resolve_with(env(&[]))
            .unwrap();

        assert_eq!(resolved.key_id, "kid");
        assert_eq!(resolved.key_secret, "ksecret");
        assert_eq!(resolved.base_url.as_str(), "https://api.honeycomb.io/");
        assert!(resolved.user_agent.starts_with("honeycombio-rs/"));
    }

    #[test]
    fn test_environment_fallback() {
        let resolved = ClientConfig::new()
            .resolve_with(env(&[
                (ENV_KEY_ID, "env-id"),
                (ENV_KEY_SECRET, "env-secret"),
                (ENV_API_ENDPOINT, "http://localhost:8080"),
            ]))
            .unwrap();

        assert_eq!(resolved.key_id, "env-id");
        assert_eq!(resolved.key_secret, "env-secret");
        assert_eq!(resolved.base_url.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_explicit_wins_over_environment() {
        let resolved = ClientConfig::new()
            .with_credentials("kid", "ksecret")
            .with_base_url("https://api.eu1.honeycomb.io")
            .resolve_with(env(&[
                (ENV_KEY_ID, "env-id"),
                (ENV_API_ENDPOINT, "http://localhost:8080"),
            ]))
            .unwrap();

        assert_eq!(resolved.key_id, "kid");
        assert_eq!(resolved.base_url.host_str(), Some("api.eu1.honeycomb.io"));
    }

    #[test]
    fn test_missing_secret_is_config_error() {
        let err = ClientConfig {
            key_id: Some("kid".to_string()),
            ..Default::default()
        }
        .resolve_with(env(&[]))
        .unwrap_err();

        assert!(matches!(err, Error::Config(ConfigError::MissingKeySecret)));
    }

    #[test]
    fn test_missing_id_is_config_error() {
        let err = ClientConfig::new()
            .resolve_with(env(&[(ENV_KEY_SECRET, "env-secret")]))
            .unwrap_err();

        assert!(matches!(err, Error::Config(ConfigError::MissingKeyId)));
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        let err = ClientConfig::new()
            .with_credentials("", "ksecret")
            .resolve_with(env(&[(ENV_KEY_ID, "")]))
            .unwrap_err();

        assert!(matches!(err, Error::Config(ConfigError::MissingKeyId)));
    }

    #[test]
    fn test_invalid_base_url() {
        for bad in ["not a url", "mailto:team@example.com", "ftp://example.com"] {
            let err = ClientConfig::new()
                .with_credentials("kid", "ksecret")
                .with_base_url(bad)
                .resolve_with(env(&[]))
                .unwrap_err();
            assert!(
                matches!(err, Error::Config(ConfigError::InvalidUrl(..))),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = ClientConfig::new().with_credentials("kid", "super-secret");
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("kid"));
        assert!(!rendered.contains("super-secret"));
    }
}
