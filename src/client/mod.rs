//! Honeycomb API client
//!
//! [`Client::new`] resolves credentials, checks them against `/2/auth` to
//! discover the owning team, and binds that team into the resource facades.

use std::sync::Arc;

use log::info;

use crate::error::{Error, Result};

pub mod api;
pub mod config;
pub mod context;
pub mod jsonapi;
pub mod models;
pub mod pagination;
pub mod rate_limit;
pub mod retry;
pub mod transport;

pub use api::{ApiKeys, AuthApi, Environments, ResourceApi, TeamResource};
pub use config::{ClientConfig, ResolvedConfig};
pub use context::{CancelHandle, Context};
pub use models::{
    ApiKey, ApiKeyPermissions, AuthMetadata, Environment, EnvironmentColor, EnvironmentSettings,
    KeyType, Team,
};
pub use pagination::{DEFAULT_PAGE_SIZE, ListOptions, MAX_PAGE_SIZE, Pager};
pub use rate_limit::RateLimitBackoff;
pub use retry::{DefaultRetryPolicy, Outcome, RetryPolicy, RetrySettings};
pub use transport::Transport;

/// Authenticated client bound to one team
///
/// Cheap to share behind an `Arc`; every facade holds the same transport.
pub struct Client {
    transport: Arc<Transport>,
    auth_info: AuthMetadata,
    api_keys: ApiKeys,
    environments: Environments,
}

impl Client {
    /// Build a client, failing before any request if the configuration is
    /// incomplete, then authenticate.
    pub async fn new(ctx: &Context, config: ClientConfig) -> Result<Self> {
        Self::from_resolved(ctx, config.resolve()?).await
    }

    /// Build a client from an already resolved configuration.
    pub async fn from_resolved(ctx: &Context, config: ResolvedConfig) -> Result<Self> {
        let transport = Arc::new(Transport::new(config)?);
        let auth_info = transport.auth_metadata(ctx).await?;
        if auth_info.team.slug.is_empty() {
            return Err(Error::Decode(
                "auth response did not identify a team".to_string(),
            ));
        }
        info!(
            "connected to {} as team '{}'",
            transport.base_url(),
            auth_info.team.slug
        );

        let team = auth_info.team.slug.clone();
        Ok(Self {
            api_keys: ApiKeys::new(Arc::clone(&transport), team.clone()),
            environments: Environments::new(Arc::clone(&transport), team),
            transport,
            auth_info,
        })
    }

    /// Identity discovered at construction
    pub fn auth_info(&self) -> &AuthMetadata {
        &self.auth_info
    }

    pub fn team_slug(&self) -> &str {
        &self.auth_info.team.slug
    }

    pub fn api_keys(&self) -> &ApiKeys {
        &self.api_keys
    }

    pub fn environments(&self) -> &Environments {
        &self.environments
    }

    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    const AUTH_BODY: &str = r#"{
        "data": {
            "id": "hcxmk_01", "type": "api-keys",
            "attributes": {"name": "terraform", "key_type": "management", "scopes": ["environments:write"]},
            "relationships": {"team": {"data": {"type": "teams", "id": "hcatm_01"}}}
        },
        "included": [{"type": "teams", "id": "hcatm_01", "attributes": {"name": "Acme", "slug": "acme"}}]
    }"#;

    #[tokio::test]
    async fn test_bootstrap_binds_team_slug() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/2/auth")
            .match_header("authorization", "Bearer kid:ksecret")
            .with_status(200)
            .with_body(AUTH_BODY)
            .create_async()
            .await;

        let config = ClientConfig::new()
            .with_credentials("kid", "ksecret")
            .with_base_url(server.url())
            .resolve_with(|_| None)
            .unwrap();
        let client = Client::from_resolved(&Context::background(), config)
            .await
            .unwrap();

        assert_eq!(client.team_slug(), "acme");
        assert_eq!(client.api_keys().team_slug(), "acme");
        assert_eq!(client.environments().team_slug(), "acme");
        assert!(client.auth_info().has_scope("environments:write"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_bootstrap_unauthorized_aborts() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/2/auth")
            .with_status(401)
            .with_body(r#"{"errors":[{"status":"401","title":"Unauthorized","detail":"unknown API key"}]}"#)
            .create_async()
            .await;

        let config = ClientConfig::new()
            .with_credentials("kid", "wrong")
            .with_base_url(server.url())
            .resolve_with(|_| None)
            .unwrap();
        let err = Client::from_resolved(&Context::background(), config)
            .await
            .err()
            .unwrap();

        assert!(err.as_api().is_some_and(|e| e.is_unauthorized()));
    }

    #[tokio::test]
    async fn test_bootstrap_without_team_fails() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/2/auth")
            .with_status(200)
            .with_body(r#"{"data": {"id": "k", "type": "api-keys", "attributes": {}}}"#)
            .create_async()
            .await;

        let config = ClientConfig::new()
            .with_credentials("kid", "ksecret")
            .with_base_url(server.url())
            .resolve_with(|_| None)
            .unwrap();
        let result = Client::from_resolved(&Context::background(), config).await;

        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_half_credentials_fail_before_network() {
        let err = ClientConfig::new()
            .with_base_url("http://127.0.0.1:9")
            .resolve_with(|name: &str| (name == config::ENV_KEY_ID).then(|| "kid".to_string()))
            .err()
            .unwrap();

        assert!(matches!(err, Error::Config(ConfigError::MissingKeySecret)));
    }
}
