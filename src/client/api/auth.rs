//! Authentication API

use async_trait::async_trait;
use log::debug;
use reqwest::{Method, StatusCode};

use crate::client::context::Context;
use crate::client::jsonapi;
use crate::client::models::AuthMetadata;
use crate::client::transport::Transport;
use crate::error::{ApiError, Result};

/// Credential introspection endpoint
pub const AUTH_PATH: &str = "/2/auth";

/// Authentication operations for the Honeycomb API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Describe the credential in use, including its owning team
    async fn auth_metadata(&self, ctx: &Context) -> Result<AuthMetadata>;
}

#[async_trait]
impl AuthApi for Transport {
    async fn auth_metadata(&self, ctx: &Context) -> Result<AuthMetadata> {
        let response = self.execute(ctx, Method::GET, AUTH_PATH, None).await?;
        if response.status() != StatusCode::OK {
            return Err(ApiError::from_response(response).await.into());
        }
        let body = response.bytes().await?;
        let auth: AuthMetadata = jsonapi::unmarshal_payload(&body)?;
        debug!("authenticated as key {} on team '{}'", auth.id, auth.team.slug);
        Ok(auth)
    }
}
