//! Generic CRUD facade for team-scoped resources

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use reqwest::{Method, Response, StatusCode};

use crate::client::context::Context;
use crate::client::jsonapi::{self, Resource};
use crate::client::pagination::{ListOptions, Pager};
use crate::client::transport::Transport;
use crate::error::{ApiError, Error, Result};

/// CRUD and listing operations for one resource type
///
/// Every call goes to the network; nothing is cached.
#[async_trait]
pub trait ResourceApi<R: Resource>: Send + Sync {
    // ========================================================================
    // Single resources
    // ========================================================================

    /// Create a resource; the server answers 201 with the stored copy
    async fn create(&self, ctx: &Context, resource: &R) -> Result<R>;

    /// Fetch a resource by ID
    async fn get(&self, ctx: &Context, id: &str) -> Result<R>;

    /// Apply the fields set on `resource` to the resource with its ID.
    ///
    /// Fields left as `None` are not sent and keep their server-side value.
    async fn update(&self, ctx: &Context, resource: &R) -> Result<R>;

    /// Delete a resource by ID
    async fn delete(&self, ctx: &Context, id: &str) -> Result<()>;

    // ========================================================================
    // Collections
    // ========================================================================

    /// Start a paginated listing. No request is made until the first page is fetched.
    fn list(&self, options: ListOptions) -> Result<Pager<R>>;
}

/// Facade for resources living under `/2/teams/{team}/{type}`
pub struct TeamResource<R> {
    transport: Arc<Transport>,
    team: String,
    _marker: PhantomData<fn() -> R>,
}

impl<R> Clone for TeamResource<R> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            team: self.team.clone(),
            _marker: PhantomData,
        }
    }
}

impl<R: Resource> TeamResource<R> {
    pub fn new(transport: Arc<Transport>, team: impl Into<String>) -> Self {
        Self {
            transport,
            team: team.into(),
            _marker: PhantomData,
        }
    }

    pub fn team_slug(&self) -> &str {
        &self.team
    }

    pub(crate) fn collection_path(&self) -> String {
        format!("/2/teams/{}/{}", self.team, R::TYPE)
    }

    pub(crate) fn item_path(&self, id: &str) -> Result<String> {
        if id.is_empty() {
            return Err(Error::MissingId(R::TYPE));
        }
        Ok(format!("{}/{}", self.collection_path(), id))
    }

    pub(crate) fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }
}

/// Decode a single-resource payload, or normalize any unexpected status.
async fn expect_resource<R: Resource>(response: Response, expected: StatusCode) -> Result<R> {
    if response.status() != expected {
        return Err(ApiError::from_response(response).await.into());
    }
    let body = response.bytes().await?;
    jsonapi::unmarshal_payload(&body)
}

#[async_trait]
impl<R: Resource + 'static> ResourceApi<R> for TeamResource<R> {
    async fn create(&self, ctx: &Context, resource: &R) -> Result<R> {
        let response = self
            .transport
            .send(ctx, Method::POST, &self.collection_path(), Some(resource))
            .await?;
        let created: R = expect_resource(response, StatusCode::CREATED).await?;
        debug!("created {} {}", R::TYPE, created.id());
        Ok(created)
    }

    async fn get(&self, ctx: &Context, id: &str) -> Result<R> {
        let path = self.item_path(id)?;
        let response = self
            .transport
            .send::<R>(ctx, Method::GET, &path, None)
            .await?;
        expect_resource(response, StatusCode::OK).await
    }

    async fn update(&self, ctx: &Context, resource: &R) -> Result<R> {
        let path = self.item_path(resource.id())?;
        let response = self
            .transport
            .send(ctx, Method::PATCH, &path, Some(resource))
            .await?;
        expect_resource(response, StatusCode::OK).await
    }

    async fn delete(&self, ctx: &Context, id: &str) -> Result<()> {
        let path = self.item_path(id)?;
        let response = self
            .transport
            .send::<R>(ctx, Method::DELETE, &path, None)
            .await?;
        if response.status() != StatusCode::NO_CONTENT {
            return Err(ApiError::from_response(response).await.into());
        }
        debug!("deleted {} {}", R::TYPE, id);
        Ok(())
    }

    fn list(&self, options: ListOptions) -> Result<Pager<R>> {
        Pager::new(Arc::clone(&self.transport), &self.collection_path(), options)
    }
}
