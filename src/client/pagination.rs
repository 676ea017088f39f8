//! Cursor-based pagination over JSON:API collections
//!
//! A [`Pager`] starts at the collection URL with `page[size]` applied and
//! follows `links.next` until the server stops sending one.

use std::marker::PhantomData;
use std::sync::Arc;

use log::{debug, warn};
use reqwest::{Method, StatusCode};
use url::Url;

use super::context::Context;
use super::jsonapi::{self, Resource};
use super::transport::Transport;
use crate::error::{ApiError, ConfigError, Error, Result};

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Largest page the API will serve.
pub const MAX_PAGE_SIZE: usize = 100;

/// Listing options, applied once when a [`Pager`] is built.
///
/// # Example
/// ```ignore
/// let opts = ListOptions::new().page_size(5).filter("type", "ingest");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Items per page (default: 20, max: 100)
    pub page_size: Option<usize>,
    /// `filter[key]=value` pairs
    pub filters: Vec<(String, String)>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size (items per page).
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Add a `filter[key]=value` query parameter.
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Effective page size, validated against the API bounds.
    pub fn effective_page_size(&self) -> Result<usize> {
        let size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidPageSize(size).into());
        }
        Ok(size)
    }

    /// Query parameters to merge into the first page URL.
    pub fn to_query_params(&self) -> Result<Vec<(String, String)>> {
        let mut params = vec![(
            "page[size]".to_string(),
            self.effective_page_size()?.to_string(),
        )];
        for (key, value) in &self.filters {
            params.push((format!("filter[{}]", key), value.clone()));
        }
        Ok(params)
    }
}

/// Replace (or add) query parameters on `url`, keeping any others.
fn merge_query(url: &mut Url, params: &[(String, String)]) {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !params.iter().any(|(key, _)| key == k))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut query = url.query_pairs_mut();
    query.clear();
    query.extend_pairs(kept);
    query.extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
}

/// Generic cursor pager over resources of type `R`.
///
/// Single-use and sequential: drive one traversal with [`Pager::has_next`] /
/// [`Pager::next`] from one task.
pub struct Pager<R> {
    transport: Arc<Transport>,
    next: Option<Url>,
    halted: Option<url::ParseError>,
    options: ListOptions,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Resource> Pager<R> {
    /// Build a pager for the collection at `path`.
    pub fn new(transport: Arc<Transport>, path: &str, options: ListOptions) -> Result<Self> {
        let mut first = transport.resolve(path)?;
        merge_query(&mut first, &options.to_query_params()?);

        Ok(Self {
            transport,
            next: Some(first),
            halted: None,
            options,
            _marker: PhantomData,
        })
    }

    /// True while another page may be fetched.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// URL of the page the next call to [`Pager::next`] will fetch.
    pub fn next_url(&self) -> Option<&Url> {
        self.next.as_ref()
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    /// Why the traversal stopped early, if the server sent a `next` link that
    /// could not be resolved.
    pub fn halted(&self) -> Option<&url::ParseError> {
        self.halted.as_ref()
    }

    /// Fetch the next page.
    ///
    /// On a non-200 response the cursor is left where it was, so the call
    /// can be repeated. An exhausted pager returns an empty page. A page whose
    /// `next` link is unusable is still returned, but the traversal ends there
    /// and [`Pager::halted`] reports the link error.
    pub async fn next(&mut self, ctx: &Context) -> Result<Vec<R>> {
        let Some(current) = self.next.clone() else {
            return Ok(Vec::new());
        };

        let response = self
            .transport
            .execute(ctx, Method::GET, current.as_str(), None)
            .await?;
        if response.status() != StatusCode::OK {
            return Err(ApiError::from_response(response).await.into());
        }

        let body = response.bytes().await?;
        let (items, links) = jsonapi::unmarshal_many_payload::<R>(&body)?;

        self.next = None;
        if let Some(next) = links.next.filter(|next| !next.is_empty()) {
            match current.join(&next) {
                Ok(url) => self.next = Some(url),
                Err(err) => {
                    warn!("stopping {} traversal at next link '{}': {}", R::TYPE, next, err);
                    self.halted = Some(err);
                }
            }
        }

        debug!(
            "fetched {} {} (more: {})",
            items.len(),
            R::TYPE,
            self.next.is_some()
        );
        Ok(items)
    }

    /// Drain every remaining page.
    ///
    /// Fails with [`Error::Pagination`] if the traversal was cut short by an
    /// unusable `next` link.
    pub async fn collect_all(mut self, ctx: &Context) -> Result<Vec<R>> {
        let mut all = Vec::new();
        while self.has_next() {
            all.extend(self.next(ctx).await?);
        }
        match self.halted {
            Some(err) => Err(Error::Pagination(err)),
            None => Ok(all),
        }
    }
}
