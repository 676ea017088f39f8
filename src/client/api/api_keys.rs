//! API key facade

use crate::client::models::{ApiKey, KeyType};
use crate::client::pagination::{ListOptions, Pager};
use crate::error::Result;

use super::resource::{ResourceApi, TeamResource};

/// API keys owned by the bootstrap team
pub type ApiKeys = TeamResource<ApiKey>;

impl TeamResource<ApiKey> {
    /// List only keys of one type (`filter[type]`).
    pub fn list_by_type(&self, key_type: KeyType, options: ListOptions) -> Result<Pager<ApiKey>> {
        self.list(options.filter("type", key_type.as_str()))
    }
}
