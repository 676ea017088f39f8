//! Honeycomb API data models
//!
//! Every optional attribute is an `Option`; `None` is never serialized, so
//! a resource carrying only the fields to change is a valid partial update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod api_key;
mod auth;
mod environment;

pub use api_key::{ApiKey, ApiKeyPermissions, KeyType};
pub use auth::{AuthMetadata, Team};
pub use environment::{Environment, EnvironmentColor, EnvironmentSettings};

/// Server-maintained creation and modification times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
