//! API key display models

use serde::Serialize;
use tabled::Tabled;

use honeycombio::client::models::ApiKey;

use super::common::{check, created_at};
use crate::output::Detailed;

/// API key row for list output
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ApiKeyDisplay {
    #[tabled(rename = "KEY ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "TYPE")]
    pub key_type: String,

    #[tabled(rename = "ENVIRONMENT")]
    pub environment: String,

    #[tabled(rename = "DISABLED")]
    #[serde(skip)]
    pub disabled_mark: String,

    #[tabled(skip)]
    pub disabled: bool,

    #[tabled(rename = "CREATED")]
    pub created_at: String,
}

impl From<ApiKey> for ApiKeyDisplay {
    fn from(key: ApiKey) -> Self {
        let disabled = key.disabled.unwrap_or(false);
        let environment = key
            .environment
            .as_ref()
            .map(|e| e.slug.clone().unwrap_or_else(|| e.id.clone()))
            .unwrap_or_default();

        Self {
            created_at: created_at(key.timestamps.as_ref()),
            name: key.name.unwrap_or_default(),
            key_type: key.key_type.map(|t| t.to_string()).unwrap_or_default(),
            environment,
            disabled_mark: check(disabled),
            disabled,
            id: key.id,
        }
    }
}

/// A single API key, including the secret when the server returned one
#[derive(Debug, Clone, Serialize)]
pub struct ApiKeyDetail {
    pub id: String,
    pub name: String,
    pub key_type: String,
    pub environment_id: String,
    pub disabled: bool,
    pub create_datasets: bool,
    /// Full ingest key, only present right after creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    pub created_at: String,
}

impl From<ApiKey> for ApiKeyDetail {
    fn from(key: ApiKey) -> Self {
        Self {
            key: key.secret_key(),
            environment_id: key.environment_id().unwrap_or_default().to_string(),
            create_datasets: key.permissions.is_some_and(|p| p.create_datasets),
            created_at: created_at(key.timestamps.as_ref()),
            name: key.name.unwrap_or_default(),
            key_type: key.key_type.map(|t| t.to_string()).unwrap_or_default(),
            disabled: key.disabled.unwrap_or(false),
            secret: key.secret,
            id: key.id,
        }
    }
}

impl Detailed for ApiKeyDetail {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Key ID", self.id.clone()),
            ("Name", self.name.clone()),
            ("Type", self.key_type.clone()),
            ("Environment", self.environment_id.clone()),
            ("Disabled", self.disabled.to_string()),
            ("Create datasets", check(self.create_datasets)),
            ("Secret", self.secret.clone().unwrap_or_default()),
            ("Ingest key", self.key.clone().unwrap_or_default()),
            ("Created", self.created_at.clone()),
        ]
    }
}
