//! API key models

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Environment, Timestamps};
use crate::client::jsonapi::{Relationship, Resource, ResourceObject};

/// Kind of API key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    /// Sends telemetry into an environment
    Ingest,
    /// Manages team and environment configuration
    Configuration,
}

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Ingest => "ingest",
            KeyType::Configuration => "configuration",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ingest" => Ok(KeyType::Ingest),
            "configuration" => Ok(KeyType::Configuration),
            other => Err(format!(
                "unknown key type '{}', expected 'ingest' or 'configuration'",
                other
            )),
        }
    }
}

/// Permissions granted to an ingest key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyPermissions {
    #[serde(default)]
    pub create_datasets: bool,
}

/// Honeycomb API key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiKey {
    /// Key ID
    #[serde(skip)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_type: Option<KeyType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,

    /// Only returned once, in the response to create
    #[serde(default, skip_serializing)]
    pub secret: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<ApiKeyPermissions>,

    /// Environment the key belongs to
    #[serde(skip)]
    pub environment: Option<Environment>,

    #[serde(default, skip_serializing)]
    pub timestamps: Option<Timestamps>,
}

impl ApiKey {
    /// The full ingest key (ID followed by secret), when the secret is known.
    pub fn secret_key(&self) -> Option<String> {
        match (&self.key_type, &self.secret) {
            (Some(KeyType::Ingest), Some(secret)) => Some(format!("{}{}", self.id, secret)),
            _ => None,
        }
    }

    pub fn environment_id(&self) -> Option<&str> {
        self.environment
            .as_ref()
            .map(|e| e.id.as_str())
            .filter(|id| !id.is_empty())
    }
}

impl Resource for ApiKey {
    const TYPE: &'static str = "api-keys";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn relationships(&self) -> BTreeMap<String, Relationship> {
        let mut relationships = BTreeMap::new();
        if let Some(env_id) = self.environment_id() {
            relationships.insert(
                "environment".to_string(),
                Relationship::to(Environment::TYPE, env_id),
            );
        }
        relationships
    }

    fn link(&mut self, relationships: &BTreeMap<String, Relationship>, included: &[ResourceObject]) {
        self.environment = link_environment(relationships, included);
    }
}

/// Resolve an `environment` relationship, preferring the side-loaded copy.
pub(super) fn link_environment(
    relationships: &BTreeMap<String, Relationship>,
    included: &[ResourceObject],
) -> Option<Environment> {
    let identifier = relationships.get("environment")?.data.as_ref()?;
    let full = ResourceObject::find(included, identifier)
        .and_then(|obj| obj.clone().decode::<Environment>(&[]).ok());
    Some(full.unwrap_or_else(|| Environment::with_id(identifier.id.clone())))
}
