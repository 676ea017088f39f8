//! Authentication models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::api_key::link_environment;
use super::{Environment, Timestamps};
use crate::client::jsonapi::{Relationship, Resource, ResourceObject};

/// Team that owns an API key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(skip)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Slug used in every team-scoped path
    #[serde(default)]
    pub slug: String,
}

impl Resource for Team {
    const TYPE: &'static str = "teams";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Identity of the credential the client authenticates with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthMetadata {
    #[serde(skip)]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Management keys report types outside [`KeyType`](super::KeyType)
    #[serde(default)]
    pub key_type: Option<String>,

    #[serde(default)]
    pub disabled: bool,

    #[serde(default)]
    pub scopes: Vec<String>,

    #[serde(default)]
    pub timestamps: Option<Timestamps>,

    #[serde(skip)]
    pub team: Team,

    /// Set for environment-scoped keys
    #[serde(skip)]
    pub environment: Option<Environment>,
}

impl AuthMetadata {
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}

impl Resource for AuthMetadata {
    const TYPE: &'static str = "api-keys";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn link(&mut self, relationships: &BTreeMap<String, Relationship>, included: &[ResourceObject]) {
        if let Some(identifier) = relationships.get("team").and_then(|r| r.data.as_ref()) {
            self.team = ResourceObject::find(included, identifier)
                .and_then(|obj| obj.clone().decode::<Team>(&[]).ok())
                .unwrap_or_else(|| Team {
                    id: identifier.id.clone(),
                    ..Default::default()
                });
        }
        self.environment = link_environment(relationships, included);
    }
}
