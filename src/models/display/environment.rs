//! Environment display models

use serde::Serialize;
use tabled::Tabled;

use honeycombio::client::models::Environment;

use super::common::{check, created_at, truncate_string};
use crate::output::Detailed;

/// Environment row for list output
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct EnvironmentDisplay {
    #[tabled(rename = "ENV ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "SLUG")]
    pub slug: String,

    #[tabled(rename = "COLOR")]
    pub color: String,

    #[tabled(rename = "PROTECTED")]
    #[serde(skip)]
    pub protected_mark: String,

    #[tabled(skip)]
    pub delete_protected: bool,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

impl From<Environment> for EnvironmentDisplay {
    fn from(env: Environment) -> Self {
        let delete_protected = env.is_delete_protected();
        Self {
            id: env.id,
            name: env.name.unwrap_or_default(),
            slug: env.slug.unwrap_or_default(),
            color: env.color.map(|c| c.to_string()).unwrap_or_default(),
            protected_mark: check(delete_protected),
            delete_protected,
            description: truncate_string(&env.description.unwrap_or_default(), 40),
        }
    }
}

/// A single environment
#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentDetail {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub color: String,
    pub delete_protected: bool,
    pub created_at: String,
}

impl From<Environment> for EnvironmentDetail {
    fn from(env: Environment) -> Self {
        Self {
            delete_protected: env.is_delete_protected(),
            created_at: created_at(env.timestamps.as_ref()),
            id: env.id,
            name: env.name.unwrap_or_default(),
            slug: env.slug.unwrap_or_default(),
            description: env.description.unwrap_or_default(),
            color: env.color.map(|c| c.to_string()).unwrap_or_default(),
        }
    }
}

impl Detailed for EnvironmentDetail {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Env ID", self.id.clone()),
            ("Name", self.name.clone()),
            ("Slug", self.slug.clone()),
            ("Description", self.description.clone()),
            ("Color", self.color.clone()),
            ("Delete protected", self.delete_protected.to_string()),
            ("Created", self.created_at.clone()),
        ]
    }
}
