//! Credential identity display model

use serde::Serialize;

use honeycombio::client::models::AuthMetadata;

use crate::output::Detailed;

/// Who the configured key authenticates as
#[derive(Debug, Clone, Serialize)]
pub struct AuthDisplay {
    pub endpoint: String,
    pub key_id: String,
    pub key_name: String,
    pub key_type: String,
    pub team_id: String,
    pub team_name: String,
    pub team_slug: String,
    pub environment: Option<String>,
    pub scopes: Vec<String>,
}

impl AuthDisplay {
    pub fn new(endpoint: &str, auth: &AuthMetadata) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            key_id: auth.id.clone(),
            key_name: auth.name.clone().unwrap_or_default(),
            key_type: auth.key_type.clone().unwrap_or_default(),
            team_id: auth.team.id.clone(),
            team_name: auth.team.name.clone(),
            team_slug: auth.team.slug.clone(),
            environment: auth
                .environment
                .as_ref()
                .map(|e| e.slug.clone().unwrap_or_else(|| e.id.clone())),
            scopes: auth.scopes.clone(),
        }
    }
}

impl Detailed for AuthDisplay {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Endpoint", self.endpoint.clone()),
            ("Key ID", self.key_id.clone()),
            ("Key name", self.key_name.clone()),
            ("Key type", self.key_type.clone()),
            ("Team", format!("{} ({})", self.team_name, self.team_slug)),
            ("Environment", self.environment.clone().unwrap_or_default()),
            ("Scopes", self.scopes.join(", ")),
        ]
    }
}
