//! Environment models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Timestamps;
use crate::client::jsonapi::Resource;

/// Honeycomb environment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Environment ID
    #[serde(skip)]
    pub id: String,

    /// Display name; fixed after creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// URL-safe slug derived from the name (read-only)
    #[serde(default, skip_serializing)]
    pub slug: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<EnvironmentColor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<EnvironmentSettings>,

    #[serde(default, skip_serializing)]
    pub timestamps: Option<Timestamps>,
}

impl Environment {
    /// A bare reference to an environment by ID.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Whether the server will refuse to delete this environment.
    pub fn is_delete_protected(&self) -> bool {
        self.settings
            .as_ref()
            .and_then(|s| s.delete_protected)
            .unwrap_or(false)
    }
}

impl Resource for Environment {
    const TYPE: &'static str = "environments";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Mutable environment settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_protected: Option<bool>,
}

/// The palette the Honeycomb UI offers for environments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnvironmentColor {
    Blue,
    Green,
    Gold,
    Red,
    Purple,
    LightBlue,
    LightGreen,
    LightGold,
    LightRed,
    LightPurple,
}

impl EnvironmentColor {
    pub const ALL: [EnvironmentColor; 10] = [
        EnvironmentColor::Blue,
        EnvironmentColor::Green,
        EnvironmentColor::Gold,
        EnvironmentColor::Red,
        EnvironmentColor::Purple,
        EnvironmentColor::LightBlue,
        EnvironmentColor::LightGreen,
        EnvironmentColor::LightGold,
        EnvironmentColor::LightRed,
        EnvironmentColor::LightPurple,
    ];

    /// Wire name of the colour.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentColor::Blue => "blue",
            EnvironmentColor::Green => "green",
            EnvironmentColor::Gold => "gold",
            EnvironmentColor::Red => "red",
            EnvironmentColor::Purple => "purple",
            EnvironmentColor::LightBlue => "lightBlue",
            EnvironmentColor::LightGreen => "lightGreen",
            EnvironmentColor::LightGold => "lightGold",
            EnvironmentColor::LightRed => "lightRed",
            EnvironmentColor::LightPurple => "lightPurple",
        }
    }
}

impl fmt::Display for EnvironmentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvironmentColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnvironmentColor::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = EnvironmentColor::ALL.iter().map(|c| c.as_str()).collect();
                format!("unknown color '{}', expected one of: {}", s, names.join(", "))
            })
    }
}
