//! Configuration file for hnyctl

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use honeycombio::ClientConfig;
use honeycombio::client::DEFAULT_PAGE_SIZE;
use honeycombio::error::{ConfigError, Result};

/// Contents of `~/.honeycomb/config.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// API endpoint override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,

    /// Management key ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,

    /// Management key secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_secret: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Default page size for list commands
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_endpoint: Option<String>,
    pub key_id: Option<String>,
    pub key_secret: Option<String>,
    pub debug: bool,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".honeycomb").join("config.yaml"))
    }

    /// Resolve an explicit path, or fall back to the default location
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from a path (or the default path)
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Like [`Config::load_at`], but a missing file yields the defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match Self::load_at(path) {
            Err(honeycombio::Error::Config(ConfigError::NotFound)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to a path (or the default path)
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        std::fs::write(&path, contents)?;

        // Credentials live here
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Build the client configuration, letting `overrides` win over the file.
    ///
    /// Values missing from both are left to the client's environment fallback.
    pub fn client_config(&self, overrides: &Overrides) -> ClientConfig {
        let mut config = ClientConfig::new().with_debug(overrides.debug);

        let key_id = overrides.key_id.clone().or_else(|| self.key_id.clone());
        let key_secret = overrides
            .key_secret
            .clone()
            .or_else(|| self.key_secret.clone());
        config.key_id = key_id;
        config.key_secret = key_secret;

        if let Some(endpoint) = overrides
            .api_endpoint
            .clone()
            .or_else(|| self.api_endpoint.clone())
        {
            config = config.with_base_url(endpoint);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.key_id.is_none());
        assert!(config.api_endpoint.is_none());
        assert_eq!(config.preferences.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = Config {
            api_endpoint: Some("https://api.eu1.honeycomb.io".to_string()),
            key_id: Some("hcxmk_01".to_string()),
            key_secret: Some("secret".to_string()),
            preferences: Preferences { page_size: 50 },
        };

        config.save_to(path.clone()).unwrap();
        assert_eq!(Config::load_from(path.clone()).unwrap(), config);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.yaml");
        let path = path.to_str().unwrap();

        assert!(matches!(
            Config::load_at(Some(path)),
            Err(honeycombio::Error::Config(ConfigError::NotFound))
        ));
        assert_eq!(Config::load_or_default(Some(path)).unwrap(), Config::default());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config = Config {
            api_endpoint: Some("https://file.example.com".to_string()),
            key_id: Some("file-id".to_string()),
            key_secret: Some("file-secret".to_string()),
            ..Default::default()
        };
        let overrides = Overrides {
            key_id: Some("flag-id".to_string()),
            ..Default::default()
        };

        let resolved = config
            .client_config(&overrides)
            .resolve_with(|_| None)
            .unwrap();
        assert_eq!(resolved.key_id, "flag-id");
        assert_eq!(resolved.key_secret, "file-secret");
        assert_eq!(resolved.base_url.as_str(), "https://file.example.com/");
    }
}
