//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};
use crate::config::Overrides;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. Clap resolves
/// the first two; the config file is merged in `CommandContext`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.honeycomb/config.yaml)
    pub config: Option<String>,

    /// Debug logging, including request and response dumps
    pub debug: bool,

    pub api_endpoint: Option<String>,
    pub key_id: Option<String>,
    pub key_secret: Option<String>,
}

impl GlobalOptions {
    /// Called once in main.rs after parsing.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            debug: cli.debug,
            api_endpoint: cli.api_endpoint.clone(),
            key_id: cli.key_id.clone(),
            key_secret: cli.key_secret.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Values that override the config file.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_endpoint: self.api_endpoint.clone(),
            key_id: self.key_id.clone(),
            key_secret: self.key_secret.clone(),
            debug: self.debug,
        }
    }
}
