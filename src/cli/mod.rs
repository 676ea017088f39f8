//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

use honeycombio::client::models::{EnvironmentColor, KeyType};

pub mod api_key;
pub mod args;
pub mod auth;
pub mod config;
pub mod context;
pub mod environment;
pub mod handlers;

pub use args::{OutputFormat, PaginationArgs};
pub use context::CommandContext;

/// hnyctl - manage Honeycomb API keys and environments
#[derive(Parser, Debug)]
#[command(name = "hnyctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "HNYCTL_FORMAT",
        default_value = "table",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "HNYCTL_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging, including request and response dumps
    #[arg(long, global = true, env = "HNYCTL_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Honeycomb API endpoint
    #[arg(long, global = true, env = "HONEYCOMB_API_ENDPOINT", hide_env = true)]
    pub api_endpoint: Option<String>,

    /// Management key ID
    #[arg(long, global = true, env = "HONEYCOMB_KEY_ID", hide_env = true)]
    pub key_id: Option<String>,

    /// Management key secret
    #[arg(
        long,
        global = true,
        env = "HONEYCOMB_KEY_SECRET",
        hide_env = true,
        hide_env_values = true
    )]
    pub key_secret: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the identity and team of the configured key
    Auth,

    /// Display version information
    Version,

    /// Manage API keys
    #[command(subcommand)]
    ApiKey(ApiKeyCommands),

    /// Manage environments
    #[command(subcommand)]
    Environment(EnvironmentCommands),

    /// Manage the hnyctl config file
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// API key subcommands
#[derive(Subcommand, Debug)]
pub enum ApiKeyCommands {
    /// List API keys
    List {
        /// Only keys of this type (ingest, configuration)
        #[arg(long = "type")]
        key_type: Option<KeyType>,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Show one API key
    Get {
        /// API key ID
        id: String,
    },

    /// Create an API key
    Create {
        #[arg(long)]
        name: String,

        /// Environment ID the key belongs to
        #[arg(long)]
        environment: String,

        /// Key type (ingest, configuration)
        #[arg(long = "type")]
        key_type: KeyType,

        /// Allow the key to create datasets (ingest keys)
        #[arg(long)]
        create_datasets: bool,

        /// Create the key disabled
        #[arg(long)]
        disabled: bool,
    },

    /// Rename, disable or enable an API key
    Update {
        /// API key ID
        id: String,

        #[arg(long)]
        name: Option<String>,

        /// true to disable, false to enable
        #[arg(long)]
        disabled: Option<bool>,
    },

    /// Delete an API key
    Delete {
        /// API key ID
        id: String,
    },
}

/// Environment subcommands
#[derive(Subcommand, Debug)]
pub enum EnvironmentCommands {
    /// List environments
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Show one environment
    Get {
        /// Environment ID
        id: String,
    },

    /// Create an environment
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,

        /// blue, green, gold, red, purple, or a light variant (lightBlue, ...)
        #[arg(long)]
        color: Option<EnvironmentColor>,
    },

    /// Change an environment's description, color or delete protection
    Update {
        /// Environment ID
        id: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        color: Option<EnvironmentColor>,

        /// true to protect against deletion, false to allow it
        #[arg(long)]
        delete_protected: Option<bool>,
    },

    /// Delete an environment (must not be delete protected)
    Delete {
        /// Environment ID
        id: String,
    },
}

/// Config file subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Save --api-endpoint, --key-id and --key-secret to the config file
    Set {
        /// Default page size for list commands
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Show the config file (secret redacted)
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_api_key_create() {
        let cli = Cli::try_parse_from([
            "hnyctl",
            "api-key",
            "create",
            "--name",
            "collector",
            "--environment",
            "hcaen_01",
            "--type",
            "ingest",
            "--create-datasets",
        ])
        .unwrap();

        match cli.command {
            Commands::ApiKey(ApiKeyCommands::Create {
                key_type,
                create_datasets,
                disabled,
                ..
            }) => {
                assert_eq!(key_type, KeyType::Ingest);
                assert!(create_datasets);
                assert!(!disabled);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_environment_update_with_global_flags() {
        let cli = Cli::try_parse_from([
            "hnyctl",
            "environment",
            "update",
            "hcaen_01",
            "--color",
            "lightBlue",
            "--delete-protected",
            "false",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Environment(EnvironmentCommands::Update {
                color,
                delete_protected,
                description,
                ..
            }) => {
                assert_eq!(color, Some(EnvironmentColor::LightBlue));
                assert_eq!(delete_protected, Some(false));
                assert!(description.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_color() {
        let result = Cli::try_parse_from([
            "hnyctl",
            "environment",
            "create",
            "--name",
            "qa",
            "--color",
            "teal",
        ]);
        assert!(result.is_err());
    }
}
