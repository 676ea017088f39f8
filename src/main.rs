//! hnyctl - command-line companion for the Honeycomb management API

use clap::Parser;

mod cli;
mod config;
mod models;
mod output;

use cli::api_key::NewApiKey;
use cli::args::GlobalOptions;
use cli::environment::EnvironmentChanges;
use cli::{ApiKeyCommands, Cli, Commands, ConfigCommands, EnvironmentCommands};
use honeycombio::error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise warnings, or everything with `--debug`.
fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Auth => cli::auth::run(&opts).await,
        Commands::Version => {
            println!("hnyctl version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::ApiKey(cmd) => match cmd {
            ApiKeyCommands::List {
                key_type,
                pagination,
            } => cli::api_key::list(&opts, key_type, &pagination).await,
            ApiKeyCommands::Get { id } => cli::api_key::get(&opts, &id).await,
            ApiKeyCommands::Create {
                name,
                environment,
                key_type,
                create_datasets,
                disabled,
            } => {
                let new = NewApiKey {
                    name,
                    environment,
                    key_type,
                    create_datasets,
                    disabled,
                };
                cli::api_key::create(&opts, new).await
            }
            ApiKeyCommands::Update { id, name, disabled } => {
                cli::api_key::update(&opts, &id, name, disabled).await
            }
            ApiKeyCommands::Delete { id } => cli::api_key::delete(&opts, &id).await,
        },
        Commands::Environment(cmd) => match cmd {
            EnvironmentCommands::List { pagination } => {
                cli::environment::list(&opts, &pagination).await
            }
            EnvironmentCommands::Get { id } => cli::environment::get(&opts, &id).await,
            EnvironmentCommands::Create {
                name,
                description,
                color,
            } => cli::environment::create(&opts, name, description, color).await,
            EnvironmentCommands::Update {
                id,
                description,
                color,
                delete_protected,
            } => {
                let changes = EnvironmentChanges {
                    description,
                    color,
                    delete_protected,
                };
                cli::environment::update(&opts, &id, changes).await
            }
            EnvironmentCommands::Delete { id } => cli::environment::delete(&opts, &id).await,
        },
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Set { page_size } => cli::config::set(&opts, page_size),
            ConfigCommands::Show => cli::config::show(&opts),
        },
    }
}
