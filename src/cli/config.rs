//! Config file commands

use honeycombio::client::MAX_PAGE_SIZE;
use honeycombio::error::{ConfigError, Result};

use crate::cli::args::GlobalOptions;
use crate::config::Config;

/// Persist the global endpoint/credential flags (and page size) to the config file
pub fn set(opts: &GlobalOptions, page_size: Option<usize>) -> Result<()> {
    let mut config = Config::load_or_default(opts.config_ref())?;

    if let Some(endpoint) = &opts.api_endpoint {
        config.api_endpoint = Some(endpoint.clone());
    }
    if let Some(key_id) = &opts.key_id {
        config.key_id = Some(key_id.clone());
    }
    if let Some(key_secret) = &opts.key_secret {
        config.key_secret = Some(key_secret.clone());
    }
    if let Some(size) = page_size {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidPageSize(size).into());
        }
        config.preferences.page_size = size;
    }

    config.save_at(opts.config_ref())?;
    let path = Config::resolve_path(opts.config_ref())?;
    eprintln!("Saved configuration to {}", path.display());
    Ok(())
}

/// Print the config file with the secret redacted
pub fn show(opts: &GlobalOptions) -> Result<()> {
    let path = Config::resolve_path(opts.config_ref())?;
    let config = Config::load_at(opts.config_ref())?;

    println!("Config file: {}", path.display());
    println!(
        "API endpoint: {}",
        config.api_endpoint.as_deref().unwrap_or("(default)")
    );
    println!("Key ID: {}", config.key_id.as_deref().unwrap_or("(not set)"));
    println!(
        "Key secret: {}",
        if config.key_secret.is_some() {
            "(set)"
        } else {
            "(not set)"
        }
    );
    println!("Page size: {}", config.preferences.page_size);
    Ok(())
}
