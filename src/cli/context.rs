//! Command execution context
//!
//! Loads the config file, merges command-line overrides, and bootstraps an
//! authenticated client once per command.

use log::debug;

use honeycombio::error::Result;
use honeycombio::{Client, Context};

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::config::Config;

/// Shared state for one command invocation.
pub struct CommandContext {
    /// Loaded configuration (defaults if no file exists)
    pub config: Config,
    /// Client bound to the key's team
    pub client: Client,
    /// Output format preference
    pub format: OutputFormat,
    /// Cancelled on Ctrl-C
    pub cancel: Context,
}

impl CommandContext {
    /// Load config and authenticate.
    ///
    /// # Errors
    /// Returns a configuration error if either half of the key is missing, or
    /// the API error if the key is rejected.
    pub async fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_or_default(opts.config_ref())?;
        let cancel = interruptible();

        let client_config = config.client_config(&opts.overrides());
        let client = Client::new(&cancel, client_config).await?;
        debug!("using team '{}'", client.team_slug());

        Ok(Self {
            config,
            client,
            format: opts.format,
            cancel,
        })
    }

    /// Team slug for output metadata.
    pub fn team(&self) -> Option<&str> {
        Some(self.client.team_slug())
    }
}

/// A context that is cancelled when the user presses Ctrl-C.
fn interruptible() -> Context {
    let (ctx, handle) = Context::with_cancel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupted, cancelling in-flight requests");
            handle.cancel();
        }
    });
    ctx
}
