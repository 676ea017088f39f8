//! Environment commands

use log::info;

use honeycombio::client::models::{Environment, EnvironmentColor, EnvironmentSettings};
use honeycombio::error::Result;
use honeycombio::ResourceApi;

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::run_list_command;
use crate::cli::{CommandContext, PaginationArgs};
use crate::models::{EnvironmentDetail, EnvironmentDisplay};
use crate::output::{Record, print};

/// Attributes that may change after creation
#[derive(Debug, Clone, Default)]
pub struct EnvironmentChanges {
    pub description: Option<String>,
    pub color: Option<EnvironmentColor>,
    pub delete_protected: Option<bool>,
}

impl EnvironmentChanges {
    /// Partial update carrying only the requested changes.
    pub fn into_update(self, id: &str) -> Environment {
        Environment {
            description: self.description,
            color: self.color,
            settings: self
                .delete_protected
                .map(|protected| EnvironmentSettings {
                    delete_protected: Some(protected),
                }),
            ..Environment::with_id(id)
        }
    }
}

/// Run the environment list command
pub async fn list(opts: &GlobalOptions, pagination: &PaginationArgs) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let options = pagination.to_options(ctx.config.preferences.page_size);
    let pager = ctx.client.environments().list(options)?;
    run_list_command::<Environment, EnvironmentDisplay>(&ctx, pager, pagination.limit).await
}

/// Run the environment get command
pub async fn get(opts: &GlobalOptions, id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let env = ctx.client.environments().get(&ctx.cancel, id).await?;
    print(&Record(EnvironmentDetail::from(env)), ctx.format, ctx.team())
}

/// Run the environment create command
pub async fn create(
    opts: &GlobalOptions,
    name: String,
    description: Option<String>,
    color: Option<EnvironmentColor>,
) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let new = Environment {
        name: Some(name),
        description,
        color,
        ..Default::default()
    };
    let created = ctx.client.environments().create(&ctx.cancel, &new).await?;
    info!("created environment {}", created.id);
    print(&Record(EnvironmentDetail::from(created)), ctx.format, ctx.team())
}

/// Run the environment update command
pub async fn update(opts: &GlobalOptions, id: &str, changes: EnvironmentChanges) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let updated = ctx
        .client
        .environments()
        .update(&ctx.cancel, &changes.into_update(id))
        .await?;
    print(&Record(EnvironmentDetail::from(updated)), ctx.format, ctx.team())
}

/// Run the environment delete command
pub async fn delete(opts: &GlobalOptions, id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    ctx.client.environments().delete(&ctx.cancel, id).await?;
    eprintln!("Deleted environment {}", id);
    Ok(())
}
