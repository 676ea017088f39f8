//! API key commands

use log::info;

use honeycombio::client::models::{ApiKey, ApiKeyPermissions, Environment, KeyType};
use honeycombio::error::Result;
use honeycombio::ResourceApi;

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::run_list_command;
use crate::cli::{CommandContext, PaginationArgs};
use crate::models::{ApiKeyDetail, ApiKeyDisplay};
use crate::output::{Record, print};

/// Fields for a new API key
#[derive(Debug, Clone)]
pub struct NewApiKey {
    pub name: String,
    pub environment: String,
    pub key_type: KeyType,
    pub create_datasets: bool,
    pub disabled: bool,
}

impl From<NewApiKey> for ApiKey {
    fn from(new: NewApiKey) -> Self {
        ApiKey {
            name: Some(new.name),
            key_type: Some(new.key_type),
            disabled: Some(new.disabled),
            // Only ingest keys carry permissions
            permissions: (new.key_type == KeyType::Ingest).then_some(ApiKeyPermissions {
                create_datasets: new.create_datasets,
            }),
            environment: Some(Environment::with_id(new.environment)),
            ..Default::default()
        }
    }
}

/// Run the api-key list command
pub async fn list(
    opts: &GlobalOptions,
    key_type: Option<KeyType>,
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let options = pagination.to_options(ctx.config.preferences.page_size);
    let pager = match key_type {
        Some(key_type) => ctx.client.api_keys().list_by_type(key_type, options)?,
        None => ctx.client.api_keys().list(options)?,
    };
    run_list_command::<ApiKey, ApiKeyDisplay>(&ctx, pager, pagination.limit).await
}

/// Run the api-key get command
pub async fn get(opts: &GlobalOptions, id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let key = ctx.client.api_keys().get(&ctx.cancel, id).await?;
    print(&Record(ApiKeyDetail::from(key)), ctx.format, ctx.team())
}

/// Run the api-key create command
pub async fn create(opts: &GlobalOptions, new: NewApiKey) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let created = ctx
        .client
        .api_keys()
        .create(&ctx.cancel, &ApiKey::from(new))
        .await?;
    info!("created API key {}", created.id);
    print(&Record(ApiKeyDetail::from(created)), ctx.format, ctx.team())
}

/// Run the api-key update command
pub async fn update(
    opts: &GlobalOptions,
    id: &str,
    name: Option<String>,
    disabled: Option<bool>,
) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let update = ApiKey {
        id: id.to_string(),
        name,
        disabled,
        ..Default::default()
    };
    let updated = ctx.client.api_keys().update(&ctx.cancel, &update).await?;
    print(&Record(ApiKeyDetail::from(updated)), ctx.format, ctx.team())
}

/// Run the api-key delete command
pub async fn delete(opts: &GlobalOptions, id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    ctx.client.api_keys().delete(&ctx.cancel, id).await?;
    eprintln!("Deleted API key {}", id);
    Ok(())
}
