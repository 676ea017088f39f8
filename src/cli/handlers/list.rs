//! Generic list command handler
//!
//! Drives a [`Pager`] until it is exhausted (or `--limit` is reached),
//! converts each resource to its display type and prints the result.

use log::{debug, warn};
use serde::Serialize;
use tabled::Tabled;

use honeycombio::Pager;
use honeycombio::client::jsonapi::Resource;
use honeycombio::error::Result;

use crate::cli::CommandContext;
use crate::output::print;

/// Run a standard list command.
///
/// # Type Parameters
///
/// * `R` - The API resource type yielded by the pager (e.g. `ApiKey`)
/// * `D` - The display type that implements `From<R>`, `Tabled`, and `Serialize`
///
/// # Example
///
/// ```ignore
/// let pager = ctx.client.environments().list(options)?;
/// run_list_command::<Environment, EnvironmentDisplay>(&ctx, pager, limit).await
/// ```
pub async fn run_list_command<R, D>(
    ctx: &CommandContext,
    pager: Pager<R>,
    limit: Option<usize>,
) -> Result<()>
where
    R: Resource,
    D: From<R> + Tabled + Serialize,
{
    let items = collect(ctx, pager, limit).await?;
    debug!("Fetched {} {}", items.len(), R::TYPE);

    let display_items: Vec<D> = items.into_iter().map(D::from).collect();
    print(&display_items, ctx.format, ctx.team())
}

async fn collect<R: Resource>(
    ctx: &CommandContext,
    mut pager: Pager<R>,
    limit: Option<usize>,
) -> Result<Vec<R>> {
    let mut items = Vec::new();
    while pager.has_next() {
        items.extend(pager.next(&ctx.cancel).await?);
        if limit.is_some_and(|limit| items.len() >= limit) {
            break;
        }
    }
    if let Some(err) = pager.halted() {
        warn!("listing is incomplete, the server sent an unusable next link: {}", err);
    }
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    Ok(items)
}
