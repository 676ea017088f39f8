//! Auth command implementation

use honeycombio::error::Result;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::models::AuthDisplay;
use crate::output::{Record, print};

/// Show who the configured key authenticates as
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let display = AuthDisplay::new(
        ctx.client.transport().base_url().as_str(),
        ctx.client.auth_info(),
    );
    print(&Record(display), ctx.format, ctx.team())
}
