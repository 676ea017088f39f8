//! Pagination argument types for list commands

use clap::Args;

use honeycombio::ListOptions;

/// Shared pagination arguments for list commands.
///
/// ```ignore
/// List {
///     #[command(flatten)]
///     pagination: PaginationArgs,
/// }
/// ```
#[derive(Args, Debug, Default, Clone)]
pub struct PaginationArgs {
    /// Items fetched per request (1-100)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Stop after this many results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

impl PaginationArgs {
    /// Listing options, falling back to the configured page size.
    pub fn to_options(&self, default_page_size: usize) -> ListOptions {
        ListOptions::new().page_size(self.page_size.unwrap_or(default_page_size))
    }
}
