//! Typed client for the Honeycomb management API
//!
//! ```ignore
//! let ctx = Context::background();
//! let client = Client::new(&ctx, ClientConfig::new()).await?;
//! let mut pager = client.environments().list(ListOptions::new().page_size(5))?;
//! while pager.has_next() {
//!     for env in pager.next(&ctx).await? {
//!         println!("{}", env.id);
//!     }
//! }
//! ```

pub mod client;
pub mod error;

pub use client::{Client, ClientConfig, Context, ListOptions, Pager, ResourceApi};
pub use error::{ApiError, ConfigError, Error, Result};
