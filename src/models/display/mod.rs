//! Display models for table and JSON output
//!
//! Display models flatten API resources into CLI-friendly rows with
//! column names chosen for the terminal.

mod api_key;
mod auth;
mod common;
mod environment;

pub use api_key::{ApiKeyDetail, ApiKeyDisplay};
pub use auth::AuthDisplay;
pub use environment::{EnvironmentDetail, EnvironmentDisplay};
