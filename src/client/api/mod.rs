//! Resource facades over the shared transport
//!
//! - [`AuthApi`] - Credential introspection used at bootstrap
//! - [`ResourceApi`] - Create/get/update/delete/list for one team-scoped resource
//!
//! [`ApiKeys`] and [`Environments`] are [`TeamResource`] instances bound to the
//! team slug discovered at bootstrap.

mod api_keys;
mod auth;
mod environments;
mod resource;

pub use api_keys::ApiKeys;
pub use auth::{AUTH_PATH, AuthApi};
pub use environments::Environments;
pub use resource::{ResourceApi, TeamResource};
