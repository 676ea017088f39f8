//! Environment facade

use crate::client::context::Context;
use crate::client::models::{Environment, EnvironmentSettings};
use crate::error::Result;

use super::resource::{ResourceApi, TeamResource};

/// Environments owned by the bootstrap team
pub type Environments = TeamResource<Environment>;

impl TeamResource<Environment> {
    /// Toggle delete protection without touching any other attribute.
    ///
    /// A protected environment must be unprotected before it can be deleted.
    pub async fn set_delete_protection(
        &self,
        ctx: &Context,
        id: &str,
        protected: bool,
    ) -> Result<Environment> {
        let update = Environment {
            settings: Some(EnvironmentSettings {
                delete_protected: Some(protected),
            }),
            ..Environment::with_id(id)
        };
        self.update(ctx, &update).await
    }
}
