//! Display models for CLI output

pub mod display;

pub use display::{
    ApiKeyDetail, ApiKeyDisplay, AuthDisplay, EnvironmentDetail, EnvironmentDisplay,
};
