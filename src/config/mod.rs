//! Configuration loading and layering.
//!
//! Handles `.mrpilot.toml` loading, environment variable resolution,
//! and validation of the GitLab connection settings.

pub mod loader;

pub use loader::{Config, ConfigError, GitLabSettings, ProviderConfig};
