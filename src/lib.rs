//! mrpilot: AI-assisted GitLab merge request review (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod agents;
pub mod config;
pub mod constants;
pub mod context;
pub mod env;
pub mod gitlab;
pub mod models;
pub mod output;
pub mod providers;
pub mod tools;
