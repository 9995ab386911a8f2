//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and GitLab API paths so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "mrpilot";

/// Crate version baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Target triple the binary was built for (set by `build.rs`).
pub const TARGET: &str = env!("TARGET");

/// Local config filename (e.g. `.mrpilot.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".mrpilot.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "mrpilot";

/// User agent sent with every GitLab request.
pub const USER_AGENT: &str = concat!("mrpilot/", env!("CARGO_PKG_VERSION"));

/// Path prefix of the GitLab REST API, appended to the instance base URL.
pub const GITLAB_API_PREFIX: &str = "/api/v4";

/// Repository-root style file consulted during review.
pub const EDITOR_CONFIG_PATH: &str = ".editorconfig";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_GITLAB_URL: &str = "MRPILOT_GITLAB_URL";
pub const ENV_GITLAB_TOKEN: &str = "MRPILOT_GITLAB_TOKEN";
/// Fallback token variable commonly exported by GitLab tooling.
pub const ENV_GITLAB_TOKEN_FALLBACK: &str = "GITLAB_TOKEN";
pub const ENV_PROVIDER: &str = "MRPILOT_PROVIDER";
pub const ENV_MODEL: &str = "MRPILOT_MODEL";
pub const ENV_API_KEY: &str = "MRPILOT_API_KEY";
pub const ENV_BASE_URL: &str = "MRPILOT_BASE_URL";
pub const ENV_LOG: &str = "MRPILOT_LOG";
