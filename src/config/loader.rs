//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.mrpilot.toml` in the working directory
//! 4. `~/.config/mrpilot/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants;
use crate::env::Env;
use crate::models::{Formality, ProviderName};

/// Errors during config loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("GitLab {field} is not configured. Set [gitlab] {field} in {file} or {env}.")]
    MissingGitLab {
        field: &'static str,
        file: &'static str,
        env: &'static str,
    },

    #[error("GitLab token contains characters that cannot be sent in an HTTP header")]
    InvalidToken,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gitlab: GitLabConfig,
    pub provider: ProviderConfig,
    pub review: ReviewConfig,
    pub translate: TranslateConfig,
}

/// GitLab instance configuration, as written in config files.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GitLabConfig {
    pub base_url: Option<String>,
    pub token: Option<String>,
}

impl std::fmt::Debug for GitLabConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitLabConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Validated GitLab connection settings.
///
/// Produced by [`Config::gitlab_settings`]; both fields are guaranteed
/// non-empty and `base_url` carries no trailing slash.
#[derive(Clone, PartialEq, Eq)]
pub struct GitLabSettings {
    pub base_url: String,
    pub token: String,
}

impl GitLabSettings {
    /// Build settings directly, normalizing the base URL.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for GitLabSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitLabSettings")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// LLM provider configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub name: ProviderName,
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: ProviderName::Anthropic,
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: None,
            api_key: None,
        }
    }
}

/// Review agent configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Upper bound on agent turns (tool calls plus the final answer).
    pub max_turns: usize,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self { max_turns: 10 }
    }
}

/// Translation agent configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    pub target_language: String,
    pub default_context: String,
    pub default_formality: Formality,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            target_language: "English".to_string(),
            default_context: crate::models::translation::DEFAULT_CONTEXT.to_string(),
            default_formality: Formality::Neutral,
        }
    }
}

/// One config file as written: only the keys present in the file are `Some`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    gitlab: GitLabConfig,
    provider: ProviderLayer,
    review: ReviewLayer,
    translate: TranslateLayer,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct ProviderLayer {
    name: Option<ProviderName>,
    model: Option<String>,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl std::fmt::Debug for ProviderLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderLayer")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReviewLayer {
    max_turns: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TranslateLayer {
    target_language: Option<String>,
    default_context: Option<String>,
    default_formality: Option<Formality>,
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads the global config, then `.mrpilot.toml` in `work_dir`, then
    /// applies environment variable overrides.
    pub fn load(work_dir: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        if let Some(dir) = work_dir {
            let local_path = dir.join(constants::CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load one config file as a layer.
    fn load_file(path: &Path) -> Result<ConfigLayer, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge one file layer into this config; every field the layer sets wins.
    fn merge(&mut self, layer: ConfigLayer) {
        if layer.gitlab.base_url.is_some() {
            self.gitlab.base_url = layer.gitlab.base_url;
        }
        if layer.gitlab.token.is_some() {
            self.gitlab.token = layer.gitlab.token;
        }

        let provider = layer.provider;
        if let Some(name) = provider.name {
            self.provider.name = name;
        }
        if let Some(model) = provider.model {
            self.provider.model = model;
        }
        if provider.base_url.is_some() {
            self.provider.base_url = provider.base_url;
        }
        if provider.api_key.is_some() {
            self.provider.api_key = provider.api_key;
        }

        if let Some(max_turns) = layer.review.max_turns {
            self.review.max_turns = max_turns;
        }

        let translate = layer.translate;
        if let Some(language) = translate.target_language {
            self.translate.target_language = language;
        }
        if let Some(context) = translate.default_context {
            self.translate.default_context = context;
        }
        if let Some(formality) = translate.default_formality {
            self.translate.default_formality = formality;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(val) = env.non_empty(constants::ENV_GITLAB_URL) {
            self.gitlab.base_url = Some(val);
        }
        if let Some(val) = env.first_of(&[
            constants::ENV_GITLAB_TOKEN,
            constants::ENV_GITLAB_TOKEN_FALLBACK,
        ]) {
            self.gitlab.token = Some(val);
        }

        if let Some(val) = env.non_empty(constants::ENV_PROVIDER) {
            match val.parse::<ProviderName>() {
                Ok(name) => self.provider.name = name,
                Err(_) => tracing::warn!(
                    var = constants::ENV_PROVIDER,
                    value = %val,
                    "ignoring unsupported provider"
                ),
            }
        }
        if let Some(val) = env.non_empty(constants::ENV_MODEL) {
            self.provider.model = val;
        }
        if let Some(val) = env.non_empty(constants::ENV_BASE_URL) {
            self.provider.base_url = Some(val);
        }

        let api_key = env.first_of(&[
            constants::ENV_API_KEY,
            self.provider.name.api_key_env_var(),
        ]);
        if api_key.is_some() {
            self.provider.api_key = api_key;
        }
    }

    /// Validate and normalize the GitLab connection settings.
    ///
    /// Both the base URL and the token are required; blank values count
    /// as missing. The trailing slash of the base URL is stripped.
    pub fn gitlab_settings(&self) -> Result<GitLabSettings, ConfigError> {
        let base_url = self
            .gitlab
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingGitLab {
                field: "base_url",
                file: constants::CONFIG_FILENAME,
                env: constants::ENV_GITLAB_URL,
            })?;
        let token = self
            .gitlab
            .token
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingGitLab {
                field: "token",
                file: constants::CONFIG_FILENAME,
                env: constants::ENV_GITLAB_TOKEN,
            })?;

        Ok(GitLabSettings::new(base_url, token))
    }
}
