//! Shared types used across all modules.
//!
//! This module defines the merge-request data model, the translation
//! request, and the LLM backend selector. Other modules import from here
//! rather than reaching into each other's internals.

pub mod merge_request;
pub mod translation;

use serde::{Deserialize, Serialize};

pub use merge_request::{DiffEntry, MergeRequestCoordinates, MergeRequestInfo, ProjectId, ReviewContext};
pub use translation::{Formality, TranslationRequest};

/// Supported LLM provider backends.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ProviderName {
    #[default]
    Anthropic,
    #[serde(rename = "openai")]
    #[strum(serialize = "openai")]
    OpenAI,
    Gemini,
    #[serde(rename = "deepseek")]
    #[strum(serialize = "deepseek")]
    DeepSeek,
    Groq,
    /// Any OpenAI-compatible API (e.g. Ollama, local servers).
    #[serde(rename = "openai-compatible")]
    #[strum(serialize = "openai-compatible")]
    OpenAICompatible,
}

impl ProviderName {
    /// Provider-specific environment variable holding the API key.
    ///
    /// Matches the names rig-core's `from_env()` constructors read.
    pub fn api_key_env_var(self) -> &'static str {
        match self {
            ProviderName::Anthropic => "ANTHROPIC_API_KEY",
            ProviderName::OpenAI | ProviderName::OpenAICompatible => "OPENAI_API_KEY",
            ProviderName::Gemini => "GEMINI_API_KEY",
            ProviderName::DeepSeek => "DEEPSEEK_API_KEY",
            ProviderName::Groq => "GROQ_API_KEY",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::VariantNames;

    #[test]
    fn provider_name_display_matches_config_spelling() {
        assert_eq!(ProviderName::Anthropic.to_string(), "anthropic");
        assert_eq!(ProviderName::OpenAI.to_string(), "openai");
        assert_eq!(ProviderName::DeepSeek.to_string(), "deepseek");
        assert_eq!(ProviderName::OpenAICompatible.to_string(), "openai-compatible");
    }

    #[test]
    fn provider_name_parses_case_insensitively() {
        assert_eq!("OpenAI".parse::<ProviderName>().unwrap(), ProviderName::OpenAI);
        assert_eq!("GEMINI".parse::<ProviderName>().unwrap(), ProviderName::Gemini);
        assert!("mystery".parse::<ProviderName>().is_err());
    }

    #[test]
    fn provider_name_serde_matches_display() {
        for name in ProviderName::VARIANTS {
            let parsed: ProviderName = name.parse().unwrap();
            let json = serde_json::to_string(&parsed).unwrap();
            assert_eq!(json, format!("\"{name}\""));
        }
    }

    #[test]
    fn api_key_env_vars() {
        assert_eq!(ProviderName::Anthropic.api_key_env_var(), "ANTHROPIC_API_KEY");
        assert_eq!(ProviderName::OpenAICompatible.api_key_env_var(), "OPENAI_API_KEY");
    }
}
