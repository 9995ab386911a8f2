//! Translation request types.

use serde::{Deserialize, Serialize};

/// Default context label when the caller gives none.
pub const DEFAULT_CONTEXT: &str = "general";

/// Register the rewritten text should use.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Formality {
    Informal,
    #[default]
    Neutral,
    Formal,
}

/// Free text to translate and polish, plus the labels that steer tone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    /// Where the text will be used (email, chat, gitlab_comment, ...).
    pub context: String,
    pub formality: Formality,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: DEFAULT_CONTEXT.to_string(),
            formality: Formality::default(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_formality(mut self, formality: Formality) -> Self {
        self.formality = formality;
        self
    }
}
