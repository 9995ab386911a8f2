//! rig-core integration for the review and translation agents.
//!
//! Uses rig-core's provider clients and Agent abstraction for multi-provider
//! support. Currently supports: Anthropic, OpenAI, Gemini, DeepSeek, Groq,
//! and any OpenAI-compatible API.
//!
//! When the request carries a [`MergeRequestTool`](crate::tools::MergeRequestTool),
//! it is registered with the agent for rig-core's native tool calling.

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::models::ProviderName;

use super::{AgentProvider, AgentRequest, ProviderError};

/// Maximum tokens per LLM completion response for plain prompts.
const MAX_TOKENS: u64 = 16384;

/// Build an agent from a rig-core client and prompt it.
///
/// With a tool, `max_tokens` is left unset so the model keeps the full
/// output budget for tool calls and reasoning.
macro_rules! prompt_agent {
    ($client:expr, $model:expr, $request:expr, $label:expr) => {{
        let request: AgentRequest = $request;
        let builder = $client
            .agent($model)
            .preamble(&request.preamble)
            .temperature(0.0);
        let result = match request.tool {
            Some(tool) => {
                let agent = builder
                    .tool(tool)
                    .default_max_turns(request.max_turns)
                    .build();
                agent.prompt(request.prompt.as_str()).await
            }
            None => {
                let agent = builder.max_tokens(MAX_TOKENS).build();
                agent.prompt(request.prompt.as_str()).await
            }
        };
        result.map_err(|e| ProviderError::ApiError(format!("{} API error: {e}", $label)))
    }};
}

/// Create a rig-core client using the `Client::new(api_key)` convention.
macro_rules! new_client {
    ($provider_mod:path, $api_key:expr, $label:expr) => {{
        <$provider_mod>::new($api_key).map_err(|e| {
            ProviderError::ApiError(format!("failed to create {} client: {e}", $label))
        })
    }};
}

/// rig-core based agent provider.
///
/// The provider name in config selects which rig-core provider to use.
pub struct RigProvider {
    config: ProviderConfig,
}

impl RigProvider {
    /// Create a new RigProvider with the given configuration.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_none() {
            return Err(ProviderError::NotConfigured(format!(
                "no API key found for provider '{}'. Set {} or {}.",
                config.name,
                crate::constants::ENV_API_KEY,
                config.name.api_key_env_var()
            )));
        }
        if config.name == ProviderName::OpenAICompatible && config.base_url.is_none() {
            return Err(ProviderError::NotConfigured(
                "openai-compatible provider requires base_url to be set".to_string(),
            ));
        }
        Ok(Self { config })
    }

    /// Build an OpenAI-style client, optionally with a custom base URL.
    fn build_openai_client(
        &self,
        api_key: &str,
        label: &str,
    ) -> Result<providers::openai::CompletionsClient, ProviderError> {
        let mut builder = providers::openai::CompletionsClient::builder().api_key(api_key);
        if let Some(ref base_url) = self.config.base_url {
            builder = builder.base_url(base_url);
        }
        let client: providers::openai::CompletionsClient = builder
            .build()
            .map_err(|e| ProviderError::ApiError(format!("failed to create {label} client: {e}")))?;
        Ok(client)
    }

    /// Get the API key or return an error.
    fn api_key(&self) -> Result<&str, ProviderError> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::NotConfigured("missing API key".to_string()))
    }
}

#[async_trait]
impl AgentProvider for RigProvider {
    async fn prompt(&self, request: AgentRequest) -> Result<String, ProviderError> {
        let api_key = self.api_key()?;
        let model = self.config.model.as_str();
        debug!(
            provider = %self.config.name,
            model,
            tools = request.tool.is_some(),
            max_turns = request.max_turns,
            "sending prompt"
        );

        match self.config.name {
            ProviderName::Anthropic => {
                let client: providers::anthropic::Client = providers::anthropic::Client::builder()
                    .api_key(api_key)
                    .build()
                    .map_err(|e| {
                        ProviderError::ApiError(format!("failed to create Anthropic client: {e}"))
                    })?;
                prompt_agent!(client, model, request, "Anthropic")
            }
            ProviderName::OpenAI => {
                let client = self.build_openai_client(api_key, "OpenAI")?;
                prompt_agent!(client, model, request, "OpenAI")
            }
            ProviderName::Gemini => {
                let client = new_client!(providers::gemini::Client, api_key, "Gemini")?;
                prompt_agent!(client, model, request, "Gemini")
            }
            ProviderName::DeepSeek => {
                let client = new_client!(providers::deepseek::Client, api_key, "DeepSeek")?;
                prompt_agent!(client, model, request, "DeepSeek")
            }
            ProviderName::Groq => {
                let client = new_client!(providers::groq::Client, api_key, "Groq")?;
                prompt_agent!(client, model, request, "Groq")
            }
            ProviderName::OpenAICompatible => {
                let client = self.build_openai_client(api_key, "OpenAI-compatible")?;
                prompt_agent!(client, model, request, "OpenAI-compatible")
            }
        }
    }
}
