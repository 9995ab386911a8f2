//! Translation agent.
//!
//! No fetch stage: the request text goes straight into the prompt.

use tokio_util::sync::CancellationToken;
use tracing::info;

use super::builtin;
use super::session::AgentSession;
use crate::models::TranslationRequest;
use crate::providers::{AgentRequest, ProviderError};

/// Translates and polishes free text into a fixed target language.
pub struct TranslationAgent {
    target_language: String,
}

impl TranslationAgent {
    pub fn new(target_language: impl Into<String>) -> Self {
        Self {
            target_language: target_language.into(),
        }
    }

    /// User message for `request`.
    pub fn build_prompt(&self, request: &TranslationRequest) -> String {
        let lang = &self.target_language;
        format!(
            "Translate the following text into {lang} and improve its writing quality.\n\
             \n\
             Context:\n{context}\n\
             \n\
             Formality level:\n{formality}\n\
             \n\
             Guidelines:\n\
             - Use natural, idiomatic {lang}\n\
             - Improve sentence structure and flow\n\
             - Adjust tone to match the context\n\
             - Keep the message aligned with the original intent\n\
             - Be concise, clear, and professional when appropriate\n\
             \n\
             Text:\n{text}",
            context = request.context,
            formality = request.formality,
            text = request.text,
        )
    }

    /// Run the translation and return only the rewritten text.
    pub async fn translate(
        &self,
        session: &AgentSession,
        request: &TranslationRequest,
        cancel: &CancellationToken,
    ) -> Result<String, ProviderError> {
        if request.text.trim().is_empty() {
            return Err(ProviderError::InvalidInput(
                "nothing to translate: text is empty".to_string(),
            ));
        }
        let provider = session.provider()?;

        let agent_request = AgentRequest::new(
            builtin::translator_preamble(&self.target_language),
            self.build_prompt(request),
        );

        info!(
            context = %request.context,
            formality = %request.formality,
            chars = request.text.chars().count(),
            "starting translation"
        );
        let text = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ProviderError::Cancelled),
            result = provider.prompt(agent_request) => result?,
        };
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    use crate::models::Formality;
    use crate::providers::AgentProvider;

    #[derive(Default)]
    struct CapturingProvider {
        seen: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl AgentProvider for CapturingProvider {
        async fn prompt(&self, request: AgentRequest) -> Result<String, ProviderError> {
            assert!(request.tool.is_none());
            self.seen
                .lock()
                .unwrap()
                .push((request.preamble, request.prompt));
            Ok("\n  Hello, could you review my change?  \n".to_string())
        }
    }

    fn started(provider: Arc<CapturingProvider>) -> AgentSession {
        let mut session = AgentSession::from_provider(provider);
        session.start().unwrap();
        session
    }

    #[test]
    fn prompt_carries_labels_and_text() {
        let agent = TranslationAgent::new("English");
        let request = TranslationRequest::new("Ciao, puoi rivedere?")
            .with_context("gitlab_comment")
            .with_formality(Formality::Informal);

        let prompt = agent.build_prompt(&request);
        assert!(prompt.starts_with("Translate the following text into English"));
        assert!(prompt.contains("Context:\ngitlab_comment\n"));
        assert!(prompt.contains("Formality level:\ninformal\n"));
        assert!(prompt.ends_with("Text:\nCiao, puoi rivedere?"));
    }

    #[tokio::test]
    async fn translate_returns_trimmed_output() {
        let provider = Arc::new(CapturingProvider::default());
        let session = started(provider.clone());
        let agent = TranslationAgent::new("German");

        let text = agent
            .translate(&session, &TranslationRequest::new("ciao"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(text, "Hello, could you review my change?");
        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].0.contains("into German"));
        assert!(seen[0].1.contains("Context:\ngeneral\n"));
        assert!(seen[0].1.contains("Formality level:\nneutral\n"));
    }

    #[tokio::test]
    async fn empty_text_is_rejected_before_model_call() {
        let provider = Arc::new(CapturingProvider::default());
        let session = started(provider.clone());

        let err = TranslationAgent::new("English")
            .translate(&session, &TranslationRequest::new("   "), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::InvalidInput(_)));
        assert!(provider.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn cancelled_before_start() {
        let session = started(Arc::new(CapturingProvider::default()));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = TranslationAgent::new("English")
            .translate(&session, &TranslationRequest::new("ciao"), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Cancelled));
    }
}
