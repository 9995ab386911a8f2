//! Agent session lifecycle.

use std::sync::Arc;

use tracing::debug;

use crate::config::ProviderConfig;
use crate::providers::rig::RigProvider;
use crate::providers::{AgentProvider, ProviderError};

enum Backend {
    Config(ProviderConfig),
    Provider(Arc<dyn AgentProvider>),
}

/// A started-or-not handle on the LLM backend.
///
/// `start` and `close` are idempotent and the session closes itself on
/// drop. Agents borrow the session for each invocation and fail with
/// [`ProviderError::NotStarted`] until it has been started.
pub struct AgentSession {
    backend: Backend,
    active: Option<Arc<dyn AgentProvider>>,
}

impl AgentSession {
    /// Session backed by a rig-core provider built from `config` on start.
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            backend: Backend::Config(config),
            active: None,
        }
    }

    /// Session backed by an existing provider.
    pub fn from_provider(provider: Arc<dyn AgentProvider>) -> Self {
        Self {
            backend: Backend::Provider(provider),
            active: None,
        }
    }

    pub fn start(&mut self) -> Result<(), ProviderError> {
        if self.active.is_some() {
            return Ok(());
        }
        let provider: Arc<dyn AgentProvider> = match &self.backend {
            Backend::Config(config) => Arc::new(RigProvider::new(config.clone())?),
            Backend::Provider(provider) => Arc::clone(provider),
        };
        self.active = Some(provider);
        debug!("agent session started");
        Ok(())
    }

    pub fn close(&mut self) {
        if self.active.take().is_some() {
            debug!("agent session closed");
        }
    }

    pub fn is_started(&self) -> bool {
        self.active.is_some()
    }

    pub(crate) fn provider(&self) -> Result<&Arc<dyn AgentProvider>, ProviderError> {
        self.active.as_ref().ok_or(ProviderError::NotStarted)
    }
}

impl Drop for AgentSession {
    fn drop(&mut self) {
        self.close();
    }
}
