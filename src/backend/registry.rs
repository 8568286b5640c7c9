// SPDX-License-Identifier: MIT
//! Backend registry — maps backend id → adapter instance.
//!
//! The registry is injected into the orchestrator, so adding a provider
//! means implementing `CompletionBackend` and registering it here; no
//! dispatch switch is duplicated anywhere downstream.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::{anthropic::AnthropicBackend, openai::OpenAiBackend};
use super::{BackendError, CompletionBackend};

#[derive(Default)]
pub struct BackendRegistry {
    backends: HashMap<String, Arc<dyn CompletionBackend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter under its own id. Replaces any previous adapter
    /// with the same id.
    pub fn register(&mut self, backend: Arc<dyn CompletionBackend>) {
        self.backends.insert(backend.id().to_string(), backend);
    }

    pub fn get(&self, id: &str) -> Result<Arc<dyn CompletionBackend>, BackendError> {
        self.backends
            .get(id)
            .cloned()
            .ok_or_else(|| BackendError::UnknownBackend(id.to_string()))
    }

    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.backends.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Build a registry from API keys present in the environment
    /// (`ANTHROPIC_API_KEY`, `OPENAI_API_KEY`). Providers without a key are
    /// simply not registered.
    pub fn from_env(timeout: Duration) -> anyhow::Result<Self> {
        let mut registry = Self::new();

        if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
            if !key.trim().is_empty() {
                registry.register(Arc::new(AnthropicBackend::new(key, timeout)?));
                info!(backend = "anthropic", "completion backend registered");
            }
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.trim().is_empty() {
                registry.register(Arc::new(OpenAiBackend::new(key, timeout)?));
                info!(backend = "openai", "completion backend registered");
            }
        }

        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_is_an_error() {
        let registry = BackendRegistry::new();
        let err = registry.get("nope").err().unwrap();
        assert!(matches!(err, BackendError::UnknownBackend(id) if id == "nope"));
    }

    #[test]
    fn register_and_fetch() {
        let mut registry = BackendRegistry::new();
        let backend =
            AnthropicBackend::new("test-key", Duration::from_secs(5)).expect("client builds");
        registry.register(Arc::new(backend));
        assert!(registry.get("anthropic").is_ok());
        assert_eq!(registry.ids(), vec!["anthropic".to_string()]);
    }
}
