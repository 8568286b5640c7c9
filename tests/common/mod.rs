//! Scripted completion backend for integration tests.
//!
//! Rules are matched against the prompt and system text of each call, so
//! concurrent emitter calls get deterministic responses regardless of
//! dispatch order.
#![allow(dead_code)]

use std::sync::Mutex;

use appforge::backend::{
    BackendError, Completion, CompletionBackend, CompletionRequest, TokenUsage,
};

pub const SCRIPTED_ID: &str = "scripted";
pub const SCRIPTED_MODEL: &str = "scripted-model-1";

pub enum Scripted {
    /// Return this text (with optional usage).
    Text(String, Option<TokenUsage>),
    /// Fail with a transport error.
    Transport(String),
}

struct Rule {
    needle: String,
    response: Scripted,
}

/// A `CompletionBackend` that answers from a fixed rule table.
pub struct ScriptedBackend {
    rules: Vec<Rule>,
    default_text: String,
    calls: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            default_text: "// generated".to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Respond with `text` when `needle` appears in the prompt or system
    /// text. First matching rule wins.
    pub fn on(mut self, needle: &str, text: &str) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            response: Scripted::Text(text.to_string(), None),
        });
        self
    }

    pub fn on_with_usage(mut self, needle: &str, text: &str, usage: TokenUsage) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            response: Scripted::Text(text.to_string(), Some(usage)),
        });
        self
    }

    /// Simulate a transport failure (e.g. timeout) for matching calls.
    pub fn on_transport_failure(mut self, needle: &str, detail: &str) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            response: Scripted::Transport(detail.to_string()),
        });
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CompletionBackend for ScriptedBackend {
    fn id(&self) -> &str {
        SCRIPTED_ID
    }

    fn default_model(&self) -> &str {
        SCRIPTED_MODEL
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, BackendError> {
        let haystack = format!(
            "{}\n{}",
            request.prompt,
            request.system.as_deref().unwrap_or("")
        );
        self.calls.lock().expect("calls lock").push(request);

        for rule in &self.rules {
            if haystack.contains(&rule.needle) {
                return match &rule.response {
                    Scripted::Text(text, usage) => Ok(Completion {
                        text: text.clone(),
                        model: SCRIPTED_MODEL.to_string(),
                        usage: *usage,
                    }),
                    Scripted::Transport(detail) => Err(BackendError::Transport {
                        backend: SCRIPTED_ID.to_string(),
                        detail: detail.clone(),
                    }),
                };
            }
        }

        Ok(Completion {
            text: self.default_text.clone(),
            model: SCRIPTED_MODEL.to_string(),
            usage: None,
        })
    }
}
