// SPDX-License-Identifier: MIT
//! OpenAI Chat Completions adapter.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{BackendError, Completion, CompletionBackend, CompletionRequest, TokenUsage};

pub const BACKEND_ID: &str = "openai";
pub const DEFAULT_MODEL: &str = "gpt-4o";

pub struct OpenAiBackend {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl OpenAiBackend {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: "https://api.openai.com".into(),
            default_model: DEFAULT_MODEL.into(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait::async_trait]
impl CompletionBackend for OpenAiBackend {
    fn id(&self) -> &str {
        BACKEND_ID
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, BackendError> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);

        let mut messages = Vec::new();
        if let Some(system) = &request.system {
            messages.push(serde_json::json!({ "role": "system", "content": system }));
        }
        messages.push(serde_json::json!({ "role": "user", "content": request.prompt }));

        let mut body = serde_json::json!({
            "model": model,
            "messages": messages,
        });
        if let Some(max) = request.max_tokens {
            body["max_completion_tokens"] = serde_json::Value::from(max);
        }

        let url = format!("{}/v1/chat/completions", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::transport(BACKEND_ID, &e))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| BackendError::transport(BACKEND_ID, &e))?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "openai returned non-2xx");
            if text.trim().is_empty() {
                return Err(BackendError::InvalidResponse {
                    backend: BACKEND_ID.into(),
                    detail: format!("HTTP {status} with empty body"),
                });
            }
            return Ok(Completion {
                text,
                model: model.to_string(),
                usage: None,
            });
        }

        parse_response(&text)
    }
}

// ─── Response decoding ────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    model: String,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
    total_tokens: u64,
}

fn parse_response(body: &str) -> Result<Completion, BackendError> {
    let resp: ChatResponse =
        serde_json::from_str(body).map_err(|e| BackendError::InvalidResponse {
            backend: BACKEND_ID.into(),
            detail: e.to_string(),
        })?;

    let text = resp
        .choices
        .first()
        .and_then(|c| c.message.content.clone())
        .unwrap_or_default();

    let usage = resp.usage.map(|u| TokenUsage {
        prompt_tokens: u.prompt_tokens,
        completion_tokens: u.completion_tokens,
        total_tokens: u.total_tokens,
    });

    Ok(Completion {
        text,
        model: resp.model,
        usage,
    })
}
