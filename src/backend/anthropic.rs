// SPDX-License-Identifier: MIT
//! Anthropic Messages API adapter.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{BackendError, Completion, CompletionBackend, CompletionRequest, TokenUsage};

pub const BACKEND_ID: &str = "anthropic";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 8192;

pub struct AnthropicBackend {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl AnthropicBackend {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: "https://api.anthropic.com".into(),
            default_model: DEFAULT_MODEL.into(),
        })
    }

    /// Point the adapter at a different endpoint (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait::async_trait]
impl CompletionBackend for AnthropicBackend {
    fn id(&self) -> &str {
        BACKEND_ID
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, BackendError> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        let mut body = serde_json::json!({
            "model": model,
            "max_tokens": request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            "messages": [{ "role": "user", "content": request.prompt }],
        });
        if let Some(system) = &request.system {
            body["system"] = serde_json::Value::String(system.clone());
        }

        let url = format!("{}/v1/messages", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
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
            // Provider error bodies come back as completion text; the
            // caller's parse-fallback absorbs them.
            debug!(status = status.as_u16(), "anthropic returned non-2xx");
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
struct MessagesResponse {
    content: Vec<ContentBlock>,
    model: String,
    #[serde(default)]
    usage: Option<MessagesUsage>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct MessagesUsage {
    input_tokens: u64,
    output_tokens: u64,
}

fn parse_response(body: &str) -> Result<Completion, BackendError> {
    let resp: MessagesResponse =
        serde_json::from_str(body).map_err(|e| BackendError::InvalidResponse {
            backend: BACKEND_ID.into(),
            detail: e.to_string(),
        })?;

    let text: String = resp
        .content
        .iter()
        .filter(|b| b.kind == "text")
        .filter_map(|b| b.text.as_deref())
        .collect();

    let usage = resp.usage.map(|u| TokenUsage {
        prompt_tokens: u.input_tokens,
        completion_tokens: u.output_tokens,
        total_tokens: u.input_tokens + u.output_tokens,
    });

    Ok(Completion {
        text,
        model: resp.model,
        usage,
    })
}
