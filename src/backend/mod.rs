// SPDX-License-Identifier: MIT
//! Completion backend seam — the uniform interface to a remote
//! text-completion capability.
//!
//! One adapter instance exists per backend id. The adapter layer does no
//! retries, caching, or rate-limiting; those belong to whoever owns the
//! adapter instance. Each adapter carries a bounded per-request timeout so a
//! hung provider call cannot block a generation indefinitely.

pub mod anthropic;
pub mod openai;
pub mod registry;

pub use registry::BackendRegistry;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ─── Request / response types ────────────────────────────────────────────────

/// One completion call.
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    /// The user prompt body.
    pub prompt: String,
    /// Optional system instructions.
    pub system: Option<String>,
    /// Model-name override; `None` uses the adapter's default model.
    pub model: Option<String>,
    /// Output-size cap; `None` uses the adapter's default.
    pub max_tokens: Option<u32>,
}

/// Token accounting as reported by the provider, when it reports any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

impl TokenUsage {
    pub fn add(&mut self, other: &TokenUsage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
    }
}

/// Sum an iterator of optional usage reports. `None` when no call reported
/// usage at all, so absent accounting stays distinguishable from zero.
pub fn sum_usage<'a, I>(reports: I) -> Option<TokenUsage>
where
    I: IntoIterator<Item = Option<&'a TokenUsage>>,
{
    let mut total: Option<TokenUsage> = None;
    for report in reports.into_iter().flatten() {
        total.get_or_insert_with(TokenUsage::default).add(report);
    }
    total
}

/// A completed backend call.
#[derive(Debug, Clone)]
pub struct Completion {
    /// Generated text, returned verbatim.
    pub text: String,
    /// Model the provider actually served.
    pub model: String,
    pub usage: Option<TokenUsage>,
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Backend failure taxonomy.
///
/// Ordinary non-2xx provider responses with a textual error body are NOT
/// errors here — adapters return the body as completion text and let the
/// downstream parse-fallback absorb it. Only failures where the transport
/// could not produce a response at all surface as `Transport`.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("transport failure talking to {backend}: {detail}")]
    Transport { backend: String, detail: String },
    #[error("backend {backend} returned an undecodable response: {detail}")]
    InvalidResponse { backend: String, detail: String },
    #[error("unknown backend id: {0}")]
    UnknownBackend(String),
}

impl BackendError {
    pub(crate) fn transport(backend: &str, err: &reqwest::Error) -> Self {
        Self::Transport {
            backend: backend.to_string(),
            detail: format!("{err:#}"),
        }
    }
}

// ─── The adapter contract ────────────────────────────────────────────────────

/// Uniform interface to a remote text-completion capability.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Stable backend identifier (registry key, metadata stamp).
    fn id(&self) -> &str;

    /// Model served when a request carries no override.
    fn default_model(&self) -> &str;

    /// Issue one completion call.
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_usage_absent_when_nothing_reported() {
        assert_eq!(sum_usage([None, None]), None);
    }

    #[test]
    fn sum_usage_adds_reported_calls() {
        let a = TokenUsage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        };
        let b = TokenUsage {
            prompt_tokens: 1,
            completion_tokens: 2,
            total_tokens: 3,
        };
        let total = sum_usage([Some(&a), None, Some(&b)]).expect("usage reported");
        assert_eq!(total.prompt_tokens, 11);
        assert_eq!(total.completion_tokens, 7);
        assert_eq!(total.total_tokens, 18);
    }
}
