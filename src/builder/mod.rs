// SPDX-License-Identifier: MIT
//! Application model builder — turns one natural-language request into the
//! canonical `AppModel`.
//!
//! The builder issues exactly one backend call with a schema-describing
//! system prompt and parses the reply strictly. On parse failure it does NOT
//! propagate an error: it substitutes `AppModel::minimal` and carries on.
//! That silent substitution is a deliberate availability-over-precision
//! product policy — do not "fix" it into a hard failure.

pub mod prompts;
pub mod templates;

use std::sync::Arc;
use tracing::{debug, warn};

use crate::appmodel::{AppModel, Target};
use crate::backend::{BackendError, CompletionBackend, CompletionRequest, TokenUsage};

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Unknown template id — a caller mistake, surfaced immediately.
    #[error("template not found: {0}")]
    TemplateNotFound(String),
    /// The backend transport failed; no text was produced at all.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

// ─── ModelBuilder ────────────────────────────────────────────────────────────

pub struct ModelBuilder {
    backend: Arc<dyn CompletionBackend>,
    model: Option<String>,
    max_tokens: Option<u32>,
}

pub struct BuildOutcome {
    pub model: AppModel,
    pub usage: Option<TokenUsage>,
}

impl ModelBuilder {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            model: None,
            max_tokens: None,
        }
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Build an application model for `prompt`.
    ///
    /// With a `template_id`, the request prompt is synthesized from the
    /// template's feature list; an unknown id fails hard. The returned
    /// model's target set is always the request's target set.
    pub async fn build(
        &self,
        prompt: &str,
        targets: &[Target],
        template_id: Option<&str>,
    ) -> Result<BuildOutcome, BuildError> {
        let request_prompt = match template_id {
            Some(id) => {
                let template = templates::find(id)
                    .ok_or_else(|| BuildError::TemplateNotFound(id.to_string()))?;
                prompts::template_prompt(&template, prompt)
            }
            None => prompt.to_string(),
        };

        let completion = self
            .backend
            .complete(CompletionRequest {
                prompt: request_prompt,
                system: Some(prompts::APP_MODEL_SYSTEM.to_string()),
                model: self.model.clone(),
                max_tokens: self.max_tokens,
            })
            .await?;

        let cleaned = strip_code_fences(&completion.text);
        let model = match serde_json::from_str::<AppModel>(cleaned) {
            Ok(mut parsed) => {
                parsed.targets = targets.to_vec();
                debug!(model_id = %parsed.id, name = %parsed.name, "app model parsed");
                parsed
            }
            Err(e) => {
                warn!(err = %e, "model response did not parse; substituting minimal model");
                AppModel::minimal(prompt, targets)
            }
        };

        Ok(BuildOutcome {
            model,
            usage: completion.usage,
        })
    }
}

/// Strip a surrounding markdown code fence from a provider response, if
/// present.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    if let Some(after_fence) = trimmed.strip_prefix("```") {
        let body = if let Some(nl) = after_fence.find('\n') {
            &after_fence[nl + 1..]
        } else {
            after_fence
        };
        return if let Some(end) = body.rfind("\n```") {
            &body[..end]
        } else {
            body.strip_suffix("```").unwrap_or(body)
        };
    }
    trimmed
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fenced_json() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
    }
}
