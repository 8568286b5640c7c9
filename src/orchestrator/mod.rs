// SPDX-License-Identifier: MIT
//! Generation orchestrator — one request in, one aggregated result out.
//!
//! `generate` builds the application model exactly once, fans out to the
//! emitters for the requested targets concurrently, and aggregates their
//! outputs. A failure on one target never aborts its siblings: failed
//! targets land in an explicit per-target failure list while successful
//! ones keep their code-map entries. The orchestrator holds no state across
//! calls.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::appmodel::{AppModel, Target};
use crate::backend::{sum_usage, BackendError, BackendRegistry, TokenUsage};
use crate::builder::{BuildError, ModelBuilder};
use crate::config::AppConfig;
use crate::emitters::{self, EmitterOutput};
use crate::webstack::stacks::{self, StackConventions};

// ─── Request / result types ──────────────────────────────────────────────────

/// Per-request knobs forwarded to the backends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackendSettings {
    /// Web stack id; `None` resolves to the configured default stack.
    pub stack_id: Option<String>,
    /// Model-name override for every call in this request.
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub prompt: String,
    /// Requested targets, order preserved for reporting. Duplicates are
    /// rejected.
    pub targets: Vec<Target>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<BackendSettings>,
}

/// A target whose emitter failed. Siblings are unaffected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetFailure {
    pub target: Target,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    /// Backend id that served every call in this request.
    pub backend: String,
    /// Effective model id for the session.
    pub model: String,
    /// Summed usage across the builder and all emitter calls that reported
    /// it; absent when no call reported usage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    /// Wall clock from request start to aggregation completion.
    pub duration_ms: u64,
    /// Echo of the requested target set, in request order.
    pub targets: Vec<Target>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub model: AppModel,
    /// Requested target → generated source text. Targets that were not
    /// requested (or whose emitter failed) are absent keys, never empty
    /// entries.
    pub code: BTreeMap<Target, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<TargetFailure>,
    pub metadata: GenerationMetadata,
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Hard failures of the whole request. Per-target emitter failures are not
/// here — they are reported inside the result.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("template not found: {0}")]
    TemplateNotFound(String),
    #[error("unknown stack id: {0}")]
    UnknownStack(String),
    #[error("duplicate target in request: {0}")]
    DuplicateTarget(Target),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl From<BuildError> for GenerationError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::TemplateNotFound(id) => GenerationError::TemplateNotFound(id),
            BuildError::Backend(e) => GenerationError::Backend(e),
        }
    }
}

// ─── Orchestrator ────────────────────────────────────────────────────────────

pub struct Orchestrator {
    backends: Arc<BackendRegistry>,
    config: Arc<AppConfig>,
}

impl Orchestrator {
    pub fn new(backends: Arc<BackendRegistry>, config: Arc<AppConfig>) -> Self {
        Self { backends, config }
    }

    /// Run one generation request end to end.
    ///
    /// Returns a result whenever the model build succeeds (possibly by
    /// fallback), even if every requested emitter failed — in that
    /// degenerate case the code map is empty and `failures` explains why.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let started = Instant::now();

        check_duplicates(&request.targets)?;

        let backend = self.backends.get(&self.config.backend)?;
        let settings = request.settings.clone().unwrap_or_default();
        let model_override = settings.model.or_else(|| self.config.model.clone());
        let effective_model = model_override
            .clone()
            .unwrap_or_else(|| backend.default_model().to_string());

        // Resolve the web stack before any backend work so an unknown stack
        // id fails the request immediately, not mid-fan-out.
        let stack = if request.targets.contains(&Target::Web) {
            let id = settings
                .stack_id
                .unwrap_or_else(|| self.config.default_stack.clone());
            Some(
                stacks::find(&id).ok_or_else(|| GenerationError::UnknownStack(id.clone()))?,
            )
        } else {
            None
        };

        // Step 1: build the model — exactly once, regardless of target count.
        let outcome = ModelBuilder::new(Arc::clone(&backend))
            .with_model(model_override.clone())
            .with_max_tokens(Some(self.config.max_tokens))
            .build(&request.prompt, &request.targets, request.template_id.as_deref())
            .await?;
        let app = outcome.model;

        // Step 2: fan out to the requested emitters concurrently. Each
        // emitter only reads the model; results land on distinct keys.
        let emitter_outcomes = join_all(request.targets.iter().map(|&target| {
            let backend = Arc::clone(&backend);
            let app = &app;
            let prompt = request.prompt.as_str();
            let model = model_override.as_deref();
            let max_tokens = Some(self.config.max_tokens);
            async move {
                let result = match target {
                    Target::Web => {
                        let stack: &'static StackConventions =
                            stack.expect("stack resolved for web target");
                        emitters::web::emit(app, prompt, stack, backend.as_ref(), model, max_tokens)
                            .await
                    }
                    native => {
                        emitters::emit_native(native, app, backend.as_ref(), model, max_tokens)
                            .await
                    }
                };
                (target, result)
            }
        }))
        .await;

        // Step 3: aggregate.
        let mut code = BTreeMap::new();
        let mut failures = Vec::new();
        let mut usage_reports: Vec<Option<TokenUsage>> = vec![outcome.usage];

        for (target, result) in emitter_outcomes {
            match result {
                Ok(EmitterOutput { code: text, usage }) => {
                    usage_reports.push(usage);
                    code.insert(target, text);
                }
                Err(e) => {
                    warn!(failed = %target, err = %e, "emitter failed; siblings unaffected");
                    failures.push(TargetFailure {
                        target,
                        error: e.to_string(),
                    });
                }
            }
        }

        // Step 4: stamp metadata.
        let metadata = GenerationMetadata {
            backend: backend.id().to_string(),
            model: effective_model,
            usage: sum_usage(usage_reports.iter().map(Option::as_ref)),
            duration_ms: started.elapsed().as_millis() as u64,
            targets: request.targets.clone(),
        };

        info!(
            model_id = %app.id,
            targets = request.targets.len(),
            emitted = code.len(),
            failed = failures.len(),
            duration_ms = metadata.duration_ms,
            "generation complete"
        );

        Ok(GenerationResult {
            model: app,
            code,
            failures,
            metadata,
        })
    }
}

fn check_duplicates(targets: &[Target]) -> Result<(), GenerationError> {
    for (i, target) in targets.iter().enumerate() {
        if targets[..i].contains(target) {
            return Err(GenerationError::DuplicateTarget(*target));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_targets_are_rejected() {
        let err = check_duplicates(&[Target::Ios, Target::Web, Target::Ios]).unwrap_err();
        assert!(matches!(err, GenerationError::DuplicateTarget(Target::Ios)));
    }

    #[test]
    fn distinct_targets_pass() {
        assert!(check_duplicates(&[Target::Ios, Target::Android, Target::Web]).is_ok());
    }
}
