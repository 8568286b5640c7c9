// SPDX-License-Identifier: MIT
//! Per-target code emitters.
//!
//! Each emitter serializes the full application model into the prompt body
//! (the model restates its own state to the backend — no compaction), adds a
//! fixed target instruction block, and returns the backend's raw text
//! unmodified. The emitter contract ends at "produced some text": there is
//! no validation that the text is well-formed source for the target
//! language — compile verification is an optional external consumer.

pub mod android;
pub mod flutter;
pub mod ios;
pub mod web;

use crate::appmodel::{AppModel, Target};
use crate::backend::{BackendError, CompletionBackend, CompletionRequest, TokenUsage};

/// Raw emitter output: generated text plus any reported usage.
#[derive(Debug, Clone)]
pub struct EmitterOutput {
    pub code: String,
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("could not serialize application model: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Emit source for one of the native targets (`ios`, `android`, `flutter`).
///
/// The web target runs its own two-phase pipeline — see `web::emit`.
pub async fn emit_native(
    target: Target,
    app: &AppModel,
    backend: &dyn CompletionBackend,
    model: Option<&str>,
    max_tokens: Option<u32>,
) -> Result<EmitterOutput, EmitError> {
    let instructions = match target {
        Target::Ios => ios::INSTRUCTIONS,
        Target::Android => android::INSTRUCTIONS,
        Target::Flutter => flutter::INSTRUCTIONS,
        Target::Web => unreachable!("web target uses the stack sub-pipeline"),
    };

    let prompt = build_prompt(app, instructions)?;
    let completion = backend
        .complete(CompletionRequest {
            prompt,
            system: None,
            model: model.map(str::to_string),
            max_tokens,
        })
        .await?;

    Ok(EmitterOutput {
        code: completion.text,
        usage: completion.usage,
    })
}

/// Serialize the full model and append the target instruction block.
pub(crate) fn build_prompt(app: &AppModel, instructions: &str) -> Result<String, serde_json::Error> {
    let serialized = serde_json::to_string_pretty(app)?;
    Ok(format!(
        "Application model:\n{serialized}\n\n{instructions}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appmodel::Target;

    #[test]
    fn prompt_restates_full_model() {
        let app = AppModel::minimal("a recipe app", &[Target::Ios]);
        let prompt = build_prompt(&app, ios::INSTRUCTIONS).expect("serializes");
        assert!(prompt.contains("a recipe app"));
        assert!(prompt.contains(&app.id));
        assert!(prompt.contains("SwiftUI"));
    }
}
