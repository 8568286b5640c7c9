// SPDX-License-Identifier: MIT
//! Web target emitter — wraps the two-phase stack sub-pipeline and flattens
//! its output into a single text field, keeping the result shape uniform
//! with the other targets.

use super::{EmitError, EmitterOutput};
use crate::appmodel::AppModel;
use crate::backend::CompletionBackend;
use crate::webstack::scaffold::{self, ScaffoldOutput};
use crate::webstack::specify::{specify, SpecifyOutcome};
use crate::webstack::stacks::StackConventions;
use crate::webstack::WebSpecification;

/// Emit web scaffold text for `app` on the chosen stack.
///
/// Phase 1 derives the specification from the caller's request prompt;
/// phase 2 renders deterministically. The only failure mode is a backend
/// transport failure in phase 1.
pub async fn emit(
    app: &AppModel,
    prompt: &str,
    stack: &'static StackConventions,
    backend: &dyn CompletionBackend,
    model: Option<&str>,
    max_tokens: Option<u32>,
) -> Result<EmitterOutput, EmitError> {
    let SpecifyOutcome { spec, usage } = specify(backend, model, max_tokens, prompt, stack).await?;
    let scaffold = scaffold::render(&spec, stack);
    Ok(EmitterOutput {
        code: flatten(app, &spec, &scaffold),
        usage,
    })
}

/// Join the scaffold sections into one text blob, manifest last.
fn flatten(app: &AppModel, spec: &WebSpecification, scaffold: &ScaffoldOutput) -> String {
    let mut out = format!("// {} — web ({})\n", app.name, spec.stack);

    if let Some(frontend) = &scaffold.frontend {
        out.push_str("\n");
        out.push_str(frontend);
    }
    if let Some(backend) = &scaffold.backend {
        out.push_str("\n");
        out.push_str(backend);
    }
    if let Some(config) = &scaffold.config {
        out.push_str("\n## package.json\n");
        out.push_str(config);
    }

    out.push_str("\n## Files\n");
    for path in &scaffold.file_manifest {
        out.push_str(&format!("- {path}\n"));
    }
    out
}
