// SPDX-License-Identifier: MIT
//! Phase 1 — derive a `WebSpecification` from the request prompt.
//!
//! Backends sometimes wrap JSON in prose, so the response is scanned for
//! the first balanced `{...}` substring before the strict parse. If no
//! parseable structure is found, a documented minimal specification is
//! substituted — the same availability-over-precision policy as the model
//! builder, never surfaced as an error.

use tracing::warn;

use super::stacks::StackConventions;
use super::WebSpecification;
use crate::backend::{BackendError, CompletionBackend, CompletionRequest, TokenUsage};

pub struct SpecifyOutcome {
    pub spec: WebSpecification,
    pub usage: Option<TokenUsage>,
}

/// Derive a structured specification for `prompt` on the given stack.
///
/// Fails only on backend transport failure.
pub async fn specify(
    backend: &dyn CompletionBackend,
    model: Option<&str>,
    max_tokens: Option<u32>,
    prompt: &str,
    stack: &StackConventions,
) -> Result<SpecifyOutcome, BackendError> {
    let completion = backend
        .complete(CompletionRequest {
            prompt: prompt.to_string(),
            system: Some(system_prompt(stack)),
            model: model.map(str::to_string),
            max_tokens,
        })
        .await?;

    let parsed = extract_json_object(&completion.text)
        .and_then(|json| serde_json::from_str::<WebSpecification>(json).ok());

    let spec = match parsed {
        Some(mut spec) => {
            // The stack selector is the caller's choice, not the backend's.
            spec.stack = stack.id.to_string();
            spec
        }
        None => {
            warn!(stack = stack.id, "web specification did not parse; substituting minimal spec");
            fallback_spec(prompt, stack)
        }
    };

    Ok(SpecifyOutcome {
        spec,
        usage: completion.usage,
    })
}

fn system_prompt(stack: &StackConventions) -> String {
    format!(
        "You plan web applications for this exact stack:\n\
         framework: {framework}\n\
         language: {language}\n\
         styling: {styling}\n\
         persistence: {persistence}\n\
         auth: {auth}\n\
         deployment: {deploy}\n\
         \n\
         Respond with a single JSON object and nothing else:\n\
         {{\n\
           \"name\": \"<app name>\",\n\
           \"description\": \"<one sentence>\",\n\
           \"pages\": [\"<page name>\", ...],\n\
           \"components\": [\"<component name>\", ...],\n\
           \"apiEndpoints\": [\"/api/<path>\", ...],\n\
           \"databaseTables\": [{{ \"name\": \"<table>\", \"fields\": [\"<field>\", ...] }}],\n\
           \"features\": [\"<feature>\", ...]\n\
         }}",
        framework = stack.framework,
        language = stack.language,
        styling = stack.styling,
        persistence = stack.persistence,
        auth = stack.auth,
        deploy = stack.deploy_target,
    )
}

/// The documented minimal specification: the given stack, three generic
/// pages, three generic components, no endpoints, one feature.
fn fallback_spec(prompt: &str, stack: &StackConventions) -> WebSpecification {
    WebSpecification {
        name: "Web App".into(),
        description: prompt.to_string(),
        stack: stack.id.to_string(),
        pages: vec!["Home".into(), "About".into(), "Contact".into()],
        components: vec!["Header".into(), "Footer".into(), "Layout".into()],
        api_endpoints: Vec::new(),
        database_tables: Vec::new(),
        features: vec!["responsive".into()],
    }
}

/// Return the first balanced `{...}` substring of `text`, if any.
///
/// String literals are honored, so braces inside JSON strings do not
/// unbalance the scan.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webstack::stacks;
    use proptest::prelude::*;

    #[test]
    fn extracts_object_wrapped_in_prose() {
        let text = "Sure! Here is the plan:\n{\"pages\": [\"Home\"]}\nLet me know.";
        assert_eq!(extract_json_object(text), Some("{\"pages\": [\"Home\"]}"));
    }

    #[test]
    fn honors_braces_inside_strings() {
        let text = r#"{"description": "uses {curly} braces", "pages": []}"#;
        let extracted = extract_json_object(text).expect("balanced object");
        assert!(serde_json::from_str::<serde_json::Value>(extracted).is_ok());
    }

    #[test]
    fn no_object_returns_none() {
        assert_eq!(extract_json_object("plain prose, no json"), None);
        assert_eq!(extract_json_object("{unterminated"), None);
    }

    #[test]
    fn fallback_spec_shape() {
        let stack = stacks::find(stacks::DEFAULT_STACK).unwrap();
        let spec = fallback_spec("a storefront", stack);
        assert_eq!(spec.pages.len(), 3);
        assert_eq!(spec.components.len(), 3);
        assert!(spec.api_endpoints.is_empty());
        assert_eq!(spec.features, vec!["responsive".to_string()]);
        assert_eq!(spec.stack, stacks::DEFAULT_STACK);
    }

    proptest! {
        /// The scanner never panics and any extracted substring is balanced.
        #[test]
        fn extraction_never_panics(text in "\\PC*") {
            if let Some(obj) = extract_json_object(&text) {
                prop_assert!(obj.starts_with('{'), "extracted object should start with a brace");
                prop_assert!(obj.ends_with('}'), "extracted object should end with a brace");
            }
        }

        /// A valid JSON object is always recovered from surrounding prose.
        #[test]
        fn embedded_object_is_found(prefix in "[a-zA-Z .!]*", suffix in "[a-zA-Z .!]*") {
            let text = format!("{prefix}{{\"k\": \"v\"}}{suffix}");
            let obj = extract_json_object(&text).expect("object present");
            prop_assert!(serde_json::from_str::<serde_json::Value>(obj).is_ok());
        }
    }
}
