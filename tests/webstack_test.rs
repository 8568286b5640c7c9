//! Web stack sub-pipeline tests: phase-1 recovery, phase-2 manifest
//! invariants, and default-stack determinism through the orchestrator.

mod common;

use std::sync::Arc;

use appforge::appmodel::Target;
use appforge::backend::BackendRegistry;
use appforge::config::AppConfig;
use appforge::orchestrator::{GenerationRequest, Orchestrator};
use appforge::webstack::scaffold;
use appforge::webstack::specify::specify;
use appforge::webstack::stacks;

use common::{ScriptedBackend, SCRIPTED_ID};

const SPECIFY_CALL: &str = "plan web applications";

// ─── Scenario 3: unparseable phase-1 output falls back, manifest invariant ───

#[tokio::test]
async fn unparseable_specification_falls_back_to_minimal_spec() {
    let backend = ScriptedBackend::new().on(SPECIFY_CALL, "I would suggest a nice website!");
    let stack = stacks::find(stacks::DEFAULT_STACK).expect("default stack registered");

    let outcome = specify(&backend, None, None, "a portfolio site", stack)
        .await
        .expect("fallback, not an error");

    assert_eq!(outcome.spec.pages.len(), 3);
    assert_eq!(outcome.spec.components.len(), 3);
    assert!(outcome.spec.api_endpoints.is_empty());
    assert_eq!(outcome.spec.features, vec!["responsive".to_string()]);
    assert_eq!(outcome.spec.stack, stacks::DEFAULT_STACK);

    // Phase 2: manifest has exactly pages + components + fixed config files.
    let out = scaffold::render(&outcome.spec, stack);
    assert_eq!(
        out.file_manifest.len(),
        3 + 3 + stack.config_files.len()
    );
}

// ─── Phase 1 parses JSON wrapped in prose ────────────────────────────────────

#[tokio::test]
async fn specification_json_is_recovered_from_prose() {
    let wrapped = r#"Here is your plan:
{
  "name": "Shop",
  "description": "a storefront",
  "pages": ["Home", "Cart"],
  "components": ["Header"],
  "apiEndpoints": ["/api/products"],
  "databaseTables": [{ "name": "products", "fields": ["id", "name"] }],
  "features": ["search"]
}
Hope that helps!"#;
    let backend = ScriptedBackend::new().on(SPECIFY_CALL, wrapped);
    let stack = stacks::find("nextjs-tailwind").expect("stack registered");

    let outcome = specify(&backend, None, None, "a storefront", stack)
        .await
        .expect("parses");

    assert_eq!(outcome.spec.name, "Shop");
    assert_eq!(outcome.spec.pages, vec!["Home".to_string(), "Cart".to_string()]);
    // The stack selector is the caller's, even if the backend says otherwise.
    assert_eq!(outcome.spec.stack, "nextjs-tailwind");

    let out = scaffold::render(&outcome.spec, stack);
    assert_eq!(
        out.file_manifest.len(),
        2 + 1 + stack.config_files.len()
    );
    assert!(out.file_manifest.contains(&"app/cart/page.tsx".to_string()));
}

// ─── Default stack resolution is deterministic across calls ──────────────────

#[tokio::test]
async fn web_target_defaults_to_fixed_stack_deterministically() {
    let make_orchestrator = || {
        let backend = ScriptedBackend::new();
        let mut registry = BackendRegistry::new();
        registry.register(Arc::new(backend));
        let mut config = AppConfig::default();
        config.backend = SCRIPTED_ID.to_string();
        Orchestrator::new(Arc::new(registry), Arc::new(config))
    };

    let req = GenerationRequest {
        prompt: "a landing page".to_string(),
        targets: vec![Target::Web],
        template_id: None,
        settings: None,
    };

    let first = make_orchestrator().generate(&req).await.expect("ok");
    let second = make_orchestrator().generate(&req).await.expect("ok");

    let code_a = first.code.get(&Target::Web).expect("web emitted");
    let code_b = second.code.get(&Target::Web).expect("web emitted");
    assert_eq!(code_a, code_b, "identical input must yield identical web output");
    assert!(
        code_a.contains(stacks::DEFAULT_STACK),
        "flattened output names the default stack"
    );
}
