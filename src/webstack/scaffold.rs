// SPDX-License-Identifier: MIT
//! Phase 2 — deterministic scaffold rendering.
//!
//! No model calls here. The specification is turned into descriptive
//! scaffold text, a dependency manifest, and the file-path manifest a real
//! scaffold on that stack would contain. For a given specification the
//! output is byte-identical across calls.

use super::stacks::StackConventions;
use super::WebSpecification;

/// Rendered scaffold for one specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOutput {
    /// Frontend scaffold listing (absent for API-only stacks).
    pub frontend: Option<String>,
    /// Backend scaffold listing (present for stacks with a server side).
    pub backend: Option<String>,
    /// Dependency/config manifest text (package.json shape).
    pub config: Option<String>,
    /// Relative paths a real scaffold would contain:
    /// one per page, one per component, plus the stack's fixed config files.
    pub file_manifest: Vec<String>,
}

/// Render the scaffold for `spec` on `stack`.
pub fn render(spec: &WebSpecification, stack: &StackConventions) -> ScaffoldOutput {
    let mut manifest = Vec::new();
    for page in &spec.pages {
        manifest.push(page_path(stack.id, page));
    }
    for component in &spec.components {
        manifest.push(component_path(stack.id, component));
    }
    manifest.extend(stack.config_files.iter().map(|f| f.to_string()));

    let (frontend, backend) = match stack.id {
        "express-prisma" => (None, Some(backend_listing(spec, stack))),
        _ => {
            let back = if spec.api_endpoints.is_empty() && spec.database_tables.is_empty() {
                None
            } else {
                Some(backend_listing(spec, stack))
            };
            (Some(frontend_listing(spec, stack)), back)
        }
    };

    ScaffoldOutput {
        frontend,
        backend,
        config: Some(dependency_manifest(spec, stack)),
        file_manifest: manifest,
    }
}

// ─── Path patterns ────────────────────────────────────────────────────────────

fn page_path(stack_id: &str, page: &str) -> String {
    match stack_id {
        "react-vite" => format!("src/pages/{}.tsx", pascal_case(page)),
        "nextjs-tailwind" => format!("app/{}/page.tsx", route_segment(page)),
        "express-prisma" => format!("src/routes/{}.ts", route_segment(page)),
        _ => format!("src/pages/{}.tsx", pascal_case(page)),
    }
}

fn component_path(stack_id: &str, component: &str) -> String {
    match stack_id {
        "react-vite" => format!("src/components/{}.tsx", pascal_case(component)),
        "nextjs-tailwind" => format!("components/{}.tsx", pascal_case(component)),
        "express-prisma" => format!("src/lib/{}.ts", route_segment(component)),
        _ => format!("src/components/{}.tsx", pascal_case(component)),
    }
}

/// `"user profile"` → `"UserProfile"`.
fn pascal_case(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// `"User Profile"` → `"user-profile"`.
fn route_segment(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

// ─── Listings ─────────────────────────────────────────────────────────────────

fn frontend_listing(spec: &WebSpecification, stack: &StackConventions) -> String {
    let mut out = format!(
        "# {} — frontend scaffold ({})\n\n## Pages\n",
        display_name(spec),
        stack.framework
    );
    for page in &spec.pages {
        out.push_str(&format!("- {} → {}\n", page, page_path(stack.id, page)));
    }
    out.push_str("\n## Components\n");
    for component in &spec.components {
        out.push_str(&format!(
            "- {} → {}\n",
            component,
            component_path(stack.id, component)
        ));
    }
    if !spec.features.is_empty() {
        out.push_str("\n## Features\n");
        for feature in &spec.features {
            out.push_str(&format!("- {feature}\n"));
        }
    }
    out
}

fn backend_listing(spec: &WebSpecification, stack: &StackConventions) -> String {
    let mut out = format!(
        "# {} — backend scaffold ({}, {})\n\n## Endpoints\n",
        display_name(spec),
        stack.framework,
        stack.persistence
    );
    for endpoint in &spec.api_endpoints {
        out.push_str(&format!("- {endpoint}\n"));
    }
    if !spec.database_tables.is_empty() {
        out.push_str("\n## Tables\n");
        for table in &spec.database_tables {
            out.push_str(&format!("- {} ({})\n", table.name, table.fields.join(", ")));
        }
    }
    out
}

fn display_name(spec: &WebSpecification) -> &str {
    if spec.name.is_empty() {
        "Web App"
    } else {
        &spec.name
    }
}

// ─── Dependency manifest ──────────────────────────────────────────────────────

fn dependency_manifest(spec: &WebSpecification, stack: &StackConventions) -> String {
    let name = route_segment(display_name(spec));
    let name = if name.is_empty() { "web-app".to_string() } else { name };
    match stack.id {
        "react-vite" => format!(
            r#"{{
  "name": "{name}",
  "private": true,
  "version": "0.0.1",
  "type": "module",
  "scripts": {{
    "dev": "vite",
    "build": "tsc && vite build",
    "preview": "vite preview"
  }},
  "dependencies": {{
    "react": "^18.3.1",
    "react-dom": "^18.3.1"
  }},
  "devDependencies": {{
    "@vitejs/plugin-react": "^4.3.1",
    "typescript": "^5.5.3",
    "vite": "^5.3.4"
  }}
}}
"#
        ),
        "nextjs-tailwind" => format!(
            r#"{{
  "name": "{name}",
  "private": true,
  "version": "0.0.1",
  "scripts": {{
    "dev": "next dev",
    "build": "next build",
    "start": "next start"
  }},
  "dependencies": {{
    "next": "^14.2.5",
    "react": "^18.3.1",
    "react-dom": "^18.3.1"
  }},
  "devDependencies": {{
    "tailwindcss": "^3.4.7",
    "typescript": "^5.5.3"
  }}
}}
"#
        ),
        "express-prisma" => format!(
            r#"{{
  "name": "{name}",
  "private": true,
  "version": "0.0.1",
  "scripts": {{
    "dev": "tsx watch src/index.ts",
    "build": "tsc",
    "start": "node dist/index.js"
  }},
  "dependencies": {{
    "express": "^4.19.2",
    "@prisma/client": "^5.17.0"
  }},
  "devDependencies": {{
    "prisma": "^5.17.0",
    "tsx": "^4.16.2",
    "typescript": "^5.5.3"
  }}
}}
"#
        ),
        _ => format!("{{\n  \"name\": \"{name}\"\n}}\n"),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webstack::stacks;
    use crate::webstack::TableSpec;

    fn sample_spec(stack_id: &str) -> WebSpecification {
        WebSpecification {
            name: "Task Tracker".into(),
            description: "track tasks".into(),
            stack: stack_id.into(),
            pages: vec!["Home".into(), "Task Detail".into()],
            components: vec!["Header".into(), "Task Card".into(), "Footer".into()],
            api_endpoints: vec!["/api/tasks".into()],
            database_tables: vec![TableSpec {
                name: "tasks".into(),
                fields: vec!["id".into(), "title".into(), "done".into()],
            }],
            features: vec!["responsive".into()],
        }
    }

    #[test]
    fn manifest_length_is_pages_plus_components_plus_config() {
        for stack in stacks::all() {
            let spec = sample_spec(stack.id);
            let out = render(&spec, stack);
            assert_eq!(
                out.file_manifest.len(),
                spec.pages.len() + spec.components.len() + stack.config_files.len(),
                "manifest length mismatch for {}",
                stack.id
            );
        }
    }

    #[test]
    fn render_is_deterministic() {
        let stack = stacks::find("react-vite").unwrap();
        let spec = sample_spec("react-vite");
        assert_eq!(render(&spec, stack), render(&spec, stack));
    }

    #[test]
    fn express_stack_is_backend_only() {
        let stack = stacks::find("express-prisma").unwrap();
        let out = render(&sample_spec("express-prisma"), stack);
        assert!(out.frontend.is_none());
        let backend = out.backend.expect("backend listing");
        assert!(backend.contains("/api/tasks"));
        assert!(backend.contains("tasks (id, title, done)"));
    }

    #[test]
    fn path_patterns_follow_stack_conventions() {
        let spec = sample_spec("nextjs-tailwind");
        let stack = stacks::find("nextjs-tailwind").unwrap();
        let out = render(&spec, stack);
        assert!(out.file_manifest.contains(&"app/task-detail/page.tsx".to_string()));
        assert!(out.file_manifest.contains(&"components/TaskCard.tsx".to_string()));
    }

    #[test]
    fn case_helpers() {
        assert_eq!(pascal_case("task detail"), "TaskDetail");
        assert_eq!(route_segment("Task Detail"), "task-detail");
        assert_eq!(pascal_case("Home"), "Home");
    }
}
