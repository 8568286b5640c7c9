// SPDX-License-Identifier: MIT
//! Web stack sub-pipeline — the two-phase generator behind the web target.
//!
//! Phase 1 (`specify`) derives a structured `WebSpecification` from the
//! request prompt via one backend call, with recovery on parse failure.
//! Phase 2 (`scaffold::render`) is purely deterministic: it turns the
//! specification into scaffold text, a dependency manifest, and a file-path
//! manifest, with no further model calls.
//!
//! The specification is scoped to the web emitter only; it is never merged
//! back into the application model.

pub mod scaffold;
pub mod specify;
pub mod stacks;

use serde::{Deserialize, Serialize};

/// Intermediate structured plan for a web app on one concrete stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSpecification {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Stack id (always a recognized id; set by the pipeline, not trusted
    /// from the backend).
    #[serde(default)]
    pub stack: String,
    #[serde(default)]
    pub pages: Vec<String>,
    #[serde(default)]
    pub components: Vec<String>,
    /// API endpoint paths, e.g. `"/api/todos"`.
    #[serde(default)]
    pub api_endpoints: Vec<String>,
    #[serde(default)]
    pub database_tables: Vec<TableSpec>,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSpec {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<String>,
}
