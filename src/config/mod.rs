// SPDX-License-Identifier: MIT
//! Daemon configuration.
//!
//! Priority (highest to lowest):
//!   1. CLI / env — passed as `Some(value)` from clap
//!   2. TOML file at the given config path
//!   3. Built-in defaults

use serde::Deserialize;
use std::path::Path;
use tracing::warn;

use crate::webstack::stacks;

const DEFAULT_PORT: u16 = 4310;
const DEFAULT_BACKEND: &str = "anthropic";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_TOKENS: u32 = 8192;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

/// Resolved daemon configuration, shared read-only via `Arc`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// REST server port.
    pub port: u16,
    /// Bind address (default: 127.0.0.1; use 0.0.0.0 for LAN access).
    pub bind_address: String,
    /// Backend id serving every call of a request ("anthropic" | "openai").
    pub backend: String,
    /// Model-name override; `None` uses the backend's default model.
    pub model: Option<String>,
    /// Per-call timeout applied uniformly to the model-build call and every
    /// emitter call.
    pub request_timeout_secs: u64,
    /// Output-size cap per backend call.
    pub max_tokens: u32,
    /// Stack used when a web generation request names none.
    pub default_stack: String,
    /// Log filter (trace, debug, info, warn, error).
    pub log: String,
}

/// `config.toml` shape — every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TomlConfig {
    port: Option<u16>,
    bind_address: Option<String>,
    backend: Option<String>,
    model: Option<String>,
    request_timeout_secs: Option<u64>,
    max_tokens: Option<u32>,
    default_stack: Option<String>,
    log: Option<String>,
}

impl AppConfig {
    /// Build config from CLI/env args + optional TOML file.
    pub fn new(
        port: Option<u16>,
        bind_address: Option<String>,
        backend: Option<String>,
        model: Option<String>,
        log: Option<String>,
        config_path: Option<&Path>,
    ) -> Self {
        let toml = config_path.and_then(load_toml).unwrap_or_default();

        Self {
            port: port.or(toml.port).unwrap_or(DEFAULT_PORT),
            bind_address: bind_address
                .or(toml.bind_address)
                .unwrap_or_else(default_bind_address),
            backend: backend
                .or(toml.backend)
                .unwrap_or_else(|| DEFAULT_BACKEND.to_string()),
            model: model.or(toml.model),
            request_timeout_secs: toml.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            max_tokens: toml.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            default_stack: toml
                .default_stack
                .unwrap_or_else(|| stacks::DEFAULT_STACK.to_string()),
            log: log.or(toml.log).unwrap_or_else(|| "info".to_string()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(None, None, None, None, None, None)
    }
}

fn load_toml(path: &Path) -> Option<TomlConfig> {
    let raw = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&raw) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(path = %path.display(), err = %e, "config.toml did not parse; using defaults");
            None
        }
    }
}
