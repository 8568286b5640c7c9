use anyhow::{bail, Context as _, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use appforge::backend::BackendRegistry;
use appforge::builder::templates;
use appforge::config::AppConfig;
use appforge::webstack::stacks;
use appforge::{rest, AppContext};

#[derive(Parser)]
#[command(
    name = "appforged",
    about = "AppForge Host — natural-language app generation daemon",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// REST server port
    #[arg(long, env = "APPFORGE_PORT")]
    port: Option<u16>,

    /// Bind address (default: 127.0.0.1; use 0.0.0.0 for LAN access)
    #[arg(long, env = "APPFORGE_BIND")]
    bind_address: Option<String>,

    /// Completion backend id ("anthropic" or "openai")
    #[arg(long, env = "APPFORGE_BACKEND")]
    backend: Option<String>,

    /// Model-name override for every backend call
    #[arg(long, env = "APPFORGE_MODEL")]
    model: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "APPFORGE_LOG")]
    log: Option<String>,

    /// Path to a config.toml
    #[arg(long, env = "APPFORGE_CONFIG")]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the daemon server (default when no subcommand given).
    Serve,
    /// List the built-in app templates.
    Templates,
    /// List the supported web stacks.
    Stacks,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = AppConfig::new(
        args.port,
        args.bind_address,
        args.backend,
        args.model,
        args.log,
        args.config.as_deref(),
    );

    tracing_subscriber::fmt()
        .with_env_filter(config.log.clone())
        .compact()
        .init();

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Templates => {
            for t in templates::all() {
                println!("{:<8} {} — {}", t.id, t.name, t.description);
            }
            Ok(())
        }
        Command::Stacks => {
            for s in stacks::all() {
                let marker = if s.id == stacks::DEFAULT_STACK { " (default)" } else { "" };
                println!("{:<16} {} / {}{}", s.id, s.framework, s.styling, marker);
            }
            Ok(())
        }
    }
}

async fn serve(config: AppConfig) -> Result<()> {
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let registry =
        BackendRegistry::from_env(timeout).context("failed to build backend registry")?;

    if registry.is_empty() {
        bail!(
            "no completion backends configured — set ANTHROPIC_API_KEY or OPENAI_API_KEY"
        );
    }
    // Fail at startup, not on the first request, if the configured backend
    // has no registered adapter.
    registry
        .get(&config.backend)
        .with_context(|| format!("configured backend '{}' is not available", config.backend))?;

    info!(
        backend = %config.backend,
        port = config.port,
        "appforged starting"
    );

    let ctx = Arc::new(AppContext::new(config, registry));
    rest::start_rest_server(ctx).await
}
