pub mod appmodel;
pub mod backend;
pub mod builder;
pub mod config;
pub mod emitters;
pub mod orchestrator;
pub mod rest;
pub mod review;
pub mod session;
pub mod store;
pub mod webstack;

use std::sync::Arc;

use backend::BackendRegistry;
use config::AppConfig;
use orchestrator::Orchestrator;
use session::SessionStore;

/// Shared application state passed to every REST handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub backends: Arc<BackendRegistry>,
    pub orchestrator: Arc<Orchestrator>,
    pub sessions: Arc<SessionStore>,
    pub started_at: std::time::Instant,
}

impl AppContext {
    pub fn new(config: AppConfig, backends: BackendRegistry) -> Self {
        let config = Arc::new(config);
        let backends = Arc::new(backends);
        Self {
            orchestrator: Arc::new(Orchestrator::new(
                Arc::clone(&backends),
                Arc::clone(&config),
            )),
            sessions: Arc::new(SessionStore::new()),
            started_at: std::time::Instant::now(),
            config,
            backends,
        }
    }
}
