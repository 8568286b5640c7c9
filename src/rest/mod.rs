// SPDX-License-Identifier: MIT
// rest/mod.rs — Public REST API server.
//
// Axum HTTP server, local only by default.
//
// Endpoints:
//   GET  /api/v1/health
//   GET  /api/v1/templates
//   GET  /api/v1/stacks
//   POST /api/v1/generate
//   GET  /api/v1/generations/{id}

pub mod routes;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::AppContext;

pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let addr: SocketAddr = bind.parse()?;

    let router = build_router(ctx);

    info!("REST API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/api/v1/health", get(routes::health))
        .route("/api/v1/templates", get(routes::list_templates))
        .route("/api/v1/stacks", get(routes::list_stacks))
        .route("/api/v1/generate", post(routes::generate))
        .route("/api/v1/generations/{id}", get(routes::get_generation))
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}
