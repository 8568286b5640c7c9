// SPDX-License-Identifier: MIT
//! REST route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::builder::templates;
use crate::orchestrator::{GenerationError, GenerationRequest, GenerationResult};
use crate::session::{GenerationSession, SessionStatus};
use crate::store::Store;
use crate::webstack::stacks;
use crate::AppContext;

// ─── Error mapping ────────────────────────────────────────────────────────────

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        let status = match &err {
            GenerationError::TemplateNotFound(_) => StatusCode::NOT_FOUND,
            GenerationError::UnknownStack(_) | GenerationError::DuplicateTarget(_) => {
                StatusCode::BAD_REQUEST
            }
            // The model build could not reach its backend at all.
            GenerationError::Backend(_) => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

// ─── GET /api/v1/health ───────────────────────────────────────────────────────

pub async fn health(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptimeSecs": ctx.started_at.elapsed().as_secs(),
        "backends": ctx.backends.ids(),
    }))
}

// ─── GET /api/v1/templates ────────────────────────────────────────────────────

pub async fn list_templates() -> Json<Value> {
    Json(json!({ "templates": templates::all() }))
}

// ─── GET /api/v1/stacks ───────────────────────────────────────────────────────

pub async fn list_stacks() -> Json<Value> {
    let list: Vec<Value> = stacks::all()
        .iter()
        .map(|s| {
            json!({
                "id": s.id,
                "framework": s.framework,
                "language": s.language,
                "styling": s.styling,
                "persistence": s.persistence,
                "auth": s.auth,
                "deployTarget": s.deploy_target,
            })
        })
        .collect();
    Json(json!({ "stacks": list, "default": stacks::DEFAULT_STACK }))
}

// ─── POST /api/v1/generate ────────────────────────────────────────────────────

/// Run one generation request and return the aggregated result.
///
/// A session record is kept in the store so the result stays pollable at
/// `GET /api/v1/generations/{id}` while the daemon runs.
pub async fn generate(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerationResult>, ApiError> {
    let mut session = GenerationSession::new(request.prompt.clone(), request.targets.clone());
    let session_id = session.id.clone();
    ctx.sessions.put(&session_id, session.clone()).await;

    info!(session_id = %session_id, targets = request.targets.len(), "generation requested");

    session.status = SessionStatus::Generating;
    ctx.sessions.put(&session_id, session.clone()).await;

    match ctx.orchestrator.generate(&request).await {
        Ok(result) => {
            session.status = SessionStatus::Done;
            session.result = Some(result.clone());
            ctx.sessions.put(&session_id, session).await;
            Ok(Json(result))
        }
        Err(e) => {
            session.status = SessionStatus::Failed;
            session.error = Some(e.to_string());
            ctx.sessions.put(&session_id, session).await;
            Err(e.into())
        }
    }
}

// ─── GET /api/v1/generations/{id} ─────────────────────────────────────────────

pub async fn get_generation(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<GenerationSession>, ApiError> {
    ctx.sessions
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("generation session not found: {id}")))
}
