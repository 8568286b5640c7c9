// SPDX-License-Identifier: MIT
//! Generation session records.
//!
//! Sessions are ephemeral — they live only while the daemon is running.
//! A session's real output is the generation result handed back to the
//! caller; the record exists so clients can poll status by id.

use serde::{Deserialize, Serialize};

use crate::appmodel::Target;
use crate::orchestrator::GenerationResult;
use crate::store::MemoryStore;

/// Current phase of a generation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Model build in flight.
    Planning,
    /// Emitter fan-out in flight.
    Generating,
    Done,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSession {
    /// Unique session identifier (UUID v4).
    pub id: String,
    pub prompt: String,
    pub targets: Vec<Target>,
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GenerationResult>,
    /// Error message when `status == Failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// RFC-3339 creation timestamp.
    pub created_at: String,
}

impl GenerationSession {
    pub fn new(prompt: impl Into<String>, targets: Vec<Target>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            prompt: prompt.into(),
            targets,
            status: SessionStatus::Planning,
            result: None,
            error: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// The daemon's session store.
pub type SessionStore = MemoryStore<GenerationSession>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    #[tokio::test]
    async fn session_roundtrip_through_store() {
        let store = SessionStore::new();
        let session = GenerationSession::new("todo app", vec![Target::Ios]);
        let id = session.id.clone();
        store.put(&id, session).await;

        let fetched = store.get(&id).await.expect("session stored");
        assert_eq!(fetched.status, SessionStatus::Planning);
        assert_eq!(fetched.targets, vec![Target::Ios]);
    }
}
