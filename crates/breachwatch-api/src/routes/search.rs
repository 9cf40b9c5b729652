use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;

use breachwatch_types::SearchOutcome;

use crate::{session::CurrentSession, state::AppState};

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Conversation to continue; a new one is started when absent
    #[serde(default)]
    pub thread_id: Option<String>,
}

/// Run a search for the caller.
///
/// Rejected and failed searches are still `200`: the outcome carries the warnings.
pub async fn search(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Json(req): Json<SearchRequest>,
) -> Json<SearchOutcome> {
    let outcome = state
        .search
        .run(&session, &req.query, req.thread_id.as_deref())
        .await;

    Json(outcome)
}
