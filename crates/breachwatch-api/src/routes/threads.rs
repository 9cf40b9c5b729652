use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use breachwatch_persist::ThreadSummary;

use crate::{
    error::{ApiError, ApiResult},
    session::CurrentSession,
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct ListThreadsResponse {
    pub threads: Vec<ThreadSummary>,
}

/// List the caller's threads, most recently active first
pub async fn list_threads(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
) -> ApiResult<Json<ListThreadsResponse>> {
    let session = current.require()?;
    let threads = state.store.list_threads(&session).await;

    Ok(Json(ListThreadsResponse { threads }))
}

/// Delete every record of a thread
pub async fn delete_thread(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
    Path(thread_id): Path<String>,
) -> ApiResult<StatusCode> {
    let session = current.require()?;
    if thread_id.trim().is_empty() {
        return Err(ApiError::BadRequest("thread_id must not be empty".to_string()));
    }

    if state.store.delete_thread(&session, &thread_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::DeleteFailed(thread_id))
    }
}
