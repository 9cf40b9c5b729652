use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use breachwatch_persist::ConversationRecord;

use crate::{error::ApiResult, session::CurrentSession, state::AppState};

#[derive(Debug, Serialize)]
pub struct ListMessagesResponse {
    pub messages: Vec<ConversationRecord>,
}

/// Exchanges of one thread, oldest first
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
    Path(thread_id): Path<String>,
) -> ApiResult<Json<ListMessagesResponse>> {
    let session = current.require()?;
    let messages = state.store.read_by_thread(&session, &thread_id).await;

    Ok(Json(ListMessagesResponse { messages }))
}
