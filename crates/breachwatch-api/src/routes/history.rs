use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use breachwatch_persist::ConversationRecord;

use crate::{error::ApiResult, session::CurrentSession, state::AppState};

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<ConversationRecord>,
}

pub async fn user_history(
    State(state): State<Arc<AppState>>,
    current: CurrentSession,
) -> ApiResult<Json<HistoryResponse>> {
    let session = current.require()?;
    let history = state.store.read_all_for_user(&session).await;

    Ok(Json(HistoryResponse { history }))
}
