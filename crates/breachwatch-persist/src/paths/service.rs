use async_trait::async_trait;

use super::ReadPath;
use crate::error::Result;
use crate::models::{ConversationRecord, ThreadSummary};
use crate::service::HistoryService;

/// Primary path: the dedicated history service
pub struct ServicePath {
    service: HistoryService,
}

impl ServicePath {
    pub fn new(service: HistoryService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ReadPath for ServicePath {
    fn name(&self) -> &'static str {
        "history_service"
    }

    async fn thread_records(
        &self,
        user_id: &str,
        thread_id: &str,
    ) -> Result<Vec<ConversationRecord>> {
        self.service.history(user_id, Some(thread_id)).await
    }

    async fn user_records(&self, user_id: &str) -> Result<Vec<ConversationRecord>> {
        self.service.history(user_id, None).await
    }

    async fn thread_summaries(&self, user_id: &str) -> Result<Vec<ThreadSummary>> {
        // Ordering and representative choice are decided by the service
        self.service.threads(user_id).await
    }
}
