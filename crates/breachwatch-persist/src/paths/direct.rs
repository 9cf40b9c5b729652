use async_trait::async_trait;
use std::sync::Arc;

use super::ReadPath;
use crate::error::Result;
use crate::models::{ConversationRecord, ThreadSummary};
use crate::reconciler::ThreadReconciler;
use crate::record_store::{RecordFilter, RecordStore, SortOrder};

/// Fallback path: query the relational store directly with equivalent filters
pub struct DirectPath {
    store: Arc<dyn RecordStore>,
}

impl DirectPath {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReadPath for DirectPath {
    fn name(&self) -> &'static str {
        "direct_store"
    }

    async fn thread_records(
        &self,
        user_id: &str,
        thread_id: &str,
    ) -> Result<Vec<ConversationRecord>> {
        self.store
            .select(&RecordFilter::thread(user_id, thread_id), SortOrder::Ascending)
            .await
    }

    async fn user_records(&self, user_id: &str) -> Result<Vec<ConversationRecord>> {
        self.store
            .select(&RecordFilter::user(user_id), SortOrder::Descending)
            .await
    }

    async fn thread_summaries(&self, user_id: &str) -> Result<Vec<ThreadSummary>> {
        let feed = self.user_records(user_id).await?;
        Ok(ThreadReconciler::summarize(&feed))
    }
}
