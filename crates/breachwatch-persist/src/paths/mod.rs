//! Read strategies tried in order by [`ConversationStore`](crate::ConversationStore).
//!
//! Each path implements the same logical reads. The store moves to the next
//! path on any failure and never merges results across paths.

mod direct;
mod service;

pub use direct::DirectPath;
pub use service::ServicePath;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ConversationRecord, ThreadSummary};

#[async_trait]
pub trait ReadPath: Send + Sync {
    /// Short label used in logs
    fn name(&self) -> &'static str;

    /// Records of one thread owned by `user_id`
    async fn thread_records(
        &self,
        user_id: &str,
        thread_id: &str,
    ) -> Result<Vec<ConversationRecord>>;

    /// All records owned by `user_id`
    async fn user_records(&self, user_id: &str) -> Result<Vec<ConversationRecord>>;

    /// One entry per thread owned by `user_id`
    async fn thread_summaries(&self, user_id: &str) -> Result<Vec<ThreadSummary>>;
}
