use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ConversationRecord, NewConversation};

/// Equality filters applied to the `conversation_history` table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub user_id: Option<String>,
    pub thread_id: Option<String>,
}

impl RecordFilter {
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            thread_id: None,
        }
    }

    pub fn thread(user_id: impl Into<String>, thread_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            thread_id: Some(thread_id.into()),
        }
    }

    pub fn matches(&self, record: &ConversationRecord) -> bool {
        self.user_id.as_deref().map_or(true, |u| u == record.user_id)
            && self.thread_id.as_deref().map_or(true, |t| t == record.thread_id)
    }
}

/// Ordering on the store-assigned `timestamp`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Direct access to the relational conversation store
///
/// Implementations provide database-specific insert/select/delete. The store
/// assigns `id` and `timestamp`; no client clock is used for ordering.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert one exchange and return it as stored
    async fn insert(&self, record: NewConversation) -> Result<ConversationRecord>;

    /// Select matching records ordered by timestamp
    async fn select(
        &self,
        filter: &RecordFilter,
        order: SortOrder,
    ) -> Result<Vec<ConversationRecord>>;

    /// Delete matching records; `filter.thread_id` is required
    async fn delete(&self, filter: &RecordFilter) -> Result<u64>;
}
