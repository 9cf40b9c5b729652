use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use crate::dbs::require_thread;
use crate::error::Result;
use crate::models::{ConversationRecord, NewConversation};
use crate::record_store::{RecordFilter, RecordStore, SortOrder};

/// Process-local record store for tests and single-node runs
///
/// Timestamps are strictly increasing so ordering matches insertion even when
/// two inserts land in the same clock tick.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<Vec<ConversationRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with already-stored records
    pub fn with_records(records: Vec<ConversationRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, record: NewConversation) -> Result<ConversationRecord> {
        let mut records = self.records.write().await;

        let now = Utc::now();
        let timestamp = match records.iter().map(|r| r.timestamp).max() {
            Some(last) if last >= now => last + Duration::microseconds(1),
            _ => now,
        };

        let stored = ConversationRecord {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: record.user_id,
            query: record.query,
            response: record.response,
            thread_id: record.thread_id,
            title: Some(record.title),
            timestamp,
        };
        records.push(stored.clone());
        Ok(stored)
    }

    async fn select(
        &self,
        filter: &RecordFilter,
        order: SortOrder,
    ) -> Result<Vec<ConversationRecord>> {
        let mut matching: Vec<ConversationRecord> = self
            .records
            .read()
            .await
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();

        match order {
            SortOrder::Ascending => matching.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
            SortOrder::Descending => matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        }
        Ok(matching)
    }

    async fn delete(&self, filter: &RecordFilter) -> Result<u64> {
        require_thread(filter)?;

        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| !filter.matches(r));
        Ok((before - records.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_increasing_timestamps() {
        let store = MemoryRecordStore::new();
        let first = store.insert(NewConversation::new("u", "q1", "r1")).await.unwrap();
        let second = store.insert(NewConversation::new("u", "q2", "r2")).await.unwrap();

        assert!(second.timestamp > first.timestamp);
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_select_orders_and_filters() {
        let store = MemoryRecordStore::new();
        store
            .insert(NewConversation::new("u", "q1", "r").with_thread(Some("a")))
            .await
            .unwrap();
        store
            .insert(NewConversation::new("u", "q2", "r").with_thread(Some("b")))
            .await
            .unwrap();
        store
            .insert(NewConversation::new("u", "q3", "r").with_thread(Some("a")))
            .await
            .unwrap();
        store
            .insert(NewConversation::new("other", "q4", "r").with_thread(Some("a")))
            .await
            .unwrap();

        let thread = store
            .select(&RecordFilter::thread("u", "a"), SortOrder::Ascending)
            .await
            .unwrap();
        let queries: Vec<&str> = thread.iter().map(|r| r.query.as_str()).collect();
        assert_eq!(queries, vec!["q1", "q3"]);

        let feed = store
            .select(&RecordFilter::user("u"), SortOrder::Descending)
            .await
            .unwrap();
        let queries: Vec<&str> = feed.iter().map(|r| r.query.as_str()).collect();
        assert_eq!(queries, vec!["q3", "q2", "q1"]);
    }

    #[tokio::test]
    async fn test_delete_requires_thread_filter() {
        let store = MemoryRecordStore::new();
        store.insert(NewConversation::new("u", "q", "r")).await.unwrap();

        assert!(store.delete(&RecordFilter::user("u")).await.is_err());
        assert_eq!(store.len().await, 1);
    }
}
