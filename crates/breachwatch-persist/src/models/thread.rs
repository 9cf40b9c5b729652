use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::ConversationRecord;

/// Derived listing entry for one thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadSummary {
    pub thread_id: String,
    #[serde(default)]
    pub title: String,
    /// Representative record's timestamp; the history service may omit it
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<&ConversationRecord> for ThreadSummary {
    fn from(record: &ConversationRecord) -> Self {
        Self {
            thread_id: record.thread_id.clone(),
            title: record.display_title(),
            timestamp: Some(record.timestamp),
        }
    }
}
