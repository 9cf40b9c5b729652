use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::{ConversationRecord, NewConversation};

/// MongoDB-specific record (uses ObjectId and BSON dates)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: String,
    pub query: String,
    pub response: String,
    pub thread_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
}

impl MongoRecord {
    /// Stamp a new insert with a fresh id and the server-side insert time
    pub fn stamp(record: NewConversation) -> Self {
        Self {
            id: ObjectId::new(),
            user_id: record.user_id,
            query: record.query,
            response: record.response,
            thread_id: record.thread_id,
            title: Some(record.title),
            timestamp: Utc::now(),
        }
    }
}

impl From<MongoRecord> for ConversationRecord {
    fn from(record: MongoRecord) -> Self {
        Self {
            id: record.id.to_hex(),
            user_id: record.user_id,
            query: record.query,
            response: record.response,
            thread_id: record.thread_id,
            title: record.title,
            timestamp: record.timestamp,
        }
    }
}
