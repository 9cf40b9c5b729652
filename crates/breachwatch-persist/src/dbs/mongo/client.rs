use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection};

use crate::dbs::mongo::models::MongoRecord;
use crate::dbs::require_thread;
use crate::error::{PersistError, Result};
use crate::models::{ConversationRecord, NewConversation};
use crate::record_store::{RecordFilter, RecordStore, SortOrder};

#[derive(Clone)]
pub struct MongoRecordStore {
    collection: Collection<MongoRecord>,
}

impl MongoRecordStore {
    /// Connect to MongoDB and bind the conversation collection
    pub async fn connect(mongodb_uri: &str, database: &str, collection: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Store(e.to_string()))?;

        Ok(Self {
            collection: client.database(database).collection(collection),
        })
    }

    fn filter_doc(filter: &RecordFilter) -> Document {
        let mut document = Document::new();
        if let Some(user_id) = &filter.user_id {
            document.insert("user_id", user_id.as_str());
        }
        if let Some(thread_id) = &filter.thread_id {
            document.insert("thread_id", thread_id.as_str());
        }
        document
    }
}

#[async_trait]
impl RecordStore for MongoRecordStore {
    async fn insert(&self, record: NewConversation) -> Result<ConversationRecord> {
        let record = MongoRecord::stamp(record);
        self.collection.insert_one(&record).await?;
        Ok(record.into())
    }

    async fn select(
        &self,
        filter: &RecordFilter,
        order: SortOrder,
    ) -> Result<Vec<ConversationRecord>> {
        let direction = match order {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        };
        let records: Vec<MongoRecord> = self
            .collection
            .find(Self::filter_doc(filter))
            .sort(doc! { "timestamp": direction })
            .await?
            .try_collect()
            .await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, filter: &RecordFilter) -> Result<u64> {
        require_thread(filter)?;
        let result = self.collection.delete_many(Self::filter_doc(filter)).await?;
        Ok(result.deleted_count)
    }
}
