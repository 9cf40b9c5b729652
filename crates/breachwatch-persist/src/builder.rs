use std::sync::Arc;

use crate::error::{PersistError, Result};
use crate::record_store::RecordStore;
use crate::service::{HistoryConfig, HistoryService};
use crate::store::ConversationStore;

pub struct ConversationStoreBuilder {
    record_store: Option<Arc<dyn RecordStore>>,
    history: Option<HistoryConfig>,
}

impl ConversationStoreBuilder {
    pub fn new() -> Self {
        Self {
            record_store: None,
            history: None,
        }
    }

    /// Direct store used for writes, deletes and fallback reads (required)
    pub fn record_store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.record_store = Some(store);
        self
    }

    /// Dedicated history service tried before the direct store
    pub fn history(mut self, config: HistoryConfig) -> Self {
        self.history = Some(config);
        self
    }

    pub fn build(self) -> Result<ConversationStore> {
        let record_store = self
            .record_store
            .ok_or_else(|| PersistError::Internal("record_store is required".to_string()))?;
        let history = self
            .history
            .as_ref()
            .map(HistoryService::new)
            .transpose()?;

        Ok(ConversationStore::new(record_store, history))
    }
}

impl Default for ConversationStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
