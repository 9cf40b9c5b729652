use anyhow::{anyhow, Result};
use std::sync::Arc;

use breachwatch_persist::ConversationStore;
use breachwatch_query::QueryClient;
use breachwatch_types::{PersistMode, SearchConfig};

use crate::orchestrator::SearchOrchestrator;

/// Builder for constructing a SearchOrchestrator with optional persistence
pub struct SearchOrchestratorBuilder {
    query_client: Option<Arc<dyn QueryClient>>,
    store: Option<Arc<ConversationStore>>,
    config: SearchConfig,
}

impl SearchOrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            query_client: None,
            store: None,
            config: SearchConfig::default(),
        }
    }

    /// Set the query client
    pub fn query_client(mut self, client: Arc<dyn QueryClient>) -> Self {
        self.query_client = Some(client);
        self
    }

    /// Save successful exchanges for signed-in users
    pub fn with_store(mut self, store: Arc<ConversationStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn persist_mode(mut self, mode: PersistMode) -> Self {
        self.config = self.config.with_persist_mode(mode);
        self
    }

    pub fn build(self) -> Result<SearchOrchestrator> {
        let query_client = self
            .query_client
            .ok_or_else(|| anyhow!("Query client is required"))?;

        Ok(SearchOrchestrator::new(query_client, self.store, self.config))
    }
}

impl Default for SearchOrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
