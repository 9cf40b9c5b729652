use std::sync::Arc;

use breachwatch_persist::ConversationStore;
use breachwatch_query::IntelliSocClient;
use breachwatch_search::SearchOrchestrator;

use crate::config::Config;
use crate::error::{ApiError, ApiResult};

/// Shared application state passed to all handlers
///
/// The orchestrator and store are immutable after startup and shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<ConversationStore>,
    pub search: Arc<SearchOrchestrator>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<ConversationStore>, search: SearchOrchestrator) -> Self {
        Self {
            config: Arc::new(config),
            store,
            search: Arc::new(search),
        }
    }

    /// Connect the configured store and build the search pipeline
    pub async fn from_config(config: Config) -> ApiResult<Self> {
        tracing::info!(backend = config.store.backend_name(), "Connecting conversation store");
        let records = config.store.connect().await?;

        let mut builder = ConversationStore::builder().record_store(records);
        if let Some(history) = &config.history {
            tracing::info!(base_url = %history.base_url, "History service enabled");
            builder = builder.history(history.clone());
        }
        let store = Arc::new(builder.build()?);

        let query_client = IntelliSocClient::from_config(&config.query)
            .map_err(|e| ApiError::Config(e.to_string()))?;
        tracing::info!(endpoint = query_client.endpoint(), "Search client ready");

        let search = SearchOrchestrator::builder()
            .query_client(Arc::new(query_client))
            .with_store(Arc::clone(&store))
            .config(config.search.clone())
            .build()?;

        Ok(Self::new(config, store, search))
    }
}
