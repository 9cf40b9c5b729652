use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::dbs::memory::MemoryRecordStore;
use crate::dbs::rest::PostgrestRecordStore;
use crate::error::Result;
use crate::record_store::RecordStore;

fn default_table() -> String {
    "conversation_history".to_string()
}

/// PostgREST-backed store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestStoreConfig {
    pub url: String,
    /// Secret; normally injected from the environment rather than files
    #[serde(default, skip_serializing)]
    pub api_key: String,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl RestStoreConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            table: default_table(),
            timeout_secs: None,
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }
}

#[cfg(feature = "mongodb")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoStoreConfig {
    pub uri: String,
    pub database: String,
    #[serde(default = "default_table")]
    pub collection: String,
}

/// Which direct store backs the conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StoreConfig {
    Postgrest(RestStoreConfig),
    #[cfg(feature = "mongodb")]
    Mongodb(MongoStoreConfig),
    Memory,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::Memory
    }
}

impl StoreConfig {
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Postgrest(_) => "postgrest",
            #[cfg(feature = "mongodb")]
            Self::Mongodb(_) => "mongodb",
            Self::Memory => "memory",
        }
    }

    /// Open the configured backend
    pub async fn connect(&self) -> Result<Arc<dyn RecordStore>> {
        match self {
            Self::Postgrest(config) => Ok(Arc::new(PostgrestRecordStore::new(config)?)),
            #[cfg(feature = "mongodb")]
            Self::Mongodb(config) => Ok(Arc::new(
                crate::dbs::mongo::MongoRecordStore::connect(
                    &config.uri,
                    &config.database,
                    &config.collection,
                )
                .await?,
            )),
            Self::Memory => Ok(Arc::new(MemoryRecordStore::new())),
        }
    }
}
