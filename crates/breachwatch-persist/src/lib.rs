pub mod builder;
pub mod config;
pub mod dbs;
pub mod error;
pub mod models;
pub mod paths;
pub mod reconciler;
pub mod record_store;
pub mod service;
pub mod store;

pub use builder::ConversationStoreBuilder;
pub use config::{RestStoreConfig, StoreConfig};
pub use dbs::memory::MemoryRecordStore;
pub use dbs::rest::PostgrestRecordStore;
pub use error::{PersistError, Result};
pub use models::{default_title, ConversationRecord, NewConversation, ThreadSummary};
pub use paths::{DirectPath, ReadPath, ServicePath};
pub use reconciler::ThreadReconciler;
pub use record_store::{RecordFilter, RecordStore, SortOrder};
pub use service::{HistoryConfig, HistoryService};
pub use store::ConversationStore;

#[cfg(feature = "mongodb")]
pub use config::MongoStoreConfig;
#[cfg(feature = "mongodb")]
pub use dbs::mongo::MongoRecordStore;
