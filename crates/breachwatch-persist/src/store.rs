use breachwatch_types::Session;
use std::future::Future;
use std::sync::Arc;

use crate::builder::ConversationStoreBuilder;
use crate::error::{PersistError, Result};
use crate::models::{ConversationRecord, NewConversation, ThreadSummary};
use crate::paths::{DirectPath, ReadPath, ServicePath};
use crate::reconciler::ThreadReconciler;
use crate::record_store::{RecordFilter, RecordStore};
use crate::service::HistoryService;

/// Conversation history with dual-path reads.
///
/// Writes and deletes go to the direct [`RecordStore`]. Reads try each
/// [`ReadPath`] in order and return the first success unchanged.
pub struct ConversationStore {
    records: Arc<dyn RecordStore>,
    read_paths: Vec<Arc<dyn ReadPath>>,
}

impl ConversationStore {
    /// History service first (when given), then the direct store
    pub fn new(records: Arc<dyn RecordStore>, history: Option<HistoryService>) -> Self {
        let mut read_paths: Vec<Arc<dyn ReadPath>> = Vec::new();
        if let Some(service) = history {
            read_paths.push(Arc::new(ServicePath::new(service)));
        }
        read_paths.push(Arc::new(DirectPath::new(Arc::clone(&records))));

        Self {
            records,
            read_paths,
        }
    }

    /// Explicit read order, e.g. to plug in another primary
    pub fn with_read_paths(
        records: Arc<dyn RecordStore>,
        read_paths: Vec<Arc<dyn ReadPath>>,
    ) -> Self {
        Self {
            records,
            read_paths,
        }
    }

    pub fn builder() -> ConversationStoreBuilder {
        ConversationStoreBuilder::new()
    }

    pub fn read_path_names(&self) -> Vec<&'static str> {
        self.read_paths.iter().map(|p| p.name()).collect()
    }

    /// Save one exchange and return its thread id.
    ///
    /// Fails with [`PersistError::Unauthenticated`] before any I/O when there is
    /// no session. A thread id is generated when none is continued.
    pub async fn insert(
        &self,
        session: &Session,
        query: &str,
        response: &str,
        thread_id: Option<&str>,
        title: Option<&str>,
    ) -> Result<String> {
        let user_id = session.user_id().ok_or(PersistError::Unauthenticated)?;
        if query.trim().is_empty() {
            return Err(PersistError::InvalidInput("query must not be empty".to_string()));
        }

        let record = NewConversation::new(user_id, query, response)
            .with_thread(thread_id)
            .with_title(title);
        let thread_id = record.thread_id.clone();

        let stored = self.records.insert(record).await?;
        tracing::debug!(thread_id = %stored.thread_id, record_id = %stored.id, "Conversation saved");

        Ok(thread_id)
    }

    /// One thread, oldest first
    pub async fn try_read_by_thread(
        &self,
        session: &Session,
        thread_id: &str,
    ) -> Result<Vec<ConversationRecord>> {
        let user_id = session.user_id().ok_or(PersistError::Unauthenticated)?;
        // A blank thread reads as "all history" on the service
        if thread_id.trim().is_empty() {
            return Err(PersistError::InvalidInput("thread_id must not be empty".to_string()));
        }
        let records = self
            .first_success("read_by_thread", move |path| async move {
                path.thread_records(user_id, thread_id).await
            })
            .await?;
        Ok(ThreadReconciler::conversation(records))
    }

    /// Like [`try_read_by_thread`](Self::try_read_by_thread), empty on any failure
    pub async fn read_by_thread(&self, session: &Session, thread_id: &str) -> Vec<ConversationRecord> {
        self.try_read_by_thread(session, thread_id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(thread_id, error = %e, "Returning empty thread history");
                Vec::new()
            })
    }

    /// Every record of the user, newest activity first
    pub async fn try_read_all_for_user(&self, session: &Session) -> Result<Vec<ConversationRecord>> {
        let user_id = session.user_id().ok_or(PersistError::Unauthenticated)?;
        let records = self
            .first_success("read_all_for_user", move |path| async move {
                path.user_records(user_id).await
            })
            .await?;
        Ok(ThreadReconciler::newest_first(records))
    }

    pub async fn read_all_for_user(&self, session: &Session) -> Vec<ConversationRecord> {
        self.try_read_all_for_user(session).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Returning empty user history");
            Vec::new()
        })
    }

    /// One summary per thread, most recently active first
    pub async fn try_list_threads(&self, session: &Session) -> Result<Vec<ThreadSummary>> {
        let user_id = session.user_id().ok_or(PersistError::Unauthenticated)?;
        self.first_success("list_threads", move |path| async move {
            path.thread_summaries(user_id).await
        })
        .await
    }

    pub async fn list_threads(&self, session: &Session) -> Vec<ThreadSummary> {
        self.try_list_threads(session).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Returning empty thread list");
            Vec::new()
        })
    }

    /// Remove every record of the thread. Irreversible; direct store only.
    pub async fn delete_thread(&self, session: &Session, thread_id: &str) -> bool {
        let Some(user_id) = session.user_id() else {
            tracing::warn!(thread_id, "Delete attempted without a session");
            return false;
        };

        match self.records.delete(&RecordFilter::thread(user_id, thread_id)).await {
            Ok(deleted) => {
                tracing::info!(thread_id, deleted, "Conversation thread deleted");
                true
            }
            Err(e) => {
                tracing::error!(thread_id, error = %e, "Failed to delete conversation thread");
                false
            }
        }
    }

    async fn first_success<T, F, Fut>(&self, operation: &'static str, mut attempt: F) -> Result<T>
    where
        F: FnMut(Arc<dyn ReadPath>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut last_error: Option<PersistError> = None;

        for path in &self.read_paths {
            match attempt(Arc::clone(path)).await {
                Ok(value) => {
                    if last_error.is_some() {
                        tracing::info!(path = path.name(), operation, "Read served by fallback path");
                    }
                    return Ok(value);
                }
                Err(e) => {
                    tracing::warn!(path = path.name(), operation, error = %e, "Read path failed");
                    last_error = Some(e);
                }
            }
        }

        let last = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no read paths configured".to_string());
        tracing::error!(operation, last = %last, "All read paths failed");
        Err(PersistError::Exhausted { operation, last })
    }
}
