use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

use breachwatch_persist::ConversationStore;
use breachwatch_query::{QueryClient, QueryRequest, QueryResponse};
use breachwatch_types::{
    PersistMode, SearchConfig, SearchEvent, SearchOutcome, SearchPhase, Session, Warning,
};

use crate::builder::SearchOrchestratorBuilder;

/// Drives one search from raw input to a [`SearchOutcome`].
///
/// Components are shared behind `Arc` and never mutated, so a single
/// orchestrator serves any number of concurrent runs.
pub struct SearchOrchestrator {
    query_client: Arc<dyn QueryClient>,
    store: Option<Arc<ConversationStore>>,
    config: SearchConfig,
}

impl SearchOrchestrator {
    pub fn new(
        query_client: Arc<dyn QueryClient>,
        store: Option<Arc<ConversationStore>>,
        config: SearchConfig,
    ) -> Self {
        Self {
            query_client,
            store,
            config,
        }
    }

    /// Create a builder for fluent construction
    pub fn builder() -> SearchOrchestratorBuilder {
        SearchOrchestratorBuilder::new()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run a search to completion
    pub async fn run(
        &self,
        session: &Session,
        query_text: &str,
        current_thread_id: Option<&str>,
    ) -> SearchOutcome {
        self.start(None)
            .execute(session, query_text, current_thread_id)
            .await
    }

    /// Spawn a search in the background, return event receiver.
    ///
    /// Emits a `PhaseChanged` per transition and finishes with `Completed`.
    pub fn spawn_run(
        &self,
        session: Session,
        query_text: String,
        current_thread_id: Option<String>,
    ) -> mpsc::Receiver<SearchEvent> {
        let (tx, rx) = mpsc::channel(self.config.event_buffer.max(1));
        let run = self.start(Some(tx.clone()));

        tokio::spawn(async move {
            let outcome = run
                .execute(&session, &query_text, current_thread_id.as_deref())
                .await;
            // Receiver may already be gone
            let _ = tx.send(SearchEvent::Completed { outcome }).await;
        });

        rx
    }

    fn start(&self, events: Option<mpsc::Sender<SearchEvent>>) -> SearchRun {
        SearchRun {
            query_client: Arc::clone(&self.query_client),
            store: self.store.clone(),
            persist_mode: self.config.persist_mode,
            events,
            phase: SearchPhase::Idle,
        }
    }
}

/// State of a single run
struct SearchRun {
    query_client: Arc<dyn QueryClient>,
    store: Option<Arc<ConversationStore>>,
    persist_mode: PersistMode,
    events: Option<mpsc::Sender<SearchEvent>>,
    phase: SearchPhase,
}

impl SearchRun {
    async fn enter(&mut self, phase: SearchPhase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "Search phase transition");
        self.phase = phase;
        if let Some(tx) = &self.events {
            let _ = tx.send(SearchEvent::PhaseChanged { phase }).await;
        }
    }

    async fn execute(
        mut self,
        session: &Session,
        query_text: &str,
        current_thread_id: Option<&str>,
    ) -> SearchOutcome {
        let start_time = Instant::now();

        self.enter(SearchPhase::Validating).await;
        let text = query_text.trim();
        if text.is_empty() {
            tracing::debug!("Rejected blank search query");
            self.enter(SearchPhase::Done).await;
            return SearchOutcome::rejected(Warning::empty_query());
        }

        self.enter(SearchPhase::Querying).await;
        let request = QueryRequest::new(text)
            .with_user(Some(session.query_user_id()))
            .with_thread(current_thread_id);

        let response = match self.query_client.query(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    kind = ?e.kind(),
                    error = %e,
                    duration_ms = start_time.elapsed().as_millis() as u64,
                    "Search query failed"
                );
                self.enter(SearchPhase::Failed).await;
                return SearchOutcome::failed(Warning::new(e.kind(), e.to_string()));
            }
        };

        self.enter(SearchPhase::Succeeded).await;
        // Continue the caller's thread, else whatever the service assigned
        let thread_id = current_thread_id
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string)
            .or_else(|| response.thread_id.clone());

        let mut outcome = SearchOutcome::success(response.text.clone());
        outcome.classification = response.classification.clone();
        outcome.thread_id = thread_id.clone();

        if let (Some(store), true) = (self.store.clone(), session.is_active()) {
            self.enter(SearchPhase::PersistingBestEffort).await;
            self.persist(store, session, text, &response, thread_id, &mut outcome)
                .await;
        }

        self.enter(SearchPhase::Done).await;
        tracing::info!(
            status = ?outcome.status,
            warnings = outcome.warnings.len(),
            duration_ms = start_time.elapsed().as_millis() as u64,
            "Search completed"
        );
        outcome
    }

    async fn persist(
        &self,
        store: Arc<ConversationStore>,
        session: &Session,
        text: &str,
        response: &QueryResponse,
        thread_id: Option<String>,
        outcome: &mut SearchOutcome,
    ) {
        match self.persist_mode {
            PersistMode::Await => {
                match store
                    .insert(session, text, &response.text, thread_id.as_deref(), None)
                    .await
                {
                    Ok(saved_thread) => outcome.thread_id = Some(saved_thread),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to save conversation");
                        outcome
                            .warnings
                            .push(Warning::persistence(format!("Conversation not saved: {}", e)));
                    }
                }
            }
            PersistMode::Detached => {
                let session = session.clone();
                let text = text.to_string();
                let answer = response.text.clone();
                tokio::spawn(async move {
                    if let Err(e) = store
                        .insert(&session, &text, &answer, thread_id.as_deref(), None)
                        .await
                    {
                        tracing::error!("Failed to save conversation: {}", e);
                    }
                });
            }
        }
    }
}
