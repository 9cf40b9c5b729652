use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One request/response exchange with the inference service.
///
/// Every call is independent: no retries, no caching, no deduplication of
/// identical concurrent queries.
#[async_trait]
pub trait QueryClient: Send + Sync {
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub text: String,
    /// Overrides the client's configured context hint
    pub context: Option<String>,
    pub user_id: Option<String>,
    pub thread_id: Option<String>,
}

impl QueryRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: None,
            user_id: None,
            thread_id: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_user(mut self, user_id: Option<&str>) -> Self {
        self.user_id = user_id.map(str::to_string);
        self
    }

    pub fn with_thread(mut self, thread_id: Option<&str>) -> Self {
        self.thread_id = thread_id.map(str::to_string);
        self
    }
}

/// Normalized answer: callers never see the raw payload shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub text: String,
    pub thread_id: Option<String>,
    pub classification: Option<String>,
    pub status: Option<String>,
}
