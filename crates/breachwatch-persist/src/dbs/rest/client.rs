use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

use crate::config::RestStoreConfig;
use crate::dbs::require_thread;
use crate::error::{PersistError, Result};
use crate::models::{ConversationRecord, NewConversation};
use crate::record_store::{RecordFilter, RecordStore, SortOrder};

/// `conversation_history` table exposed through a PostgREST endpoint
#[derive(Debug, Clone)]
pub struct PostgrestRecordStore {
    http_client: reqwest::Client,
    table_url: String,
}

impl PostgrestRecordStore {
    pub fn new(config: &RestStoreConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(PersistError::Internal("store url is required".to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if !config.api_key.is_empty() {
            let key = HeaderValue::from_str(&config.api_key)
                .map_err(|_| PersistError::Internal("Invalid store API key format".to_string()))?;
            let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|_| PersistError::Internal("Invalid store API key format".to_string()))?;
            headers.insert(HeaderName::from_static("apikey"), key);
            headers.insert(AUTHORIZATION, bearer);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| PersistError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            table_url: format!(
                "{}/rest/v1/{}",
                config.url.trim_end_matches('/'),
                config.table
            ),
        })
    }

    /// PostgREST horizontal filters (`column=eq.value`)
    fn filter_params(filter: &RecordFilter) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(user_id) = &filter.user_id {
            params.push(("user_id", format!("eq.{}", user_id)));
        }
        if let Some(thread_id) = &filter.thread_id {
            params.push(("thread_id", format!("eq.{}", thread_id)));
        }
        params
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response body".to_string());
        tracing::error!(status = %status, body = %body, "Store request failed");
        Err(PersistError::Store(format!("{} - {}", status, body)))
    }
}

#[async_trait]
impl RecordStore for PostgrestRecordStore {
    async fn insert(&self, record: NewConversation) -> Result<ConversationRecord> {
        let response = self
            .http_client
            .post(&self.table_url)
            .header("Prefer", "return=representation")
            .json(&record)
            .send()
            .await?;

        let rows: Vec<ConversationRecord> = Self::check(response).await?.json().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| PersistError::Malformed("insert returned no rows".to_string()))
    }

    async fn select(
        &self,
        filter: &RecordFilter,
        order: SortOrder,
    ) -> Result<Vec<ConversationRecord>> {
        let order = match order {
            SortOrder::Ascending => "timestamp.asc",
            SortOrder::Descending => "timestamp.desc",
        };
        let mut params = Self::filter_params(filter);
        params.push(("select", "*".to_string()));
        params.push(("order", order.to_string()));

        let response = self
            .http_client
            .get(&self.table_url)
            .query(&params)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete(&self, filter: &RecordFilter) -> Result<u64> {
        require_thread(filter)?;

        let response = self
            .http_client
            .delete(&self.table_url)
            .header("Prefer", "return=representation")
            .query(&Self::filter_params(filter))
            .send()
            .await?;

        let deleted: Vec<serde_json::Value> = Self::check(response).await?.json().await?;
        Ok(deleted.len() as u64)
    }
}
