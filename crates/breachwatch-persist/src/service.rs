use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{PersistError, Result};
use crate::models::{optional_store_timestamp, ConversationRecord, ThreadSummary};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Base URL exposing `/threads/{user_id}` and `/history/{user_id}`
    pub base_url: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl HistoryConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: None,
        }
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

#[derive(Debug, Deserialize)]
struct ThreadsEnvelope {
    #[serde(default)]
    status: Option<String>,
    threads: Vec<ServiceThread>,
}

#[derive(Debug, Deserialize)]
struct ServiceThread {
    thread_id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, deserialize_with = "optional_store_timestamp")]
    timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct HistoryEnvelope {
    #[serde(default)]
    status: Option<String>,
    history: Vec<ConversationRecord>,
}

/// HTTP client for the dedicated conversation history service.
///
/// Read-only: the service has no delete capability, so deletes always go
/// through the direct store.
#[derive(Debug, Clone)]
pub struct HistoryService {
    http_client: reqwest::Client,
    base_url: Url,
}

impl HistoryService {
    pub fn new(config: &HistoryConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| PersistError::Internal(format!("Invalid history base URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(PersistError::Internal(format!(
                "History base URL cannot be a base: {}",
                config.base_url
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| PersistError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// `GET {base}/threads/{user_id}`
    pub async fn threads(&self, user_id: &str) -> Result<Vec<ThreadSummary>> {
        let url = self.endpoint(&["threads", user_id])?;
        let envelope: ThreadsEnvelope = self.get_json(url, &[]).await?;
        check_status(envelope.status.as_deref())?;

        Ok(envelope
            .threads
            .into_iter()
            .map(|t| ThreadSummary {
                thread_id: t.thread_id,
                title: t.title.unwrap_or_default(),
                timestamp: t.timestamp,
            })
            .collect())
    }

    /// `GET {base}/history/{user_id}[?thread_id=...]`; all of the user's history without a thread
    pub async fn history(
        &self,
        user_id: &str,
        thread_id: Option<&str>,
    ) -> Result<Vec<ConversationRecord>> {
        let url = self.endpoint(&["history", user_id])?;
        let query: Vec<(&str, &str)> = thread_id.map(|t| ("thread_id", t)).into_iter().collect();
        let envelope: HistoryEnvelope = self.get_json(url, &query).await?;
        check_status(envelope.status.as_deref())?;
        Ok(envelope.history)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PersistError::Internal("History base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, query: &[(&str, &str)]) -> Result<T> {
        tracing::debug!(url = %url, "Requesting history service");

        let response = self.http_client.get(url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            return Err(PersistError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn check_status(status: Option<&str>) -> Result<()> {
    match status {
        Some(s) if s.eq_ignore_ascii_case("error") => Err(PersistError::Malformed(
            "history service reported status \"error\"".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_segments() {
        let service = HistoryService::new(&HistoryConfig::new("https://svc.example.com/api/")).unwrap();
        let url = service.endpoint(&["history", "u 1"]).unwrap();
        assert_eq!(url.as_str(), "https://svc.example.com/api/history/u%201");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(HistoryService::new(&HistoryConfig::new("not a url")).is_err());
    }

    #[test]
    fn test_error_status_is_malformed() {
        assert!(check_status(Some("error")).is_err());
        assert!(check_status(Some("success")).is_ok());
        assert!(check_status(None).is_ok());
    }
}
