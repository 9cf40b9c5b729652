// IntelliSOC search endpoint client

use async_trait::async_trait;
use breachwatch_types::ANONYMOUS_USER_ID;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use std::time::Duration;

use crate::config::{QueryConfig, DEFAULT_CONTEXT, DEFAULT_ENDPOINT};
use crate::error::{QueryError, Result};
use crate::normalize::{normalize_response, RawSearchResponse};
use crate::traits::{QueryClient, QueryRequest, QueryResponse};

/// Wire body of `POST /search`.
///
/// `thread_id` is always a string: the service rejects `null`.
#[derive(Debug, Serialize)]
struct SearchPayload<'a> {
    query: &'a str,
    user_id: &'a str,
    thread_id: &'a str,
    context: &'a str,
}

/// HTTP client for the inference search endpoint (no SDK)
#[derive(Debug)]
pub struct IntelliSocClient {
    http_client: reqwest::Client,
    endpoint: String,
    context: String,
}

impl IntelliSocClient {
    pub fn builder() -> IntelliSocClientBuilder {
        IntelliSocClientBuilder::default()
    }

    pub fn from_config(config: &QueryConfig) -> Result<Self> {
        let mut builder = Self::builder()
            .endpoint(&config.endpoint)
            .context(&config.context);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_payload<'a>(&'a self, request: &'a QueryRequest) -> SearchPayload<'a> {
        SearchPayload {
            query: &request.text,
            user_id: request.user_id.as_deref().unwrap_or(ANONYMOUS_USER_ID),
            thread_id: request.thread_id.as_deref().unwrap_or(""),
            context: request.context.as_deref().unwrap_or(&self.context),
        }
    }
}

#[async_trait]
impl QueryClient for IntelliSocClient {
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        if request.text.trim().is_empty() {
            return Err(QueryError::InvalidInput);
        }

        let payload = self.build_payload(request);
        tracing::debug!(
            endpoint = %self.endpoint,
            user_id = payload.user_id,
            thread_id = payload.thread_id,
            "Sending search query"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, "Search API responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Search API request failed");
            return Err(QueryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let raw: RawSearchResponse =
            serde_json::from_str(&body).map_err(|e| QueryError::Malformed(e.to_string()))?;

        normalize_response(raw)
    }
}

/// Builder for [`IntelliSocClient`]
#[derive(Debug, Default)]
pub struct IntelliSocClientBuilder {
    endpoint: Option<String>,
    context: Option<String>,
    timeout: Option<Duration>,
}

impl IntelliSocClientBuilder {
    /// Search URL (default: the public IntelliSOC endpoint)
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Context hint used when a request carries none
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<IntelliSocClient> {
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        if endpoint.trim().is_empty() {
            return Err(QueryError::Config("Endpoint must not be empty".to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut http_builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            http_builder = http_builder.timeout(timeout);
        }
        let http_client = http_builder
            .build()
            .map_err(|e| QueryError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(IntelliSocClient {
            http_client,
            endpoint,
            context: self.context.unwrap_or_else(|| DEFAULT_CONTEXT.to_string()),
        })
    }
}
