use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public search endpoint of the inference service
pub const DEFAULT_ENDPOINT: &str = "https://rajrakeshdr-intelliSOC.hf.space/search";

/// Context hint sent with every query unless the request overrides it
pub const DEFAULT_CONTEXT: &str =
    "You are a cybersecurity expert providing detailed information based on the query.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_context")]
    pub context: String,
    /// Request timeout; `None` waits indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_context() -> String {
    DEFAULT_CONTEXT.to_string()
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            context: default_context(),
            timeout_secs: None,
        }
    }
}

impl QueryConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
