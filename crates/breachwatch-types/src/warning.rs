use serde::{Deserialize, Serialize};

/// Category of a non-fatal problem reported alongside a search outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Blank input, rejected before any network call
    EmptyQuery,
    /// The request never completed
    Transport,
    /// The service answered with a non-2xx status
    Remote,
    /// 2xx answer without usable text
    EmptyResponse,
    /// 2xx answer that could not be decoded
    Malformed,
    Unauthenticated,
    /// Saving the exchange failed; the search result is still valid
    Persistence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn empty_query() -> Self {
        Self::new(WarningKind::EmptyQuery, "Please enter a search query")
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::new(WarningKind::Persistence, message)
    }
}
