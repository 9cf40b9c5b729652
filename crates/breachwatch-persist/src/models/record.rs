use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const TITLE_CHARS: usize = 50;

/// One stored query/response exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRecord {
    #[serde(deserialize_with = "text_or_json")]
    pub id: String,
    pub user_id: String,
    pub query: String,
    #[serde(deserialize_with = "text_or_json")]
    pub response: String,
    pub thread_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(deserialize_with = "store_timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl ConversationRecord {
    /// Stored title, or the truncated query when none was saved
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| default_title(&self.query))
    }
}

/// Insert payload; `id` and `timestamp` are assigned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewConversation {
    pub user_id: String,
    pub query: String,
    pub response: String,
    pub thread_id: String,
    pub title: String,
}

impl NewConversation {
    /// Starts a new thread with a fresh id and the default title
    pub fn new(
        user_id: impl Into<String>,
        query: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        let query = query.into();
        Self {
            user_id: user_id.into(),
            title: default_title(&query),
            query,
            response: response.into(),
            thread_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Continue an existing thread instead of starting one
    pub fn with_thread(mut self, thread_id: Option<&str>) -> Self {
        if let Some(id) = thread_id.filter(|id| !id.trim().is_empty()) {
            self.thread_id = id.to_string();
        }
        self
    }

    pub fn with_title(mut self, title: Option<&str>) -> Self {
        if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
            self.title = title.to_string();
        }
        self
    }
}

/// First 50 characters of the query followed by `...`
pub fn default_title(query: &str) -> String {
    let head: String = query.chars().take(TITLE_CHARS).collect();
    format!("{}...", head)
}

/// Accept a string as is and coerce any other JSON value to its text form
fn text_or_json<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Parse a store timestamp; values without an offset are taken as UTC
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = raw.parse::<DateTime<Utc>>() {
        return Some(ts);
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

pub(crate) fn store_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

pub(crate) fn optional_store_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw))),
        None => Ok(None),
    }
}
