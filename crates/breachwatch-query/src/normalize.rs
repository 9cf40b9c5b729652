use serde::Deserialize;
use serde_json::Value;

use crate::error::{QueryError, Result};
use crate::traits::QueryResponse;

/// Key under which the upstream service sometimes nests its answer text
pub const NESTED_ANSWER_KEY: &str = "Use Clear Language: Avoid ambiguity and complex wording";

/// Body returned by the search endpoint, before normalization
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub response: Option<Value>,
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub classified_type: Option<String>,
}

/// Extract answer text from either payload shape.
///
/// A string is used as is. An object yields the value under
/// [`NESTED_ANSWER_KEY`] when that is non-blank, otherwise the whole object
/// serialized. Returns `None` when nothing readable is left.
pub fn normalize_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get(NESTED_ANSWER_KEY) {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(nested) if !nested.is_null() && !nested.is_string() => nested.to_string(),
            _ => value.to_string(),
        },
        other => other.to_string(),
    };

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

pub fn normalize_response(raw: RawSearchResponse) -> Result<QueryResponse> {
    let text = raw
        .response
        .as_ref()
        .and_then(normalize_text)
        .ok_or(QueryError::EmptyResponse)?;

    Ok(QueryResponse {
        text,
        thread_id: raw.thread_id.filter(|id| !id.is_empty()),
        classification: raw.classified_type,
        status: raw.status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(response: Value) -> RawSearchResponse {
        RawSearchResponse {
            response: Some(response),
            ..Default::default()
        }
    }

    #[test]
    fn test_nested_answer_is_unwrapped() {
        let normalized = normalize_response(raw(json!({ NESTED_ANSWER_KEY: "X" }))).unwrap();
        assert_eq!(normalized.text, "X");
    }

    #[test]
    fn test_plain_string_answer() {
        let normalized = normalize_response(raw(json!("Y"))).unwrap();
        assert_eq!(normalized.text, "Y");
    }

    #[test]
    fn test_object_without_known_key_is_serialized() {
        let text = normalize_text(&json!({ "summary": "patch now" })).unwrap();
        assert_eq!(text, r#"{"summary":"patch now"}"#);
    }

    #[test]
    fn test_blank_nested_value_falls_back_to_object() {
        let text = normalize_text(&json!({ NESTED_ANSWER_KEY: "" })).unwrap();
        assert!(text.contains(NESTED_ANSWER_KEY));
    }

    #[test]
    fn test_missing_response_is_empty_response_error() {
        let err = normalize_response(RawSearchResponse::default()).unwrap_err();
        assert!(matches!(err, QueryError::EmptyResponse));
    }

    #[test]
    fn test_blank_string_is_empty_response_error() {
        let err = normalize_response(raw(json!("   "))).unwrap_err();
        assert!(matches!(err, QueryError::EmptyResponse));
    }

    #[test]
    fn test_empty_thread_id_dropped() {
        let mut payload = raw(json!("answer"));
        payload.thread_id = Some(String::new());
        payload.classified_type = Some("vulnerability".to_string());

        let normalized = normalize_response(payload).unwrap();
        assert_eq!(normalized.thread_id, None);
        assert_eq!(normalized.classification.as_deref(), Some("vulnerability"));
    }
}
