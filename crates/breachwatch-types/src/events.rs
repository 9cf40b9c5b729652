use serde::{Deserialize, Serialize};

use crate::warning::Warning;

/// Steps a single search goes through.
///
/// `Idle → Validating → Querying → (Succeeded | Failed) → PersistingBestEffort → Done`.
/// `Failed` is terminal and never reaches persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    Idle,
    Validating,
    Querying,
    Succeeded,
    Failed,
    PersistingBestEffort,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Success,
    Failed,
    /// Input never left the validation step
    Rejected,
}

/// What a caller gets back from one search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub status: SearchStatus,
    pub display_text: String,
    pub warnings: Vec<Warning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
}

impl SearchOutcome {
    pub fn success(display_text: impl Into<String>) -> Self {
        Self {
            status: SearchStatus::Success,
            display_text: display_text.into(),
            warnings: Vec::new(),
            thread_id: None,
            classification: None,
        }
    }

    pub fn failed(warning: Warning) -> Self {
        Self {
            status: SearchStatus::Failed,
            display_text: String::new(),
            warnings: vec![warning],
            thread_id: None,
            classification: None,
        }
    }

    pub fn rejected(warning: Warning) -> Self {
        Self {
            status: SearchStatus::Rejected,
            ..Self::failed(warning)
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SearchStatus::Success
    }
}

/// Progress notifications emitted by a spawned search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchEvent {
    PhaseChanged { phase: SearchPhase },
    Completed { outcome: SearchOutcome },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warning::WarningKind;

    #[test]
    fn test_rejected_outcome_keeps_warning() {
        let outcome = SearchOutcome::rejected(Warning::empty_query());
        assert_eq!(outcome.status, SearchStatus::Rejected);
        assert!(outcome.display_text.is_empty());
        assert_eq!(outcome.warnings[0].kind, WarningKind::EmptyQuery);
    }

    #[test]
    fn test_event_serialization_tag() {
        let event = SearchEvent::PhaseChanged {
            phase: SearchPhase::PersistingBestEffort,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "phase_changed");
        assert_eq!(json["phase"], "persisting_best_effort");
    }
}
