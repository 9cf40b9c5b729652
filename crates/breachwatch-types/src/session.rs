use serde::{Deserialize, Serialize};

/// User id sent to the inference service when nobody is signed in.
pub const ANONYMOUS_USER_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Whether a caller is authenticated, and as whom.
///
/// Every store and orchestrator operation takes a `Session` explicitly instead of
/// looking up an ambient "current user".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Session {
    #[default]
    Anonymous,
    Active {
        user_id: String,
    },
}

impl Session {
    pub fn active(user_id: impl Into<String>) -> Self {
        Self::Active {
            user_id: user_id.into(),
        }
    }

    /// Build a session from an optional identity; blank ids count as anonymous.
    pub fn from_user_id(user_id: Option<&str>) -> Self {
        match user_id.map(str::trim) {
            Some(id) if !id.is_empty() => Self::active(id),
            _ => Self::Anonymous,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Active { user_id } => Some(user_id),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// The id to put on outbound queries: the real user or the all-zero placeholder.
    pub fn query_user_id(&self) -> &str {
        self.user_id().unwrap_or(ANONYMOUS_USER_ID)
    }
}
