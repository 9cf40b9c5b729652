use breachwatch_types::WarningKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Query text is empty")]
    InvalidInput,

    #[error("API response status: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Search API returned no answer text")]
    EmptyResponse,

    #[error("Malformed search response: {0}")]
    Malformed(String),

    #[error("Client configuration error: {0}")]
    Config(String),
}

impl QueryError {
    /// Warning category the orchestrator reports for this failure
    pub fn kind(&self) -> WarningKind {
        match self {
            Self::InvalidInput => WarningKind::EmptyQuery,
            Self::Status { .. } => WarningKind::Remote,
            Self::Transport(_) | Self::Config(_) => WarningKind::Transport,
            Self::EmptyResponse => WarningKind::EmptyResponse,
            Self::Malformed(_) => WarningKind::Malformed,
        }
    }
}

impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
