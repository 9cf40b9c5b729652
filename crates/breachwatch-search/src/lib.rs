pub mod builder;
pub mod orchestrator;

pub use builder::SearchOrchestratorBuilder;
pub use orchestrator::SearchOrchestrator;

// Re-export the types callers need to drive a search
pub use breachwatch_types::{
    PersistMode, SearchConfig, SearchEvent, SearchOutcome, SearchPhase, SearchStatus, Session,
    Warning, WarningKind,
};
