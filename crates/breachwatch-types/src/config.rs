use serde::{Deserialize, Serialize};

/// How the orchestrator treats the save that follows a successful query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistMode {
    /// Wait for the save and report a failure as a warning
    #[default]
    Await,
    /// Spawn the save and return immediately; failures are only logged
    Detached,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub persist_mode: PersistMode,
    /// Capacity of the channel returned by `spawn_run`
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

fn default_event_buffer() -> usize {
    32
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            persist_mode: PersistMode::default(),
            event_buffer: default_event_buffer(),
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_persist_mode(mut self, mode: PersistMode) -> Self {
        self.persist_mode = mode;
        self
    }

    pub fn with_event_buffer(mut self, capacity: usize) -> Self {
        self.event_buffer = capacity.max(1);
        self
    }
}
