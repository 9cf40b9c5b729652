pub mod memory;
pub mod rest;

#[cfg(feature = "mongodb")]
pub mod mongo;

use crate::error::{PersistError, Result};
use crate::record_store::RecordFilter;

/// Refuse deletes that are not scoped to a thread
pub(crate) fn require_thread(filter: &RecordFilter) -> Result<&str> {
    filter
        .thread_id
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| PersistError::InvalidInput("delete requires a thread_id filter".to_string()))
}
