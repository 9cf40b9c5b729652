use std::collections::HashSet;

use crate::models::{ConversationRecord, ThreadSummary};

/// Turns raw record feeds into thread listings and conversations
pub struct ThreadReconciler;

impl ThreadReconciler {
    /// Group records by thread, one summary per thread.
    ///
    /// The first record seen for a thread is its representative and summaries
    /// come out in first-appearance order. Fed the store's newest-first feed,
    /// this lists threads by latest activity with the latest title. Input order
    /// is the contract here: nothing is re-sorted.
    pub fn summarize(records: &[ConversationRecord]) -> Vec<ThreadSummary> {
        // `summaries` keeps insertion order, `seen` only answers membership
        let mut seen: HashSet<&str> = HashSet::new();
        let mut summaries: Vec<ThreadSummary> = Vec::new();

        for record in records {
            if seen.insert(record.thread_id.as_str()) {
                summaries.push(ThreadSummary::from(record));
            }
        }

        summaries
    }

    /// A thread's records oldest first (stable for equal timestamps)
    pub fn conversation(mut records: Vec<ConversationRecord>) -> Vec<ConversationRecord> {
        records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        records
    }

    /// Records newest first (stable for equal timestamps)
    pub fn newest_first(mut records: Vec<ConversationRecord>) -> Vec<ConversationRecord> {
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records
    }
}
