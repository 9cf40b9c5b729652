mod record;
mod thread;

pub use record::{default_title, ConversationRecord, NewConversation};
pub(crate) use record::optional_store_timestamp;
pub use thread::ThreadSummary;
