pub mod config;
pub mod events;
pub mod session;
pub mod warning;

pub use config::{PersistMode, SearchConfig};
pub use events::{SearchEvent, SearchOutcome, SearchPhase, SearchStatus};
pub use session::{Session, ANONYMOUS_USER_ID};
pub use warning::{Warning, WarningKind};
