pub mod config;
pub mod error;
pub mod intellisoc;
pub mod normalize;
pub mod traits;

pub use config::QueryConfig;
pub use error::{QueryError, Result};
pub use intellisoc::{IntelliSocClient, IntelliSocClientBuilder};
pub use normalize::{normalize_response, normalize_text, RawSearchResponse, NESTED_ANSWER_KEY};
pub use traits::{QueryClient, QueryRequest, QueryResponse};
