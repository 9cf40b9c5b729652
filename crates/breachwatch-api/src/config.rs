use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use breachwatch_persist::{HistoryConfig, StoreConfig};
use breachwatch_query::QueryConfig;
use breachwatch_types::SearchConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    #[serde(default)]
    pub query: QueryConfig,
    /// Absent: reads go straight to the store
    #[serde(default)]
    pub history: Option<HistoryConfig>,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    90
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables (`BREACHWATCH_SERVER__PORT=9000` → `server.port`)
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("BREACHWATCH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;

        let mut cfg: Config = config.try_deserialize()?;
        cfg.load_secrets()?;

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Secrets come from the environment, never from TOML
    fn load_secrets(&mut self) -> Result<(), ConfigError> {
        if let StoreConfig::Postgrest(rest) = &mut self.store {
            rest.api_key = std::env::var("STORE_API_KEY").map_err(|_| {
                ConfigError::Message(
                    "STORE_API_KEY environment variable is required for the postgrest store"
                        .to_string(),
                )
            })?;
        }

        #[cfg(feature = "mongodb")]
        if let StoreConfig::Mongodb(mongo) = &mut self.store {
            if let Ok(uri) = std::env::var("MONGODB_URI") {
                mongo.uri = uri;
            }
        }

        Ok(())
    }
}
