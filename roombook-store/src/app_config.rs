use serde::Deserialize;
use std::env;
use std::time::Duration;

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Upper bound on a single store round trip.
    pub store_timeout_ms: u64,
}

impl ServerConfig {
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Mongo,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub backend: Backend,
    pub url: Option<String>,
    pub name: Option<String>,
    pub collection: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        Self::builder(&run_mode)?
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<Builder, config::ConfigError> {
        config::Config::builder()
            .set_default("server.port", 8000)?
            .set_default("server.store_timeout_ms", 5000)?
            .set_default("database.backend", "mongo")?
            .set_default("database.collection", "booking")
    }

    fn builder(run_mode: &str) -> Result<Builder, config::ConfigError> {
        Self::defaults()?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. ROOMBOOK__SERVER__PORT=9000
            .add_source(config::Environment::with_prefix("ROOMBOOK").separator("__"))
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .set_override_option("database.name", env::var("DATABASE_NAME").ok())
    }
}
