//! Layered configuration: an optional `pocketledger.toml` next to the binary,
//! overridden by `POCKETLEDGER__`-prefixed environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Option<Server>,
}

#[derive(Debug, Deserialize)]
pub struct App {
    /// Log level filter, e.g. "info" or "debug".
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
    pub assistant: Option<Assistant>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Default, Deserialize)]
pub struct Assistant {
    /// Falls back to the `GEMINI_API_KEY` environment variable when absent.
    pub api_key: Option<String>,
    pub model: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("app.level", "info")?
            .add_source(File::with_name("pocketledger").required(false))
            .add_source(Environment::with_prefix("POCKETLEDGER").separator("__"))
            .build()?
            .try_deserialize()
    }
}
