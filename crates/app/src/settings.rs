//! Handles settings for the application.
//!
//! Values are layered: built-in defaults, then the optional settings file
//! (`settings.toml` unless `--config` says otherwise), then `TXBOARD__*`
//! environment variables, e.g. `TXBOARD__SERVER__PORT=9000`.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_FEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Database {
    pub fn url(&self) -> String {
        match self {
            Database::Memory => String::from("sqlite::memory:"),
            Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Seed {
    /// Fetch the feed and replace the store at startup.
    pub enabled: bool,
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub seed: Seed,
}

impl Settings {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 8070)?
            .set_default("server.database", "memory")?
            .set_default("seed.enabled", true)?
            .set_default("seed.url", DEFAULT_FEED_URL)?
            .set_default("seed.timeout_secs", 30)?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("TXBOARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_settings_file() {
        let settings = Settings::new("missing-settings-file").unwrap();
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.port, 8070);
        assert_eq!(settings.server.database, Database::Memory);
        assert!(settings.seed.enabled);
        assert_eq!(settings.seed.url, DEFAULT_FEED_URL);
    }

    #[test]
    fn database_urls() {
        assert_eq!(Database::Memory.url(), "sqlite::memory:");
        assert_eq!(
            Database::Sqlite("data/tx.db".to_string()).url(),
            "sqlite:data/tx.db?mode=rwc"
        );
    }
}
