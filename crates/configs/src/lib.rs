//! # configs
//!
//! Layered runtime settings: built-in defaults, an optional `newsroom.toml`
//! file, then `NEWSROOM_*` environment variables (with `.env` support via
//! dotenvy). Secrets ride in `secrecy` wrappers so they never end up in
//! debug output.

use config::{Config, Environment, File, FileFormat};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

/// Fallback administrator address; deployments override it via
/// `NEWSROOM_ADMIN_EMAIL` or the settings file.
const DEFAULT_ADMIN_EMAIL: &str = "acehwan69@gmail.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    /// The single fixed administrator account.
    pub admin_email: String,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub assist: AssistSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct DatabaseSettings {
    /// e.g. `sqlite:newsroom.db`; absent selects the in-memory store.
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AssistSettings {
    pub endpoint: Option<String>,
    pub api_key: Option<SecretString>,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config = Config::builder()
            .set_default("admin_email", DEFAULT_ADMIN_EMAIL)?
            .add_source(File::with_name("newsroom").format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("NEWSROOM").separator("__"))
            .build()?;
        let settings: Settings = config.try_deserialize()?;
        tracing::debug!(admin_email = %settings.admin_email, "settings loaded");
        Ok(settings)
    }
}
