use anyhow::{bail, Context, Result};

use roadmap_provider::ProviderConfig;

/// Runtime configuration resolved from the environment at startup.
///
/// Required values are checked before the listener binds; a missing value is
/// a fatal configuration error, never a runtime one.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Sqlite connection string (`DATABASE_URL`).
    pub database_url: String,
    /// Provider credential (`OPENAI_API_KEY`).
    pub api_key: String,
    /// Form-token signing key (`SESSION_SECRET`).
    pub session_secret: String,
    /// Provider API root (`OPENAI_BASE_URL`, optional).
    pub provider_base_url: String,
    /// Provider model id (`OPENAI_MODEL`, optional).
    pub provider_model: String,
}

impl ServerConfig {
    /// Read the configuration from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: require("DATABASE_URL")?,
            api_key: require("OPENAI_API_KEY")?,
            session_secret: require("SESSION_SECRET")?,
            provider_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| ProviderConfig::DEFAULT_BASE_URL.to_string()),
            provider_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| ProviderConfig::DEFAULT_MODEL.to_string()),
        })
    }

    /// Filesystem path of the sqlite database. An optional `sqlite://`
    /// scheme prefix is accepted and stripped.
    pub fn database_path(&self) -> &str {
        self.database_url
            .strip_prefix("sqlite://")
            .unwrap_or(&self.database_url)
    }
}

fn require(name: &str) -> Result<String> {
    let value = std::env::var(name).with_context(|| format!("{name} must be set"))?;
    if value.trim().is_empty() {
        bail!("{name} must not be empty");
    }
    Ok(value)
}
