//! Configuration loading from files and the process environment.

use crate::schema::Config;
use drack_common::{DrackError, LogFormat, Result, UserId};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variables understood by [`ConfigLoader`].
pub mod env_keys {
    /// Path of an optional configuration file.
    pub const CONFIG_PATH: &str = "DRACK_CONFIG";
    /// Discord bot token.
    pub const DISCORD_TOKEN: &str = "DISCORD_TOKEN";
    /// Discord application ID.
    pub const DISCORD_CLIENT_ID: &str = "DISCORD_CLIENT_ID";
    /// Owner user ID.
    pub const OWNER_ID: &str = "OWNER_ID";
    /// PocketBase base URL.
    pub const POCKETBASE_URL: &str = "POCKETBASE_URL";
    /// PocketBase superuser e-mail.
    pub const POCKETBASE_ADMIN_EMAIL: &str = "POCKETBASE_ADMIN_EMAIL";
    /// PocketBase superuser password.
    pub const POCKETBASE_ADMIN_PASSWORD: &str = "POCKETBASE_ADMIN_PASSWORD";
    /// PocketBase balances collection.
    pub const POCKETBASE_COLLECTION: &str = "POCKETBASE_COLLECTION";
    /// Log level filter.
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    /// Log output format.
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
    /// Log file path.
    pub const LOG_FILE: &str = "LOG_FILE";
}

/// File used when `DRACK_CONFIG` is not set. Its absence is not an error.
pub const DEFAULT_CONFIG_FILE: &str = "drack.toml";

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML document
    Toml,
    /// YAML document
    Yaml,
    /// JSON document
    Json,
}

impl ConfigFormat {
    /// Picks the format from a file extension, defaulting to TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            Some("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Loads configuration from an optional file, then the environment.
pub struct ConfigLoader {
    path: PathBuf,
    required: bool,
}

impl ConfigLoader {
    /// Creates a loader for a file that must exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
        }
    }

    /// Creates a loader honouring `DRACK_CONFIG`, falling back to an
    /// optional `drack.toml` in the working directory.
    pub fn from_env() -> Self {
        std::env::var(env_keys::CONFIG_PATH).map_or_else(
            |_| Self {
                path: PathBuf::from(DEFAULT_CONFIG_FILE),
                required: false,
            },
            Self::new,
        )
    }

    /// Path this loader reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads, overlays the process environment (including `.env`), and validates.
    pub async fn load(&self) -> Result<Config> {
        if let Ok(path) = dotenv::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }

        let mut config = self.load_file().await?;
        Self::apply_overrides(&mut config, |key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the configuration file, or defaults when an optional file is absent.
    pub async fn load_file(&self) -> Result<Config> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                debug!("Reading configuration from {}", self.path.display());
                Self::parse(&contents, ConfigFormat::from_path(&self.path))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !self.required => {
                Ok(Config::default())
            }
            Err(e) => Err(DrackError::config(format!(
                "cannot read {}: {e}",
                self.path.display()
            ))),
        }
    }

    /// Parses a configuration document.
    pub fn parse(contents: &str, format: ConfigFormat) -> Result<Config> {
        match format {
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| DrackError::Serialization(e.to_string())),
            ConfigFormat::Yaml => {
                serde_yaml::from_str(contents).map_err(|e| DrackError::Serialization(e.to_string()))
            }
            ConfigFormat::Json => {
                serde_json::from_str(contents).map_err(|e| DrackError::Serialization(e.to_string()))
            }
        }
    }

    /// Overlays values from `lookup` (normally the process environment).
    ///
    /// Empty values are ignored so a blank line in `.env` does not wipe a
    /// value set in the file.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(token) = get(env_keys::DISCORD_TOKEN) {
            config.discord.token = token;
        }
        if let Some(raw) = get(env_keys::DISCORD_CLIENT_ID) {
            config.discord.application_id = raw.trim().parse().map_err(|e| {
                DrackError::config(format!("{} must be a numeric ID: {e}", env_keys::DISCORD_CLIENT_ID))
            })?;
        }
        if let Some(raw) = get(env_keys::OWNER_ID) {
            config.discord.owner_id = raw.parse::<UserId>().map_err(|e| {
                DrackError::config(format!("{} must be a numeric ID: {e}", env_keys::OWNER_ID))
            })?;
        }
        if let Some(url) = get(env_keys::POCKETBASE_URL) {
            config.record_store.url = url;
        }
        if let Some(email) = get(env_keys::POCKETBASE_ADMIN_EMAIL) {
            config.record_store.admin_email = email;
        }
        if let Some(password) = get(env_keys::POCKETBASE_ADMIN_PASSWORD) {
            config.record_store.admin_password = password;
        }
        if let Some(collection) = get(env_keys::POCKETBASE_COLLECTION) {
            config.record_store.collection = collection;
        }
        if let Some(level) = get(env_keys::LOG_LEVEL) {
            config.logging.level = level;
        }
        if let Some(format) = get(env_keys::LOG_FORMAT) {
            config.logging.format = format.parse::<LogFormat>()?;
        }
        if let Some(file) = get(env_keys::LOG_FILE) {
            config.logging.file_path = Some(PathBuf::from(file));
        }

        Ok(())
    }
}
