//! Startup validation of the loaded configuration.

use crate::loader::env_keys;
use crate::schema::Config;
use drack_common::DrackError;
use url::Url;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting every problem at once.
    ///
    /// Missing values are named by the environment variable that supplies
    /// them, since that is how most deployments configure the bot.
    pub fn validate(config: &Config) -> Result<(), DrackError> {
        let mut missing = Vec::new();
        let mut invalid = Vec::new();

        if config.discord.token.trim().is_empty() {
            missing.push(env_keys::DISCORD_TOKEN);
        }
        if config.discord.application_id == 0 {
            missing.push(env_keys::DISCORD_CLIENT_ID);
        }
        if config.discord.owner_id.is_unset() {
            missing.push(env_keys::OWNER_ID);
        }

        let store = &config.record_store;
        if store.url.trim().is_empty() {
            missing.push(env_keys::POCKETBASE_URL);
        } else if let Err(reason) = Self::check_url(&store.url) {
            invalid.push(format!("{}: {reason}", env_keys::POCKETBASE_URL));
        }
        if store.admin_email.trim().is_empty() {
            missing.push(env_keys::POCKETBASE_ADMIN_EMAIL);
        }
        if store.admin_password.is_empty() {
            missing.push(env_keys::POCKETBASE_ADMIN_PASSWORD);
        }
        if store.collection.trim().is_empty() {
            invalid.push(format!("{}: collection name cannot be empty", env_keys::POCKETBASE_COLLECTION));
        }
        if store.timeout_seconds == 0 {
            invalid.push("record_store.timeout_seconds must be greater than 0".to_string());
        }

        if missing.is_empty() && invalid.is_empty() {
            return Ok(());
        }

        let mut problems = Vec::new();
        if !missing.is_empty() {
            problems.push(format!("missing required values: {}", missing.join(", ")));
        }
        problems.extend(invalid);
        Err(DrackError::config(problems.join("; ")))
    }

    fn check_url(raw: &str) -> Result<(), String> {
        let url = Url::parse(raw).map_err(|e| e.to_string())?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(format!("unsupported scheme '{other}'")),
        }
    }
}
