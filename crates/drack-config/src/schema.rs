//! Configuration schema definitions using serde.

use drack_common::{DrackError, LoggingConfig, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Main configuration structure for Drack Bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discord configuration.
    pub discord: DiscordConfig,
    /// Record store (PocketBase) configuration.
    pub record_store: RecordStoreConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Presence rotation configuration.
    pub presence: PresenceConfig,
}

/// Discord bot configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Discord bot token.
    pub token: String,
    /// Application (client) ID the slash commands are registered under.
    pub application_id: u64,
    /// User allowed to run owner-only commands.
    pub owner_id: UserId,
}

/// PocketBase connection configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordStoreConfig {
    /// Base URL of the PocketBase server.
    pub url: String,
    /// Superuser e-mail used to authenticate.
    pub admin_email: String,
    /// Superuser password used to authenticate.
    pub admin_password: String,
    /// Collection holding user balances.
    pub collection: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

/// Bot presence configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    /// Minutes between presence changes, 0 disables rotation.
    pub rotation_minutes: u64,
}

impl RecordStoreConfig {
    /// Request timeout as a [`Duration`].
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl PresenceConfig {
    /// Rotation interval, `None` when rotation is disabled.
    pub const fn rotation_interval(&self) -> Option<Duration> {
        if self.rotation_minutes == 0 {
            None
        } else {
            Some(Duration::from_secs(self.rotation_minutes * 60))
        }
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), DrackError> {
        crate::validator::ConfigValidator::validate(self)
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &redact(&self.token))
            .field("application_id", &self.application_id)
            .field("owner_id", &self.owner_id)
            .finish()
    }
}

impl fmt::Debug for RecordStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStoreConfig")
            .field("url", &self.url)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &redact(&self.admin_password))
            .field("collection", &self.collection)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}
