//! Default values for every configuration section.

use crate::schema::*;
use drack_common::{LoggingConfig, UserId};

/// Collection balances are stored in unless configured otherwise.
pub const DEFAULT_COLLECTION: &str = "dk_user_balances";

impl Default for Config {
    fn default() -> Self {
        Self {
            discord: DiscordConfig::default(),
            record_store: RecordStoreConfig::default(),
            logging: LoggingConfig::default(),
            presence: PresenceConfig::default(),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            application_id: 0,
            owner_id: UserId(0),
        }
    }
}

impl Default for RecordStoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            admin_email: String::new(),
            admin_password: String::new(),
            collection: DEFAULT_COLLECTION.to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            rotation_minutes: 5,
        }
    }
}
