//! Application-wide error types using thiserror.

use drack_common::DrackError;
use drack_store::StoreError;
use poise::serenity_prelude as serenity;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration or logging setup error.
    #[error("Configuration error: {0}")]
    Config(#[from] DrackError),

    /// Discord/Serenity error.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    /// Record store could not be reached at startup.
    #[error("Record store error: {0}")]
    Store(#[from] StoreError),

    /// Poise framework error.
    #[error("Framework error: {0}")]
    Framework(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;
