//! Main entry point for Drack Bot.

use drack_bot::{BotResult, DrackBot};
use drack_common::{init_logging, LoggingConfig};
use drack_config::ConfigLoader;
use tracing::{error, info};

#[tokio::main]
async fn main() -> BotResult<()> {
    let config = match ConfigLoader::from_env().load().await {
        Ok(config) => config,
        Err(e) => {
            // Logging settings live in the configuration; report with defaults.
            let _ = init_logging(&LoggingConfig::default());
            error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    let _guard = init_logging(&config.logging)?;
    info!(version = env!("CARGO_PKG_VERSION"), "Starting Drack Bot");

    let bot = DrackBot::connect(config).await.map_err(|e| {
        error!("Could not connect to the record store: {}", e);
        e
    })?;

    if let Err(e) = bot.start().await {
        error!("Bot stopped with an error: {}", e);
        return Err(e);
    }

    Ok(())
}
