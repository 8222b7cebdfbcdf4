//! Poise framework setup and command registration logic.

use crate::gate::DispatchGate;
use crate::registry::CommandRegistry;
use drack_config::Config;
use drack_store::RecordStore;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Application data accessible in all commands.
pub struct Data {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Descriptors of every registered command.
    pub registry: Arc<CommandRegistry>,
    /// Authorization and cooldown gate.
    pub gate: DispatchGate,
    /// Balance persistence.
    pub store: Arc<dyn RecordStore>,
}

impl Data {
    /// Builds the shared state around the built-in command registry.
    pub fn new(config: Arc<Config>, store: Arc<dyn RecordStore>) -> Self {
        let registry = Arc::new(CommandRegistry::builtin());
        let gate = DispatchGate::new(Arc::clone(&registry), config.discord.owner_id);
        Self {
            config,
            registry,
            gate,
            store,
        }
    }
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Every slash command, in registry order.
pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        crate::balance::balance(),
        crate::daily::daily(),
        crate::weekly::weekly(),
        crate::work::work(),
        crate::leaderboard::leaderboard(),
        crate::inventory::inventory(),
        crate::help::help(),
        crate::ping::ping(),
    ]
}

/// Framework options with all commands and the error handler.
///
/// The event handler is left to the caller.
pub fn framework_options() -> poise::FrameworkOptions<Data, Error> {
    poise::FrameworkOptions {
        commands: commands(),
        on_error: |error| Box::pin(on_error(error)),
        ..Default::default()
    }
}

/// Handles errors that escape the dispatch gate.
async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::UnknownInteraction { interaction, .. } => {
            debug!("Ignoring interaction for unknown command '{}'", interaction.data.name);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Command '{}' failed outside the gate: {}", ctx.command().name, error);
        }
        poise::FrameworkError::Setup { error, .. } => {
            error!("Framework setup failed: {}", error);
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                warn!("Error while handling framework error: {}", e);
            }
        }
    }
}
