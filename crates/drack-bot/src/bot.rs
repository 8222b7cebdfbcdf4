//! Core bot logic using the Poise framework.

use crate::error::{BotError, BotResult};
use crate::{events, presence};
use drack_commands::{framework_options, Data};
use drack_config::Config;
use drack_store::{PocketBaseStore, RecordStore};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Main bot structure.
pub struct DrackBot {
    config: Arc<Config>,
    store: Arc<dyn RecordStore>,
}

impl DrackBot {
    /// Creates a bot around an already connected record store.
    pub fn new(config: Config, store: Arc<dyn RecordStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Authenticates against PocketBase and checks that it is healthy.
    ///
    /// Authentication failures are fatal; an unhealthy server only warns,
    /// since commands report store failures to their callers.
    pub async fn connect(config: Config) -> BotResult<Self> {
        let store = PocketBaseStore::connect(&config.record_store).await?;
        if !store.health_check().await {
            warn!("Record store health check failed, continuing anyway");
        }
        Ok(Self::new(config, Arc::new(store)))
    }

    /// Shared configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds the framework state the commands run against.
    pub fn data(&self) -> Data {
        Data::new(Arc::clone(&self.config), Arc::clone(&self.store))
    }

    /// Registers commands, connects to the gateway, and runs until shutdown.
    pub async fn start(&self) -> BotResult<()> {
        let data = self.data();
        let rotation = self.config.presence.rotation_interval();

        let options = poise::FrameworkOptions {
            event_handler: |ctx, event, framework, data| {
                Box::pin(events::event_handler(ctx, event, framework, data))
            },
            ..framework_options()
        };

        let framework = poise::Framework::builder()
            .options(options)
            .setup(move |ctx, _ready, framework| {
                Box::pin(async move {
                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                    info!(
                        "Registered {} slash commands",
                        framework.options().commands.len()
                    );

                    if let Some(every) = rotation {
                        presence::spawn_rotation(ctx.clone(), every);
                    }
                    Ok(data)
                })
            })
            .build();

        let mut client = serenity::ClientBuilder::new(
            &self.config.discord.token,
            serenity::GatewayIntents::non_privileged(),
        )
        .framework(framework)
        .await
        .map_err(|e| BotError::Framework(format!("{e:?}")))?;

        let shard_manager = Arc::clone(&client.shard_manager);
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {}", e);
                return;
            }
            info!("Shutting down");
            shard_manager.shutdown_all().await;
        });

        client.start().await?;
        Ok(())
    }
}
