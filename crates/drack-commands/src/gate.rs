//! The dispatch gate: authorization, cooldowns and failure reporting around
//! every command invocation.
//!
//! Each invocation moves through resolve, authorize, rate-limit, execute,
//! commit and report, stopping at the first step that rejects it. A rejected
//! invocation gets exactly one reply and never writes a cooldown.

use crate::cooldown::CooldownStore;
use crate::descriptor::CommandDescriptor;
use crate::embeds::Notice;
use crate::framework::Error;
use crate::invocation::Invocation;
use crate::registry::CommandRegistry;
use drack_common::UserId;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Shown to the caller when a command body fails.
pub const FAILURE_MESSAGE: &str = "An error occurred while executing this command.";

/// Why an invocation was refused before running.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The command is restricted to the owner.
    #[error("This command can only be used by the bot owner.")]
    OwnerOnly,

    /// The command is restricted to servers.
    #[error("This command can only be used in servers.")]
    GuildOnly,

    /// The caller lacks a required permission.
    #[error("You don't have permission to use this command.")]
    MissingPermissions,

    /// The caller used the command too recently.
    #[error("Please wait {remaining_seconds} second(s) before using this command again.")]
    OnCooldown {
        /// Whole seconds until the command is available again.
        remaining_seconds: u64,
    },
}

impl Rejection {
    /// The notice sent to the caller.
    pub fn notice(&self) -> Notice {
        match self {
            Self::OnCooldown { .. } => Notice::warning(self.to_string()),
            _ => Notice::error(self.to_string()),
        }
    }
}

/// Outcome of a gated invocation.
#[derive(Debug)]
pub enum Dispatch {
    /// No descriptor is registered under the command name.
    Ignored,
    /// Refused before running.
    Rejected(Rejection),
    /// Ran successfully.
    Completed,
    /// The command body returned an error.
    Failed(Error),
}

impl Dispatch {
    /// Whether the command body ran to completion.
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// The rejection, if the invocation was refused.
    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

/// Decides whether an invocation may run, and records cooldowns after it does.
#[derive(Debug, Clone)]
pub struct DispatchGate {
    registry: Arc<CommandRegistry>,
    cooldowns: CooldownStore,
    owner: UserId,
}

impl DispatchGate {
    /// Creates a gate with its own cooldown store.
    pub fn new(registry: Arc<CommandRegistry>, owner: UserId) -> Self {
        Self::with_cooldowns(registry, CooldownStore::new(), owner)
    }

    /// Creates a gate over an existing cooldown store.
    pub const fn with_cooldowns(
        registry: Arc<CommandRegistry>,
        cooldowns: CooldownStore,
        owner: UserId,
    ) -> Self {
        Self {
            registry,
            cooldowns,
            owner,
        }
    }

    /// The cooldown store consulted by this gate.
    pub const fn cooldowns(&self) -> &CooldownStore {
        &self.cooldowns
    }

    /// The registry commands are resolved against.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Runs `execute` for the invocation if it passes every check.
    pub async fn run<I, F, Fut>(&self, invocation: &I, execute: F) -> Dispatch
    where
        I: Invocation + ?Sized,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<(), Error>> + Send,
    {
        let command = invocation.command_name();
        let user = invocation.caller();
        let span = info_span!(
            "dispatch",
            command,
            user = %user,
            invocation = %Uuid::new_v4(),
        );

        async move {
            let Some(descriptor) = self.registry.resolve(command) else {
                debug!("Ignoring unregistered command");
                return Dispatch::Ignored;
            };

            if let Err(rejection) = self.admit(descriptor, invocation).await {
                debug!(reason = %rejection, "Invocation rejected");
                Self::notify(invocation, rejection.notice()).await;
                return Dispatch::Rejected(rejection);
            }

            match execute().await {
                Ok(()) => {
                    if descriptor.cooldown > 0 {
                        self.cooldowns
                            .set_cooldown(command, user, descriptor.cooldown_duration());
                    }
                    info!(in_guild = invocation.in_guild(), "Command completed");
                    Dispatch::Completed
                }
                Err(cause) => {
                    error!(command, error = %cause, "Command failed");
                    Self::notify(invocation, Notice::error(FAILURE_MESSAGE)).await;
                    Dispatch::Failed(cause)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Authorization, then rate limiting.
    async fn admit<I>(&self, descriptor: &CommandDescriptor, invocation: &I) -> Result<(), Rejection>
    where
        I: Invocation + ?Sized,
    {
        Self::authorize(descriptor, invocation, self.owner).await?;
        self.rate_limit(descriptor, invocation.caller())
    }

    async fn authorize<I>(
        descriptor: &CommandDescriptor,
        invocation: &I,
        owner: UserId,
    ) -> Result<(), Rejection>
    where
        I: Invocation + ?Sized,
    {
        if descriptor.owner_only && invocation.caller() != owner {
            return Err(Rejection::OwnerOnly);
        }
        if descriptor.guild_only && !invocation.in_guild() {
            return Err(Rejection::GuildOnly);
        }
        if !descriptor.permissions.is_empty()
            && invocation.in_guild()
            && !invocation.has_permissions(descriptor.permissions).await
        {
            return Err(Rejection::MissingPermissions);
        }
        Ok(())
    }

    fn rate_limit(&self, descriptor: &CommandDescriptor, user: UserId) -> Result<(), Rejection> {
        if descriptor.cooldown == 0 {
            return Ok(());
        }
        match self.cooldowns.remaining_seconds(&descriptor.name, user) {
            0 => Ok(()),
            remaining_seconds => Err(Rejection::OnCooldown { remaining_seconds }),
        }
    }

    /// Sends an ephemeral notice, as a follow-up if the command already replied.
    async fn notify<I>(invocation: &I, notice: Notice)
    where
        I: Invocation + ?Sized,
    {
        let result = if invocation.has_replied() {
            invocation.follow_up(notice, true).await
        } else {
            invocation.reply(notice, true).await
        };

        if let Err(e) = result {
            warn!(error = %e, "Failed to deliver notice");
        }
    }
}
