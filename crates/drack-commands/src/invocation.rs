//! The platform side of a command invocation, and its poise implementation.

use crate::embeds::Notice;
use crate::framework::{Context, Error};
use async_trait::async_trait;
use drack_common::UserId;
use poise::serenity_prelude::{CreateInteractionResponseFollowup, Permissions};
use poise::CreateReply;
use std::future::Future;
use std::sync::atomic::Ordering;

/// What the dispatch gate needs to know about, and do with, an invocation.
#[async_trait]
pub trait Invocation: Send + Sync {
    /// Name of the invoked command.
    fn command_name(&self) -> &str;

    /// User who invoked it.
    fn caller(&self) -> UserId;

    /// Whether it was invoked in a server channel.
    fn in_guild(&self) -> bool;

    /// Whether the caller holds every permission in `required`.
    async fn has_permissions(&self, required: Permissions) -> bool;

    /// Whether an initial response has already been sent.
    fn has_replied(&self) -> bool;

    /// Sends the initial response.
    async fn reply(&self, notice: Notice, ephemeral: bool) -> Result<(), Error>;

    /// Sends a follow-up after the initial response.
    async fn follow_up(&self, notice: Notice, ephemeral: bool) -> Result<(), Error>;
}

/// [`Invocation`] over a poise command context.
pub struct PoiseInvocation<'a> {
    ctx: Context<'a>,
}

impl<'a> PoiseInvocation<'a> {
    /// Wraps a context.
    pub const fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Invocation for PoiseInvocation<'_> {
    fn command_name(&self) -> &str {
        &self.ctx.command().name
    }

    fn caller(&self) -> UserId {
        UserId(self.ctx.author().id.get())
    }

    fn in_guild(&self) -> bool {
        self.ctx.guild_id().is_some()
    }

    async fn has_permissions(&self, required: Permissions) -> bool {
        let granted = match self.ctx {
            poise::Context::Application(app) => app
                .interaction
                .member
                .as_ref()
                .and_then(|member| member.permissions),
            poise::Context::Prefix(_) => None,
        };

        // Without resolved member permissions the platform already let the
        // caller see the command.
        granted.map_or(true, |granted| {
            granted.administrator() || granted.contains(required)
        })
    }

    fn has_replied(&self) -> bool {
        match self.ctx {
            poise::Context::Application(app) => app.has_sent_initial_response.load(Ordering::SeqCst),
            poise::Context::Prefix(_) => false,
        }
    }

    async fn reply(&self, notice: Notice, ephemeral: bool) -> Result<(), Error> {
        self.ctx
            .send(CreateReply::default().embed(notice.embed()).ephemeral(ephemeral))
            .await?;
        Ok(())
    }

    async fn follow_up(&self, notice: Notice, ephemeral: bool) -> Result<(), Error> {
        match self.ctx {
            poise::Context::Application(app) => {
                app.interaction
                    .create_followup(
                        self.ctx.http(),
                        CreateInteractionResponseFollowup::new()
                            .embed(notice.embed())
                            .ephemeral(ephemeral),
                    )
                    .await?;
            }
            poise::Context::Prefix(_) => {
                self.ctx.say(notice.render()).await?;
            }
        }
        Ok(())
    }
}

/// Runs a command body through the dispatch gate.
///
/// Every outcome is handled by the gate, so this always returns `Ok` and
/// poise never sees a command error.
pub async fn guarded<F, Fut>(ctx: Context<'_>, body: F) -> Result<(), Error>
where
    F: FnOnce() -> Fut + Send,
    Fut: Future<Output = Result<(), Error>> + Send,
{
    let invocation = PoiseInvocation::new(ctx);
    ctx.data().gate.run(&invocation, body).await;
    Ok(())
}
