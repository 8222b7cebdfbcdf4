//! Daily reward command.

use crate::descriptor::{Category, CommandDescriptor};
use crate::framework::{Context, Error};
use crate::invocation::guarded;
use crate::rewards::{claim, claim_embed, Reward};
use chrono::Utc;
use drack_common::UserId;
use poise::CreateReply;

/// Registry entry for `/daily`.
pub fn descriptor() -> CommandDescriptor {
    CommandDescriptor::new("daily", "Claim your daily reward")
        .category(Category::Economy)
        .cooldown(5)
}

/// Claim your daily reward
#[poise::command(slash_command)]
pub async fn daily(ctx: Context<'_>) -> Result<(), Error> {
    guarded(ctx, move || claim_daily(ctx)).await
}

async fn claim_daily(ctx: Context<'_>) -> Result<(), Error> {
    let user = UserId(ctx.author().id.get());
    let outcome = claim(ctx.data().store.as_ref(), user, Reward::Daily, Utc::now()).await?;

    ctx.send(CreateReply::default().embed(claim_embed(Reward::Daily, &outcome)))
        .await?;
    Ok(())
}
