//! Weekly reward command.

use crate::descriptor::{Category, CommandDescriptor};
use crate::framework::{Context, Error};
use crate::invocation::guarded;
use crate::rewards::{claim, claim_embed, Reward};
use chrono::Utc;
use drack_common::UserId;
use poise::CreateReply;

/// Registry entry for `/weekly`.
pub fn descriptor() -> CommandDescriptor {
    CommandDescriptor::new("weekly", "Claim your weekly reward")
        .category(Category::Economy)
        .cooldown(5)
}

/// Claim your weekly reward
#[poise::command(slash_command)]
pub async fn weekly(ctx: Context<'_>) -> Result<(), Error> {
    guarded(ctx, move || claim_weekly(ctx)).await
}

async fn claim_weekly(ctx: Context<'_>) -> Result<(), Error> {
    let user = UserId(ctx.author().id.get());
    let outcome = claim(ctx.data().store.as_ref(), user, Reward::Weekly, Utc::now()).await?;

    ctx.send(CreateReply::default().embed(claim_embed(Reward::Weekly, &outcome)))
        .await?;
    Ok(())
}
