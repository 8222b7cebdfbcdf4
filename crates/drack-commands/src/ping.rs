//! Latency check.

use crate::descriptor::{Category, CommandDescriptor};
use crate::embeds::{GREEN, RED, YELLOW};
use crate::framework::{Context, Error};
use crate::invocation::guarded;
use poise::serenity_prelude::{Colour, CreateEmbed, Timestamp};
use poise::CreateReply;
use std::time::Instant;

/// Registry entry for `/ping`.
pub fn descriptor() -> CommandDescriptor {
    CommandDescriptor::new("ping", "Check the bot's latency")
        .category(Category::Utility)
        .cooldown(5)
}

/// Check the bot's latency
#[poise::command(slash_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    guarded(ctx, move || measure(ctx)).await
}

async fn measure(ctx: Context<'_>) -> Result<(), Error> {
    let started = Instant::now();
    let handle = ctx.say("🏓 Pinging...").await?;
    let roundtrip = started.elapsed().as_millis();
    let gateway = ctx.ping().await.as_millis();

    let embed = CreateEmbed::new()
        .colour(latency_colour(roundtrip))
        .title("🏓 Pong!")
        .field("📶 Roundtrip Latency", format!("{roundtrip}ms"), true)
        .field("💓 WebSocket Latency", format!("{gateway}ms"), true)
        .timestamp(Timestamp::now());

    handle
        .edit(ctx, CreateReply::default().content("").embed(embed))
        .await?;
    Ok(())
}

/// Green under 100ms, yellow under 200ms, red otherwise.
pub const fn latency_colour(millis: u128) -> Colour {
    if millis < 100 {
        GREEN
    } else if millis < 200 {
        YELLOW
    } else {
        RED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_bands() {
        assert_eq!(latency_colour(0), GREEN);
        assert_eq!(latency_colour(99), GREEN);
        assert_eq!(latency_colour(100), YELLOW);
        assert_eq!(latency_colour(199), YELLOW);
        assert_eq!(latency_colour(200), RED);
    }
}
