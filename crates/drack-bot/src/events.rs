//! Gateway event handling.

use crate::presence::Presence;
use drack_commands::{Data, Error};
use poise::serenity_prelude as serenity;
use tracing::{info, warn};

/// Routes gateway events the bot reacts to.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::Ready { data_about_bot } = event {
        on_ready(ctx, data_about_bot, data);
    }
    Ok(())
}

fn on_ready(ctx: &serenity::Context, ready: &serenity::Ready, data: &Data) {
    info!(
        tag = %ready.user.tag(),
        guilds = ready.guilds.len(),
        commands = data.registry.len(),
        "Logged in"
    );

    let application_id = ready.application.id.get();
    if let Some(configured) = application_mismatch(application_id, data.config.discord.application_id) {
        warn!(
            configured,
            actual = application_id,
            "DISCORD_CLIENT_ID does not match the connected application"
        );
    }

    Presence::initial().apply(ctx);
}

/// The configured id when it disagrees with the connected application.
pub fn application_mismatch(actual: u64, configured: u64) -> Option<u64> {
    (actual != configured).then_some(configured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_mismatch() {
        assert_eq!(application_mismatch(10, 10), None);
        assert_eq!(application_mismatch(10, 11), Some(11));
    }
}
