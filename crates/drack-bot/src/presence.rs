//! Rotating bot presence.

use poise::serenity_prelude::{self as serenity, ActivityData, OnlineStatus};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// A presence the bot can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence {
    /// "Playing ..."
    Playing(String),
    /// "Watching ..."
    Watching(String),
    /// "Listening to ..."
    Listening(String),
}

impl Presence {
    /// Presence shown right after connecting.
    pub fn initial() -> Self {
        Self::Playing("RPG Adventure".to_string())
    }

    /// Every presence in the rotation.
    pub fn rotation(guild_count: usize) -> [Self; 3] {
        [
            Self::initial(),
            Self::Watching(format!("{guild_count} servers")),
            Self::Listening("/help for commands".to_string()),
        ]
    }

    /// Picks a presence from the rotation at random.
    pub fn pick(rng: &mut fastrand::Rng, guild_count: usize) -> Self {
        let mut rotation = Self::rotation(guild_count);
        let index = rng.usize(..rotation.len());
        std::mem::replace(&mut rotation[index], Self::initial())
    }

    /// The gateway activity for this presence.
    pub fn activity(&self) -> ActivityData {
        match self {
            Self::Playing(name) => ActivityData::playing(name),
            Self::Watching(name) => ActivityData::watching(name),
            Self::Listening(name) => ActivityData::listening(name),
        }
    }

    /// Shows the presence.
    pub fn apply(&self, ctx: &serenity::Context) {
        ctx.set_presence(Some(self.activity()), OnlineStatus::Online);
    }
}

/// Changes the presence every `every` until the process exits.
pub fn spawn_rotation(ctx: serenity::Context, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        let mut rng = fastrand::Rng::new();

        // The first tick completes immediately; the initial presence is set on ready.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let presence = Presence::pick(&mut rng, ctx.cache.guild_count());
            debug!(?presence, "Rotating presence");
            presence.apply(&ctx);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_mentions_guild_count() {
        let rotation = Presence::rotation(42);
        assert_eq!(rotation[0], Presence::Playing("RPG Adventure".to_string()));
        assert_eq!(rotation[1], Presence::Watching("42 servers".to_string()));
        assert_eq!(rotation[2], Presence::Listening("/help for commands".to_string()));
    }

    #[test]
    fn test_pick_covers_rotation() {
        let mut rng = fastrand::Rng::with_seed(3);
        let rotation = Presence::rotation(7);
        let mut seen = [false; 3];

        for _ in 0..100 {
            let picked = Presence::pick(&mut rng, 7);
            let index = rotation.iter().position(|p| *p == picked).unwrap();
            seen[index] = true;
        }
        assert_eq!(seen, [true; 3]);
    }
}
