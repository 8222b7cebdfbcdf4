//! Periodic rewards shared by `/daily` and `/weekly`.

use crate::embeds::{GREEN, ORANGE};
use chrono::{DateTime, Utc};
use drack_common::{can_claim, claim_remaining, format_duration, format_number, UserId};
use drack_store::{BalanceUpdate, RecordStore, StoreResult, UserBalance};
use poise::serenity_prelude::{CreateEmbed, CreateEmbedFooter, Timestamp};
use std::time::Duration;
use tracing::info;

/// A reward that can be claimed once per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reward {
    /// Every 24 hours.
    Daily,
    /// Every 7 days.
    Weekly,
}

impl Reward {
    /// Lowercase name, as used in messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }

    /// Time between claims.
    pub fn window(self) -> chrono::Duration {
        match self {
            Self::Daily => chrono::Duration::hours(24),
            Self::Weekly => chrono::Duration::days(7),
        }
    }

    /// Coins granted per claim.
    pub const fn coins(self) -> i64 {
        match self {
            Self::Daily => 100,
            Self::Weekly => 750,
        }
    }

    /// Gems granted per claim.
    pub const fn gems(self) -> i64 {
        match self {
            Self::Daily => 5,
            Self::Weekly => 25,
        }
    }

    const fn last_claim(self, balance: &UserBalance) -> Option<DateTime<Utc>> {
        match self {
            Self::Daily => balance.last_daily,
            Self::Weekly => balance.last_weekly,
        }
    }

    fn stamp(self, update: BalanceUpdate, now: DateTime<Utc>) -> BalanceUpdate {
        match self {
            Self::Daily => update.last_daily(now),
            Self::Weekly => update.last_weekly(now),
        }
    }

    const fn reset_note(self) -> &'static str {
        match self {
            Self::Daily => "Daily rewards reset every 24 hours",
            Self::Weekly => "Weekly rewards reset every 7 days",
        }
    }

    const fn come_back_note(self) -> &'static str {
        match self {
            Self::Daily => "Come back tomorrow for more rewards!",
            Self::Weekly => "Come back next week for more rewards!",
        }
    }

    const fn title(self) -> &'static str {
        match self {
            Self::Daily => "✅ Daily Reward Claimed!",
            Self::Weekly => "✅ Weekly Reward Claimed!",
        }
    }
}

/// Result of a claim attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// Reward granted; the balance after the grant.
    Claimed(UserBalance),
    /// Claimed too recently; time until the next claim.
    TooSoon(Duration),
}

/// Grants the reward if the user's window has passed.
///
/// Coins, gems and the claim stamp are written in a single update.
pub async fn claim(
    store: &dyn RecordStore,
    user: UserId,
    reward: Reward,
    now: DateTime<Utc>,
) -> StoreResult<ClaimOutcome> {
    let balance = store.get_balance(user).await?;
    let last = reward.last_claim(&balance);

    if !can_claim(last, reward.window(), now) {
        return Ok(ClaimOutcome::TooSoon(claim_remaining(last, reward.window(), now)));
    }

    let update = reward.stamp(
        BalanceUpdate::default()
            .coins(balance.coins + reward.coins())
            .gems(balance.gems + reward.gems()),
        now,
    );
    let balance = store.update_balance(user, update).await?;
    info!(user = %user, reward = reward.name(), "Reward claimed");
    Ok(ClaimOutcome::Claimed(balance))
}

/// Embed describing a claim outcome.
pub fn claim_embed(reward: Reward, outcome: &ClaimOutcome) -> CreateEmbed {
    match outcome {
        ClaimOutcome::TooSoon(remaining) => CreateEmbed::new()
            .colour(ORANGE)
            .description(too_soon_text(reward, *remaining))
            .footer(CreateEmbedFooter::new(reward.reset_note())),
        ClaimOutcome::Claimed(balance) => CreateEmbed::new()
            .colour(GREEN)
            .title(reward.title())
            .description(format!("You received your {} reward!", reward.name()))
            .field("💰 Coins", format!("+{}", format_number(reward.coins())), true)
            .field("💎 Gems", format!("+{}", format_number(reward.gems())), true)
            .field(
                "💼 Your Balance",
                format!(
                    "{} coins, {} gems",
                    format_number(balance.coins),
                    format_number(balance.gems)
                ),
                false,
            )
            .footer(CreateEmbedFooter::new(reward.come_back_note()))
            .timestamp(Timestamp::now()),
    }
}

/// Message shown when a reward is not ready yet.
pub fn too_soon_text(reward: Reward, remaining: Duration) -> String {
    format!(
        "⏰ You've already claimed your {} reward!\n\nCome back in **{}**",
        reward.name(),
        format_duration(remaining)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use drack_common::test_utils::{discord_fixtures::test_user_id, mock_timestamp};
    use drack_store::MemoryStore;

    #[tokio::test]
    async fn test_daily_claim_grants_and_stamps() {
        let store = MemoryStore::new();
        let user = test_user_id();
        let now = mock_timestamp(2024, 3, 1, 9, 0, 0);

        let ClaimOutcome::Claimed(balance) = claim(&store, user, Reward::Daily, now).await.unwrap() else {
            panic!("first claim should succeed");
        };
        assert_eq!(balance.coins, 100);
        assert_eq!(balance.gems, 5);
        assert_eq!(balance.last_daily, Some(now));
        assert!(balance.last_weekly.is_none());
    }

    #[tokio::test]
    async fn test_second_claim_reports_remaining_time() {
        let store = MemoryStore::new();
        let user = test_user_id();
        let now = mock_timestamp(2024, 3, 1, 9, 0, 0);
        claim(&store, user, Reward::Daily, now).await.unwrap();

        let later = now + chrono::Duration::minutes(1);
        let outcome = claim(&store, user, Reward::Daily, later).await.unwrap();
        assert_eq!(outcome, ClaimOutcome::TooSoon(Duration::from_secs(86_340)));
        assert_eq!(
            too_soon_text(Reward::Daily, Duration::from_secs(86_340)),
            "⏰ You've already claimed your daily reward!\n\nCome back in **23 hours, 59 minutes**"
        );

        let balance = store.get_balance(user).await.unwrap();
        assert_eq!(balance.coins, 100, "nothing granted on a refused claim");
    }

    #[tokio::test]
    async fn test_daily_and_weekly_windows_are_independent() {
        let store = MemoryStore::new();
        let user = test_user_id();
        let now = mock_timestamp(2024, 3, 1, 9, 0, 0);

        claim(&store, user, Reward::Daily, now).await.unwrap();
        let outcome = claim(&store, user, Reward::Weekly, now).await.unwrap();
        let ClaimOutcome::Claimed(balance) = outcome else {
            panic!("weekly should not be blocked by daily");
        };
        assert_eq!(balance.coins, 850);
        assert_eq!(balance.gems, 30);

        let next_day = now + chrono::Duration::hours(24);
        assert!(matches!(
            claim(&store, user, Reward::Daily, next_day).await.unwrap(),
            ClaimOutcome::Claimed(_)
        ));
        assert!(matches!(
            claim(&store, user, Reward::Weekly, next_day).await.unwrap(),
            ClaimOutcome::TooSoon(_)
        ));
    }

    #[test]
    fn test_reward_table() {
        assert_eq!(Reward::Daily.window(), chrono::Duration::hours(24));
        assert_eq!(Reward::Weekly.window(), chrono::Duration::hours(168));
        assert_eq!(Reward::Weekly.coins(), 750);
        assert_eq!(Reward::Weekly.gems(), 25);
    }
}
