//! Leaderboard command.

use crate::descriptor::{Category, CommandDescriptor};
use crate::embeds::{GOLD, ORANGE};
use crate::framework::{Context, Error};
use crate::invocation::guarded;
use drack_common::{format_number, truncate_string, UserId};
use drack_store::{RecordStore, UserBalance};
use futures::future::join_all;
use poise::serenity_prelude::{self as serenity, CreateEmbed, CreateEmbedFooter, Timestamp};
use poise::CreateReply;
use tracing::debug;

/// Entries shown when no limit is given.
pub const DEFAULT_LIMIT: usize = 10;

/// Largest accepted limit.
pub const MAX_LIMIT: usize = 25;

/// Shown for users the platform cannot resolve.
pub const UNKNOWN_USER: &str = "Unknown User";

/// Display names longer than this are shortened.
pub const MAX_NAME_CHARS: usize = 32;

/// Registry entry for `/leaderboard`.
pub fn descriptor() -> CommandDescriptor {
    CommandDescriptor::new("leaderboard", "View the richest users")
        .category(Category::Economy)
        .cooldown(5)
}

/// View the richest users
#[poise::command(slash_command)]
pub async fn leaderboard(
    ctx: Context<'_>,
    #[description = "Number of users to show (1-25)"]
    #[min = 1]
    #[max = 25]
    limit: Option<u32>,
) -> Result<(), Error> {
    guarded(ctx, move || show_leaderboard(ctx, limit)).await
}

async fn show_leaderboard(ctx: Context<'_>, limit: Option<u32>) -> Result<(), Error> {
    let limit = effective_limit(limit);
    let store = ctx.data().store.as_ref();
    let top = store.get_top_users(limit).await?;

    if top.is_empty() {
        ctx.send(
            CreateReply::default().embed(
                CreateEmbed::new()
                    .colour(ORANGE)
                    .description("📊 No users found in the leaderboard."),
            ),
        )
        .await?;
        return Ok(());
    }

    let names = join_all(top.iter().map(|balance| display_name(ctx, balance.user_id))).await;
    let lines: Vec<String> = top
        .iter()
        .zip(&names)
        .enumerate()
        .map(|(index, (balance, name))| standing_line(index, name, balance.coins))
        .collect();

    let mut embed = CreateEmbed::new()
        .colour(GOLD)
        .title("🏆 Leaderboard - Top Users")
        .description(lines.join("\n"))
        .footer(CreateEmbedFooter::new(format!("Showing top {} users", top.len())))
        .timestamp(Timestamp::now());

    let caller = UserId(ctx.author().id.get());
    let everyone = store.get_all_balances().await?;
    if let Some(position) = caller_position(&everyone, caller).filter(|&position| position > limit) {
        let coins = everyone[position - 1].coins;
        embed = embed.field(
            "Your Position",
            format!("#{position} - 💰 {} coins", format_number(coins)),
            false,
        );
    }

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Username for a stored user id, or [`UNKNOWN_USER`].
async fn display_name(ctx: Context<'_>, user: UserId) -> String {
    if user.is_unset() {
        return UNKNOWN_USER.to_string();
    }
    match serenity::UserId::new(user.get()).to_user(ctx.serenity_context()).await {
        Ok(found) => found.name,
        Err(e) => {
            debug!(user = %user, "Could not resolve user: {}", e);
            UNKNOWN_USER.to_string()
        }
    }
}

/// Clamps the requested limit to `1..=MAX_LIMIT`.
pub fn effective_limit(requested: Option<u32>) -> usize {
    requested
        .and_then(|limit| usize::try_from(limit).ok())
        .unwrap_or(DEFAULT_LIMIT)
        .clamp(1, MAX_LIMIT)
}

/// Medal for the top three, `n.` after that. `index` is zero-based.
pub fn medal(index: usize) -> String {
    match index {
        0 => "🥇".to_string(),
        1 => "🥈".to_string(),
        2 => "🥉".to_string(),
        n => format!("{}.", n + 1),
    }
}

/// One leaderboard line.
pub fn standing_line(index: usize, name: &str, coins: i64) -> String {
    format!(
        "{} **{}** - 💰 {} coins",
        medal(index),
        truncate_string(name, MAX_NAME_CHARS),
        format_number(coins)
    )
}

/// One-based position of `user` in a ranking sorted richest first.
pub fn caller_position(ranking: &[UserBalance], user: UserId) -> Option<usize> {
    ranking
        .iter()
        .position(|balance| balance.user_id == user)
        .map(|index| index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use drack_common::test_utils::discord_fixtures::test_user_ids;

    #[test]
    fn test_effective_limit() {
        assert_eq!(effective_limit(None), 10);
        assert_eq!(effective_limit(Some(3)), 3);
        assert_eq!(effective_limit(Some(0)), 1);
        assert_eq!(effective_limit(Some(99)), 25);
    }

    #[test]
    fn test_medals_and_lines() {
        assert_eq!(medal(0), "🥇");
        assert_eq!(medal(2), "🥉");
        assert_eq!(medal(3), "4.");
        assert_eq!(
            standing_line(0, "alice", 12_345),
            "🥇 **alice** - 💰 12,345 coins"
        );
        assert_eq!(standing_line(9, UNKNOWN_USER, 0), "10. **Unknown User** - 💰 0 coins");

        let long = "x".repeat(40);
        let line = standing_line(3, &long, 1);
        assert!(line.contains(&format!("**{}...**", "x".repeat(MAX_NAME_CHARS - 3))));
    }

    #[test]
    fn test_caller_position() {
        let ids = test_user_ids(4);
        let ranking: Vec<UserBalance> = ids.iter().map(|&id| UserBalance::new(id)).collect();

        assert_eq!(caller_position(&ranking, ids[0]), Some(1));
        assert_eq!(caller_position(&ranking, ids[3]), Some(4));
        assert_eq!(caller_position(&ranking[..2], ids[3]), None);
    }
}
