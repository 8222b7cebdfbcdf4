//! Balance command.

use crate::descriptor::{Category, CommandDescriptor};
use crate::embeds::{user_author, GOLD};
use crate::framework::{Context, Error};
use crate::invocation::guarded;
use drack_common::{format_number, UserId};
use drack_store::{RecordStore, UserBalance};
use poise::serenity_prelude::{self as serenity, CreateEmbed, CreateEmbedFooter, Timestamp};
use poise::CreateReply;

/// Registry entry for `/balance`.
pub fn descriptor() -> CommandDescriptor {
    CommandDescriptor::new("balance", "Check your balance or another user's balance")
        .category(Category::Economy)
        .cooldown(3)
}

/// Check your balance or another user's balance
#[poise::command(slash_command)]
pub async fn balance(
    ctx: Context<'_>,
    #[description = "The user to check balance for"] user: Option<serenity::User>,
) -> Result<(), Error> {
    guarded(ctx, move || show_balance(ctx, user)).await
}

async fn show_balance(ctx: Context<'_>, user: Option<serenity::User>) -> Result<(), Error> {
    let target = user.as_ref().unwrap_or_else(|| ctx.author());
    let balance = ctx.data().store.get_balance(UserId(target.id.get())).await?;

    let mut embed = CreateEmbed::new()
        .colour(GOLD)
        .author(user_author(target, "Balance"))
        .footer(CreateEmbedFooter::new(format!("User ID: {}", target.id)))
        .timestamp(Timestamp::now());
    for (name, value) in balance_fields(&balance) {
        embed = embed.field(name, value, true);
    }

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Field names and values shown for a balance.
pub fn balance_fields(balance: &UserBalance) -> [(&'static str, String); 3] {
    [
        ("💰 Coins", format_number(balance.coins)),
        ("💎 Gems", format_number(balance.gems)),
        ("🎒 Inventory Items", balance.item_count().to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use drack_store::{InventoryItem, ItemType};

    #[test]
    fn test_balance_fields() {
        let mut balance = UserBalance::new(UserId(1));
        balance.coins = 12_500;
        balance.gems = 40;
        balance.inventory.push(InventoryItem::new("sword", "Sword", 2, ItemType::Weapon));

        let fields = balance_fields(&balance);
        assert_eq!(fields[0], ("💰 Coins", "12,500".to_string()));
        assert_eq!(fields[1], ("💎 Gems", "40".to_string()));
        assert_eq!(fields[2], ("🎒 Inventory Items", "1".to_string()));
    }

    #[test]
    fn test_descriptor() {
        let descriptor = descriptor();
        assert_eq!(descriptor.category, Category::Economy);
        assert_eq!(descriptor.cooldown, 3);
    }
}
