//! Inventory command.

use crate::descriptor::{Category, CommandDescriptor};
use crate::embeds::{user_author, BLUE, ORANGE};
use crate::framework::{Context, Error};
use crate::invocation::guarded;
use drack_common::UserId;
use drack_store::{group_by_type, InventoryItem, RecordStore};
use poise::serenity_prelude::{self as serenity, CreateEmbed, CreateEmbedFooter, Timestamp};
use poise::CreateReply;

/// Registry entry for `/inventory`.
pub fn descriptor() -> CommandDescriptor {
    CommandDescriptor::new("inventory", "View your inventory or another user's inventory")
        .category(Category::Economy)
        .cooldown(3)
}

/// View your inventory or another user's inventory
#[poise::command(slash_command)]
pub async fn inventory(
    ctx: Context<'_>,
    #[description = "The user to check inventory for"] user: Option<serenity::User>,
) -> Result<(), Error> {
    guarded(ctx, move || show_inventory(ctx, user)).await
}

async fn show_inventory(ctx: Context<'_>, user: Option<serenity::User>) -> Result<(), Error> {
    let target = user.as_ref().unwrap_or_else(|| ctx.author());
    let balance = ctx.data().store.get_balance(UserId(target.id.get())).await?;
    let author = user_author(target, "Inventory");

    let embed = if balance.inventory.is_empty() {
        CreateEmbed::new()
            .colour(ORANGE)
            .author(author)
            .description("🎒 The inventory is empty.")
            .footer(CreateEmbedFooter::new("Use /shop to buy items"))
    } else {
        let mut embed = CreateEmbed::new()
            .colour(BLUE)
            .author(author)
            .description(format!("Total items: **{}**\n", balance.item_count()))
            .timestamp(Timestamp::now());
        for (name, value) in inventory_fields(&balance.inventory) {
            embed = embed.field(name, value, true);
        }
        embed
    };

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// One embed field per item type: a titled list of `**name** xN` lines.
pub fn inventory_fields(inventory: &[InventoryItem]) -> Vec<(String, String)> {
    group_by_type(inventory)
        .into_iter()
        .map(|(item_type, items)| {
            let lines: Vec<String> = items
                .iter()
                .map(|item| format!("**{}** x{}", item.name, item.quantity))
                .collect();
            (
                format!("{} {}", item_type.emoji(), item_type.label()),
                lines.join("\n"),
            )
        })
        .collect()
}
