//! Help command listing the registry.

use crate::descriptor::{Category, CommandDescriptor};
use crate::embeds::{Notice, BLUE};
use crate::framework::{Context, Error};
use crate::invocation::guarded;
use crate::registry::CommandRegistry;
use poise::serenity_prelude::{CreateEmbed, CreateEmbedFooter, Timestamp};
use poise::CreateReply;

/// Registry entry for `/help`.
pub fn descriptor() -> CommandDescriptor {
    CommandDescriptor::new("help", "Show all available commands")
        .category(Category::Utility)
        .cooldown(5)
}

/// Show all available commands
#[poise::command(slash_command)]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Get detailed help for a specific command"] command: Option<String>,
) -> Result<(), Error> {
    guarded(ctx, move || show_help(ctx, command)).await
}

async fn show_help(ctx: Context<'_>, command: Option<String>) -> Result<(), Error> {
    let registry = ctx.data().registry.as_ref();

    let reply = match command.as_deref().map(str::trim) {
        None | Some("") => CreateReply::default().embed(overview_embed(registry)),
        Some(name) => match registry.resolve(name.trim_start_matches('/')) {
            Some(descriptor) => CreateReply::default().embed(details_embed(descriptor)),
            None => CreateReply::default()
                .embed(Notice::error(format!("Command `{name}` not found.")).embed())
                .ephemeral(true),
        },
    };

    ctx.send(reply).await?;
    Ok(())
}

fn overview_embed(registry: &CommandRegistry) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .colour(BLUE)
        .title("📚 Command Help")
        .description(
            "Here are all available commands. Use `/help <command>` for detailed information about a specific command.",
        )
        .footer(CreateEmbedFooter::new(format!(
            "Total commands: {} | Use /help <command> for details",
            registry.len()
        )))
        .timestamp(Timestamp::now());

    for (name, value) in category_fields(registry) {
        embed = embed.field(name, value, false);
    }
    embed
}

fn details_embed(descriptor: &CommandDescriptor) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .colour(BLUE)
        .title(format!("📖 Command: /{}", descriptor.name))
        .description(&descriptor.description);

    for (name, value, inline) in detail_fields(descriptor) {
        embed = embed.field(name, value, inline);
    }
    embed
}

/// One field per category listing its commands.
pub fn category_fields(registry: &CommandRegistry) -> Vec<(String, String)> {
    registry
        .by_category()
        .into_iter()
        .map(|(category, commands)| {
            let lines: Vec<String> = commands
                .iter()
                .map(|command| format!("`/{}` - {}", command.name, command.description))
                .collect();
            (
                format!("{} {}", category.emoji(), category.label()),
                lines.join("\n"),
            )
        })
        .collect()
}

/// Fields describing one command's rules.
pub fn detail_fields(descriptor: &CommandDescriptor) -> Vec<(&'static str, String, bool)> {
    let mut fields = vec![
        ("📁 Category", descriptor.category.to_string(), true),
        ("⏱️ Cooldown", format!("{} seconds", descriptor.cooldown), true),
    ];
    if descriptor.owner_only {
        fields.push(("👑 Owner Only", "Yes".to_string(), true));
    }
    if descriptor.guild_only {
        fields.push(("🏠 Server Only", "Yes".to_string(), true));
    }
    if !descriptor.permissions.is_empty() {
        fields.push((
            "🔒 Required Permissions",
            descriptor.permission_names().join(", "),
            false,
        ));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use poise::serenity_prelude::Permissions;

    #[test]
    fn test_category_fields_for_builtin_registry() {
        let fields = category_fields(&CommandRegistry::builtin());

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].0, "💰 Economy");
        assert!(fields[0].1.starts_with("`/balance` - Check your balance"));
        assert_eq!(fields[1].0, "🛠️ Utility");
        assert!(fields[1].1.contains("`/ping` - "));
    }

    #[test]
    fn test_detail_fields_plain_command() {
        let fields = detail_fields(&descriptor());
        assert_eq!(
            fields,
            vec![
                ("📁 Category", "utility".to_string(), true),
                ("⏱️ Cooldown", "5 seconds".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_detail_fields_restricted_command() {
        let restricted = CommandDescriptor::new("ban", "Ban a member")
            .category(Category::General)
            .owner_only()
            .guild_only()
            .permissions(Permissions::BAN_MEMBERS | Permissions::KICK_MEMBERS);

        let fields = detail_fields(&restricted);
        let names: Vec<_> = fields.iter().map(|(name, _, _)| *name).collect();
        assert_eq!(
            names,
            vec!["📁 Category", "⏱️ Cooldown", "👑 Owner Only", "🏠 Server Only", "🔒 Required Permissions"]
        );
        assert!(fields[4].1.contains("Ban Members"));
        assert!(fields[4].1.contains("Kick Members"));
    }
}
