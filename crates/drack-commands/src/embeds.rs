//! Embed colours and short notices shared by the commands.

use poise::serenity_prelude::{Colour, CreateEmbed, CreateEmbedAuthor, User};

/// Balance and leaderboard embeds.
pub const GOLD: Colour = Colour(0x00F1_C40F);
/// Successful claims and fast pings.
pub const GREEN: Colour = Colour(0x0057_F287);
/// Errors and slow pings.
pub const RED: Colour = Colour(0x00ED_4245);
/// Rate limits and "come back later".
pub const ORANGE: Colour = Colour(0x00E6_7E22);
/// Informational embeds.
pub const BLUE: Colour = Colour(0x0034_98DB);
/// Middling pings.
pub const YELLOW: Colour = Colour(0x00FE_E75C);

/// How a notice is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Something went wrong or was refused.
    Error,
    /// The request was fine but has to wait.
    Warning,
    /// Plain information.
    Info,
}

impl Tone {
    /// Embed colour for the tone.
    pub const fn colour(self) -> Colour {
        match self {
            Self::Error => RED,
            Self::Warning => ORANGE,
            Self::Info => BLUE,
        }
    }

    /// Emoji prefixed to the text.
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Error => "❌",
            Self::Warning => "⏰",
            Self::Info => "ℹ️",
        }
    }
}

/// A one-line message rendered as a coloured embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Presentation.
    pub tone: Tone,
    /// Message text, without the emoji.
    pub text: String,
}

impl Notice {
    /// An error notice.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Error,
            text: text.into(),
        }
    }

    /// A warning notice.
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Warning,
            text: text.into(),
        }
    }

    /// An informational notice.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Info,
            text: text.into(),
        }
    }

    /// Text as displayed, emoji included.
    pub fn render(&self) -> String {
        format!("{} {}", self.tone.emoji(), self.text)
    }

    /// Builds the embed.
    pub fn embed(&self) -> CreateEmbed {
        CreateEmbed::new()
            .colour(self.tone.colour())
            .description(self.render())
    }
}

/// Author line such as "alice's Balance" with the user's avatar.
pub fn user_author(user: &User, what: &str) -> CreateEmbedAuthor {
    CreateEmbedAuthor::new(format!("{}'s {what}", user.name)).icon_url(user.face())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_render() {
        assert_eq!(Notice::error("Nope.").render(), "❌ Nope.");
        assert_eq!(Notice::warning("Wait.").render(), "⏰ Wait.");
        assert_eq!(Notice::info("Hi.").tone.colour(), BLUE);
    }

    #[test]
    fn test_palette() {
        assert_eq!(GOLD.0, 0xF1C40F);
        assert_eq!(RED.0, 0xED4245);
        assert_ne!(GREEN, YELLOW);
    }
}
