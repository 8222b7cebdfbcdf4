//! Command metadata consumed by the dispatch gate and the help command.

use poise::serenity_prelude::Permissions;
use std::fmt;
use std::time::Duration;

/// Cooldown applied when a command does not set one.
pub const DEFAULT_COOLDOWN_SECS: u64 = 3;

/// Help category a command is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Coins, gems and rewards
    Economy,
    /// Bot information and help
    Utility,
    /// Anything else
    General,
}

impl Category {
    /// Lowercase category name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::Utility => "utility",
            Self::General => "general",
        }
    }

    /// Capitalized category name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Economy => "Economy",
            Self::Utility => "Utility",
            Self::General => "General",
        }
    }

    /// Emoji shown in help listings.
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Economy => "💰",
            Self::Utility => "🛠️",
            Self::General => "📦",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description of a command's access rules and cooldown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Slash command name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Help category.
    pub category: Category,
    /// Cooldown in seconds, 0 disables it.
    pub cooldown: u64,
    /// Restricted to the configured owner.
    pub owner_only: bool,
    /// Restricted to server channels.
    pub guild_only: bool,
    /// Permissions the caller needs in a server.
    pub permissions: Permissions,
}

impl CommandDescriptor {
    /// Creates a descriptor with the default cooldown and no restrictions.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: Category::General,
            cooldown: DEFAULT_COOLDOWN_SECS,
            owner_only: false,
            guild_only: false,
            permissions: Permissions::empty(),
        }
    }

    /// Sets the category.
    #[must_use]
    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Sets the cooldown in seconds.
    #[must_use]
    pub fn cooldown(mut self, seconds: u64) -> Self {
        self.cooldown = seconds;
        self
    }

    /// Restricts the command to the owner.
    #[must_use]
    pub fn owner_only(mut self) -> Self {
        self.owner_only = true;
        self
    }

    /// Restricts the command to servers.
    #[must_use]
    pub fn guild_only(mut self) -> Self {
        self.guild_only = true;
        self
    }

    /// Requires permissions from callers in a server.
    #[must_use]
    pub fn permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = permissions;
        self
    }

    /// Cooldown as a [`Duration`].
    pub const fn cooldown_duration(&self) -> Duration {
        Duration::from_secs(self.cooldown)
    }

    /// Names of the required permissions, for display.
    pub fn permission_names(&self) -> Vec<&'static str> {
        self.permissions.get_permission_names()
    }
}
