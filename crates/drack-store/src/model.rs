//! Balance and inventory data types.

use chrono::{DateTime, Utc};
use drack_common::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category tag of an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Weapons
    Weapon,
    /// Armor pieces
    Armor,
    /// Single-use items
    Consumable,
    /// Crafting materials
    Material,
    /// Event and unique items
    Special,
    /// Any tag this build does not know about
    #[serde(other)]
    Other,
}

impl ItemType {
    /// Lowercase tag as stored in the record store.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weapon => "weapon",
            Self::Armor => "armor",
            Self::Consumable => "consumable",
            Self::Material => "material",
            Self::Special => "special",
            Self::Other => "other",
        }
    }

    /// Emoji shown next to the type in inventory listings.
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Weapon => "⚔️",
            Self::Armor => "🛡️",
            Self::Consumable => "🧪",
            Self::Special => "✨",
            Self::Material | Self::Other => "📦",
        }
    }

    /// Capitalized display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Weapon => "Weapon",
            Self::Armor => "Armor",
            Self::Consumable => "Consumable",
            Self::Material => "Material",
            Self::Special => "Special",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stack of identical items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Item identifier, unique per stack.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Number of items in the stack.
    pub quantity: u32,
    /// Item category.
    #[serde(rename = "type")]
    pub item_type: ItemType,
}

impl InventoryItem {
    /// Creates a new stack.
    pub fn new(id: impl Into<String>, name: impl Into<String>, quantity: u32, item_type: ItemType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            item_type,
        }
    }
}

/// A user's economy state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBalance {
    /// Owner of the balance.
    pub user_id: UserId,
    /// Coin count.
    pub coins: i64,
    /// Gem count.
    pub gems: i64,
    /// Last daily reward claim.
    pub last_daily: Option<DateTime<Utc>>,
    /// Last weekly reward claim.
    pub last_weekly: Option<DateTime<Utc>>,
    /// Last time the user worked.
    pub last_work: Option<DateTime<Utc>>,
    /// Item stacks in acquisition order.
    pub inventory: Vec<InventoryItem>,
}

impl UserBalance {
    /// An empty balance for a user seen for the first time.
    pub const fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            coins: 0,
            gems: 0,
            last_daily: None,
            last_weekly: None,
            last_work: None,
            inventory: Vec::new(),
        }
    }

    /// Applies a partial update in place.
    pub fn apply(&mut self, update: &BalanceUpdate) {
        if let Some(coins) = update.coins {
            self.coins = coins;
        }
        if let Some(gems) = update.gems {
            self.gems = gems;
        }
        if let Some(at) = update.last_daily {
            self.last_daily = Some(at);
        }
        if let Some(at) = update.last_weekly {
            self.last_weekly = Some(at);
        }
        if let Some(at) = update.last_work {
            self.last_work = Some(at);
        }
        if let Some(inventory) = &update.inventory {
            self.inventory.clone_from(inventory);
        }
    }

    /// Number of item stacks held.
    pub fn item_count(&self) -> usize {
        self.inventory.len()
    }
}

/// A partial balance update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceUpdate {
    /// New coin count.
    pub coins: Option<i64>,
    /// New gem count.
    pub gems: Option<i64>,
    /// New daily claim time.
    pub last_daily: Option<DateTime<Utc>>,
    /// New weekly claim time.
    pub last_weekly: Option<DateTime<Utc>>,
    /// New work time.
    pub last_work: Option<DateTime<Utc>>,
    /// Replacement inventory.
    pub inventory: Option<Vec<InventoryItem>>,
}

impl BalanceUpdate {
    /// Sets the coin count.
    #[must_use]
    pub fn coins(mut self, coins: i64) -> Self {
        self.coins = Some(coins);
        self
    }

    /// Sets the gem count.
    #[must_use]
    pub fn gems(mut self, gems: i64) -> Self {
        self.gems = Some(gems);
        self
    }

    /// Stamps the daily claim.
    #[must_use]
    pub fn last_daily(mut self, at: DateTime<Utc>) -> Self {
        self.last_daily = Some(at);
        self
    }

    /// Stamps the weekly claim.
    #[must_use]
    pub fn last_weekly(mut self, at: DateTime<Utc>) -> Self {
        self.last_weekly = Some(at);
        self
    }

    /// Stamps the work time.
    #[must_use]
    pub fn last_work(mut self, at: DateTime<Utc>) -> Self {
        self.last_work = Some(at);
        self
    }

    /// Replaces the inventory.
    #[must_use]
    pub fn inventory(mut self, inventory: Vec<InventoryItem>) -> Self {
        self.inventory = Some(inventory);
        self
    }

    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
