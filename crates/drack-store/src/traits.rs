//! The record store abstraction used by command handlers.

use crate::error::StoreResult;
use crate::inventory::{merge_item, take_item};
use crate::model::{BalanceUpdate, InventoryItem, UserBalance};
use async_trait::async_trait;
use drack_common::UserId;

/// Persistent storage of user balances.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetches a user's balance, creating an empty record when none exists.
    async fn get_balance(&self, user: UserId) -> StoreResult<UserBalance>;

    /// Applies a partial update and returns the stored balance.
    async fn update_balance(&self, user: UserId, update: BalanceUpdate) -> StoreResult<UserBalance>;

    /// Top `limit` balances by coins, richest first.
    async fn get_top_users(&self, limit: usize) -> StoreResult<Vec<UserBalance>>;

    /// Every balance, richest first.
    async fn get_all_balances(&self) -> StoreResult<Vec<UserBalance>>;

    /// Whether the backend is reachable.
    async fn health_check(&self) -> bool;
}

/// Balance arithmetic built on [`RecordStore`].
///
/// Each helper reads, modifies and writes without a transaction, so two
/// concurrent updates for the same user may race.
#[async_trait]
pub trait RecordStoreExt: RecordStore {
    /// Adds coins and returns the new balance.
    async fn add_coins(&self, user: UserId, amount: i64) -> StoreResult<UserBalance>;

    /// Removes coins. Returns `false` without writing when the user cannot afford it.
    async fn remove_coins(&self, user: UserId, amount: i64) -> StoreResult<bool>;

    /// Adds gems and returns the new balance.
    async fn add_gems(&self, user: UserId, amount: i64) -> StoreResult<UserBalance>;

    /// Adds an item, stacking onto an existing stack with the same id.
    async fn add_item(&self, user: UserId, item: InventoryItem) -> StoreResult<UserBalance>;

    /// Removes items from a stack. Returns `false` when the stack is missing or too small.
    async fn remove_item(&self, user: UserId, item_id: &str, quantity: u32) -> StoreResult<bool>;
}

#[async_trait]
impl<S: RecordStore + ?Sized> RecordStoreExt for S {
    async fn add_coins(&self, user: UserId, amount: i64) -> StoreResult<UserBalance> {
        let balance = self.get_balance(user).await?;
        self.update_balance(user, BalanceUpdate::default().coins(balance.coins + amount))
            .await
    }

    async fn remove_coins(&self, user: UserId, amount: i64) -> StoreResult<bool> {
        let balance = self.get_balance(user).await?;
        if balance.coins < amount {
            return Ok(false);
        }
        self.update_balance(user, BalanceUpdate::default().coins(balance.coins - amount))
            .await?;
        Ok(true)
    }

    async fn add_gems(&self, user: UserId, amount: i64) -> StoreResult<UserBalance> {
        let balance = self.get_balance(user).await?;
        self.update_balance(user, BalanceUpdate::default().gems(balance.gems + amount))
            .await
    }

    async fn add_item(&self, user: UserId, item: InventoryItem) -> StoreResult<UserBalance> {
        let mut inventory = self.get_balance(user).await?.inventory;
        merge_item(&mut inventory, item);
        self.update_balance(user, BalanceUpdate::default().inventory(inventory))
            .await
    }

    async fn remove_item(&self, user: UserId, item_id: &str, quantity: u32) -> StoreResult<bool> {
        let mut inventory = self.get_balance(user).await?.inventory;
        if !take_item(&mut inventory, item_id, quantity) {
            return Ok(false);
        }
        self.update_balance(user, BalanceUpdate::default().inventory(inventory))
            .await?;
        Ok(true)
    }
}
