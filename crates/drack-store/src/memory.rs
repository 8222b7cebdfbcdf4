//! In-memory record store for tests.

use crate::error::StoreResult;
use crate::model::{BalanceUpdate, UserBalance};
use crate::traits::RecordStore;
use async_trait::async_trait;
use drack_common::UserId;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A [`RecordStore`] holding balances in a map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    balances: RwLock<HashMap<UserId, UserBalance>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with balances.
    pub fn with_balances(balances: impl IntoIterator<Item = UserBalance>) -> Self {
        Self {
            balances: RwLock::new(
                balances
                    .into_iter()
                    .map(|balance| (balance.user_id, balance))
                    .collect(),
            ),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.balances.read().await.len()
    }

    /// Whether no record exists yet.
    pub async fn is_empty(&self) -> bool {
        self.balances.read().await.is_empty()
    }

    async fn sorted(&self) -> Vec<UserBalance> {
        let mut all: Vec<UserBalance> = self.balances.read().await.values().cloned().collect();
        all.sort_by(|a, b| b.coins.cmp(&a.coins).then(a.user_id.cmp(&b.user_id)));
        all
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get_balance(&self, user: UserId) -> StoreResult<UserBalance> {
        let mut balances = self.balances.write().await;
        Ok(balances
            .entry(user)
            .or_insert_with(|| UserBalance::new(user))
            .clone())
    }

    async fn update_balance(&self, user: UserId, update: BalanceUpdate) -> StoreResult<UserBalance> {
        let mut balances = self.balances.write().await;
        let balance = balances.entry(user).or_insert_with(|| UserBalance::new(user));
        balance.apply(&update);
        Ok(balance.clone())
    }

    async fn get_top_users(&self, limit: usize) -> StoreResult<Vec<UserBalance>> {
        let mut all = self.sorted().await;
        all.truncate(limit);
        Ok(all)
    }

    async fn get_all_balances(&self) -> StoreResult<Vec<UserBalance>> {
        Ok(self.sorted().await)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InventoryItem, ItemType};
    use crate::traits::RecordStoreExt;
    use drack_common::test_utils::discord_fixtures::{test_user_id, test_user_ids};

    #[tokio::test]
    async fn test_get_balance_creates_empty_record() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        let balance = store.get_balance(test_user_id()).await.unwrap();
        assert_eq!(balance, UserBalance::new(test_user_id()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_coin_arithmetic() {
        let store = MemoryStore::new();
        let user = test_user_id();

        assert_eq!(store.add_coins(user, 100).await.unwrap().coins, 100);
        assert!(!store.remove_coins(user, 101).await.unwrap());
        assert!(store.remove_coins(user, 40).await.unwrap());
        assert_eq!(store.get_balance(user).await.unwrap().coins, 60);
        assert_eq!(store.add_gems(user, 5).await.unwrap().gems, 5);
    }

    #[tokio::test]
    async fn test_item_stacks() {
        let store = MemoryStore::new();
        let user = test_user_id();
        let potion = |n| InventoryItem::new("potion", "Potion", n, ItemType::Consumable);

        store.add_item(user, potion(2)).await.unwrap();
        let balance = store.add_item(user, potion(1)).await.unwrap();
        assert_eq!(balance.inventory, vec![potion(3)]);

        assert!(!store.remove_item(user, "potion", 4).await.unwrap());
        assert!(store.remove_item(user, "potion", 3).await.unwrap());
        assert!(store.get_balance(user).await.unwrap().inventory.is_empty());
    }

    #[tokio::test]
    async fn test_rankings_are_sorted_by_coins() {
        let ids = test_user_ids(3);
        let store = MemoryStore::with_balances(ids.iter().zip([10, 30, 20]).map(|(&id, coins)| {
            let mut balance = UserBalance::new(id);
            balance.coins = coins;
            balance
        }));

        let top = store.get_top_users(2).await.unwrap();
        assert_eq!(top.iter().map(|b| b.coins).collect::<Vec<_>>(), vec![30, 20]);

        let all = store.get_all_balances().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].user_id, ids[0]);
    }
}
