//! Integration tests for drack-store crate.
//!
//! Run with `--features testing` to exercise the in-memory and mock stores.

#![cfg(feature = "testing")]

use drack_common::test_utils::{discord_fixtures, init_test_logging, mock_timestamp};
use drack_store::{
    BalanceUpdate, InventoryItem, ItemType, MemoryStore, MockRecordStore, RecordStore,
    RecordStoreExt, StoreError, UserBalance,
};

#[tokio::test]
async fn test_claim_stamps_are_independent() {
    init_test_logging();
    let store = MemoryStore::new();
    let user = discord_fixtures::test_user_id();
    let daily = mock_timestamp(2024, 1, 1, 12, 0, 0);
    let work = mock_timestamp(2024, 1, 1, 13, 0, 0);

    store
        .update_balance(user, BalanceUpdate::default().coins(100).last_daily(daily))
        .await
        .unwrap();
    let balance = store
        .update_balance(user, BalanceUpdate::default().last_work(work))
        .await
        .unwrap();

    assert_eq!(balance.coins, 100);
    assert_eq!(balance.last_daily, Some(daily));
    assert_eq!(balance.last_work, Some(work));
    assert!(balance.last_weekly.is_none());
}

#[tokio::test]
async fn test_inventory_through_trait_object() {
    let store: Box<dyn RecordStore> = Box::new(MemoryStore::new());
    let user = discord_fixtures::test_user_id();

    store
        .add_item(user, InventoryItem::new("ore", "Iron Ore", 4, ItemType::Material))
        .await
        .unwrap();
    store
        .add_item(user, InventoryItem::new("ore", "Iron Ore", 6, ItemType::Material))
        .await
        .unwrap();

    let balance = store.get_balance(user).await.unwrap();
    assert_eq!(balance.item_count(), 1);
    assert_eq!(balance.inventory[0].quantity, 10);
}

#[tokio::test]
async fn test_remove_coins_does_not_write_when_insufficient() {
    let user = discord_fixtures::test_user_id();
    let mut mock = MockRecordStore::new();

    mock.expect_get_balance().returning(move |_| {
        let mut balance = UserBalance::new(user);
        balance.coins = 10;
        Ok(balance)
    });
    mock.expect_update_balance().never();

    assert!(!mock.remove_coins(user, 50).await.unwrap());
}

#[tokio::test]
async fn test_add_coins_propagates_store_errors() {
    let user = discord_fixtures::test_user_id();
    let mut mock = MockRecordStore::new();

    mock.expect_get_balance().returning(|_| {
        Err(StoreError::Status {
            status: 500,
            message: "boom".to_string(),
        })
    });

    let err = mock.add_coins(user, 5).await.unwrap_err();
    assert!(err.to_string().contains("500"));
}
