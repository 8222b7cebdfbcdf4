//! Inventory encoding and stack manipulation.
//!
//! PocketBase keeps the inventory as a JSON string column. Older records hold
//! a raw JSON array, and hand-edited ones may hold anything, so decoding is
//! deliberately forgiving: whatever cannot be read is an empty inventory.

use crate::model::{InventoryItem, ItemType};
use serde_json::Value;
use tracing::warn;

/// Decodes an inventory column value.
pub fn decode_inventory(value: &Value) -> Vec<InventoryItem> {
    match value {
        Value::Array(_) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            warn!("Discarding unreadable inventory array: {}", e);
            Vec::new()
        }),
        Value::String(raw) if raw.trim().is_empty() => Vec::new(),
        Value::String(raw) => serde_json::from_str(raw).unwrap_or_else(|e| {
            warn!("Discarding unreadable inventory string: {}", e);
            Vec::new()
        }),
        Value::Null => Vec::new(),
        other => {
            warn!("Unexpected inventory value type: {}", other);
            Vec::new()
        }
    }
}

/// Encodes an inventory as the JSON string stored in the column.
pub fn encode_inventory(items: &[InventoryItem]) -> String {
    // A Vec of plain structs with string keys cannot fail to serialize.
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

/// Adds a stack, merging into an existing stack with the same id.
pub fn merge_item(inventory: &mut Vec<InventoryItem>, item: InventoryItem) {
    if let Some(existing) = inventory.iter_mut().find(|stack| stack.id == item.id) {
        existing.quantity = existing.quantity.saturating_add(item.quantity);
    } else {
        inventory.push(item);
    }
}

/// Removes `quantity` items from the stack `item_id`.
///
/// Returns `false` and leaves the inventory untouched when the stack is
/// missing or too small. Emptied stacks are dropped.
pub fn take_item(inventory: &mut Vec<InventoryItem>, item_id: &str, quantity: u32) -> bool {
    let Some(index) = inventory.iter().position(|stack| stack.id == item_id) else {
        return false;
    };
    if inventory[index].quantity < quantity {
        return false;
    }

    inventory[index].quantity -= quantity;
    if inventory[index].quantity == 0 {
        inventory.remove(index);
    }
    true
}

/// Groups stacks by type, types ordered by first appearance.
pub fn group_by_type(inventory: &[InventoryItem]) -> Vec<(ItemType, Vec<&InventoryItem>)> {
    let mut groups: Vec<(ItemType, Vec<&InventoryItem>)> = Vec::new();
    for item in inventory {
        match groups.iter_mut().find(|(item_type, _)| *item_type == item.item_type) {
            Some((_, items)) => items.push(item),
            None => groups.push((item.item_type, vec![item])),
        }
    }
    groups
}
