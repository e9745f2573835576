//! Catalog item entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A borrowable equipment type in the catalog.
///
/// `lent_quantity` is the running total of units currently out against
/// unreturned borrow records. It is mutated only by the inventory
/// reconciliation operations on the catalog store, never by item updates.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Item {
    /// Unique item identifier.
    pub id: Uuid,
    /// Human-entered SKU code (unique).
    pub code: String,
    /// Item name.
    pub name: String,
    /// Model designation (optional).
    pub model: Option<String>,
    /// Color code (optional).
    pub color_code: Option<String>,
    /// Season tag (optional).
    pub season: Option<String>,
    /// Storage location (optional).
    pub location: Option<String>,
    /// Maximum number of units (admin-set ceiling).
    pub max_quantity: i32,
    /// Units currently out on unreturned borrow lines.
    pub lent_quantity: i32,
    /// Reference to an item image (optional).
    pub image_url: Option<String>,
    /// Whether the item appears in catalog listings and searches.
    pub is_active: bool,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Units that remain borrowable right now. Derived, never persisted.
    pub fn available_quantity(&self) -> i32 {
        (self.max_quantity - self.lent_quantity).max(0)
    }

    /// Check whether no units remain borrowable.
    pub fn is_out_of_stock(&self) -> bool {
        self.available_quantity() <= 0
    }
}

/// Data required to create a new catalog item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItem {
    /// SKU code (unique).
    pub code: String,
    /// Item name.
    pub name: String,
    /// Model designation (optional).
    pub model: Option<String>,
    /// Color code (optional).
    pub color_code: Option<String>,
    /// Season tag (optional).
    pub season: Option<String>,
    /// Storage location (optional).
    pub location: Option<String>,
    /// Maximum number of units. Defaults to 1 when unset or non-positive.
    pub max_quantity: Option<i32>,
    /// Reference to an item image (optional).
    pub image_url: Option<String>,
}

impl CreateItem {
    /// The effective capacity ceiling: 1 when unset or non-positive.
    pub fn effective_max_quantity(&self) -> i32 {
        match self.max_quantity {
            Some(q) if q > 0 => q,
            _ => 1,
        }
    }
}

/// Data for updating an existing item's descriptive and capacity fields.
///
/// `lent_quantity` is deliberately absent; updates never touch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateItem {
    /// New SKU code.
    pub code: String,
    /// New item name.
    pub name: String,
    /// New model designation.
    pub model: Option<String>,
    /// New color code.
    pub color_code: Option<String>,
    /// New season tag.
    pub season: Option<String>,
    /// New storage location.
    pub location: Option<String>,
    /// New capacity ceiling. Defaults to 1 when unset or non-positive.
    pub max_quantity: Option<i32>,
    /// New image reference.
    pub image_url: Option<String>,
}

impl UpdateItem {
    /// The effective capacity ceiling: 1 when unset or non-positive.
    pub fn effective_max_quantity(&self) -> i32 {
        match self.max_quantity {
            Some(q) if q > 0 => q,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(max_quantity: i32, lent_quantity: i32) -> Item {
        let now = Utc::now();
        Item {
            id: Uuid::new_v4(),
            code: "SKU001".to_string(),
            name: "Safety boots".to_string(),
            model: None,
            color_code: None,
            season: None,
            location: None,
            max_quantity,
            lent_quantity,
            image_url: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_available_quantity_is_derived() {
        assert_eq!(item(10, 3).available_quantity(), 7);
        assert_eq!(item(10, 0).available_quantity(), 10);
    }

    #[test]
    fn test_available_quantity_clamped_at_zero() {
        // Drifted bookkeeping must never surface a negative availability.
        assert_eq!(item(2, 5).available_quantity(), 0);
        assert!(item(2, 5).is_out_of_stock());
    }

    #[test]
    fn test_effective_max_quantity_defaults_to_one() {
        let mut create = CreateItem {
            code: "SKU001".to_string(),
            name: "Safety boots".to_string(),
            model: None,
            color_code: None,
            season: None,
            location: None,
            max_quantity: None,
            image_url: None,
        };
        assert_eq!(create.effective_max_quantity(), 1);
        create.max_quantity = Some(0);
        assert_eq!(create.effective_max_quantity(), 1);
        create.max_quantity = Some(-4);
        assert_eq!(create.effective_max_quantity(), 1);
        create.max_quantity = Some(12);
        assert_eq!(create.effective_max_quantity(), 12);
    }
}
