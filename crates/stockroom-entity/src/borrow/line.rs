//! Borrow line entity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One (item, quantity) pair within a borrow record.
///
/// Quantities are fixed at creation and never mutated afterwards. The sum
/// of quantities over all unreturned lines referencing an item equals that
/// item's `lent_quantity`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BorrowLine {
    /// Unique line identifier.
    pub id: Uuid,
    /// The borrow record this line belongs to.
    pub borrow_record_id: Uuid,
    /// The borrowed item.
    pub item_id: Uuid,
    /// Number of units borrowed (>= 1).
    pub quantity: i32,
}

/// A line of a borrow submission before it is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowLineInput {
    /// The item to borrow.
    pub item_id: Uuid,
    /// Number of units requested (>= 1).
    pub quantity: i32,
}
