//! Catalog item entity.

pub mod model;

pub use model::{CreateItem, Item, UpdateItem};
