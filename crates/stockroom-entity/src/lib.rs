//! # stockroom-entity
//!
//! Domain entity models for the Stockroom equipment-lending tracker.
//! Every struct in this crate represents a database table row or a domain
//! value object. All entities derive `Debug`, `Clone`, `Serialize`,
//! `Deserialize`, and database entities additionally derive
//! `sqlx::FromRow`.
//!
//! The [`store`] module defines the async store contracts implemented by
//! `stockroom-database` (and by in-memory doubles in tests).

pub mod borrow;
pub mod item;
pub mod session;
pub mod store;
pub mod user;
