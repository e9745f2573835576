//! # Stockroom
//!
//! Internal equipment-lending tracker: a catalog of SKU-coded items, a
//! borrow ledger with phone-verified returns, and admin-managed user
//! accounts, backed by PostgreSQL.
//!
//! This crate is the composition root. [`app::Application::bootstrap`]
//! loads configuration, connects to the database, runs migrations, and
//! wires the services from the member crates.

pub mod app;

pub use app::{Application, init_logging};

pub use stockroom_core::config::AppConfig;
pub use stockroom_core::error::{AppError, ErrorKind};
pub use stockroom_core::result::AppResult;
pub use stockroom_entity::session::{Role, Session};
