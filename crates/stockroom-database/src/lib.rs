//! # stockroom-database
//!
//! PostgreSQL database connection management and concrete repository
//! implementations for all Stockroom entities. Each repository implements
//! the matching store trait from `stockroom-entity`.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
