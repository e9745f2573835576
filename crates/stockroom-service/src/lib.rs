//! # stockroom-service
//!
//! Business logic service layer for Stockroom. Each service orchestrates
//! the store contracts from `stockroom-entity` to implement
//! application-level use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references. Identity-gated operations
//! take an explicit `&Session`; there is no ambient identity lookup.

pub mod borrow;
pub mod catalog;
pub mod returns;
pub mod user;

pub use borrow::BorrowService;
pub use catalog::CatalogService;
pub use returns::ReturnService;
pub use user::AdminUserService;
