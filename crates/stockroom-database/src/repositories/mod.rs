//! Repository implementations for all Stockroom entities.

pub mod borrow;
pub mod item;
pub mod user;

pub use borrow::BorrowRepository;
pub use item::ItemRepository;
pub use user::UserRepository;
