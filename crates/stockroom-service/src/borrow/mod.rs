//! Borrow ledger: submissions, listings, and returns.

pub mod service;

pub use service::{BorrowRequest, BorrowService};
