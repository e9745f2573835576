//! User account administration.

pub mod admin;

pub use admin::AdminUserService;
