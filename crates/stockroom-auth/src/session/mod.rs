//! Login and session persistence.

pub mod authenticator;
pub mod store;

pub use authenticator::Authenticator;
pub use store::SessionStore;
