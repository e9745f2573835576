//! # stockroom-auth
//!
//! Authentication for Stockroom: Argon2id password hashing, password
//! policy enforcement, username/password login with a demo-credential
//! fallback, and file-backed session persistence.

pub mod password;
pub mod session;

pub use password::{PasswordHasher, PasswordValidator};
pub use session::{Authenticator, SessionStore};
