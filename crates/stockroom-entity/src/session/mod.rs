//! Session entity: the explicit identity object passed into services.

pub mod model;

pub use model::{Role, Session};
