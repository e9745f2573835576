//! Phone-verified return flow.

pub mod service;

pub use service::ReturnService;
