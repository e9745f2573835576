//! Catalog browsing and administration.

pub mod service;

pub use service::CatalogService;
