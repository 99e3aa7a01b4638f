//! Data models
//!
//! Mirrors the catalog backend's public schemas. All IDs are `i64`
//! and assigned by the server.

pub mod category;
pub mod product;
pub mod product_group;
pub mod variation;

// Re-exports
pub use category::*;
pub use product::*;
pub use product_group::*;
pub use variation::*;
