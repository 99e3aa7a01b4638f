//! Shared types for the catalog admin client
//!
//! Wire models for the catalog REST API, the category tree builder,
//! and decoding of the backend's error payloads. Nothing in here does I/O.

pub mod error;
pub mod models;
pub mod tree;

// Re-exports
pub use error::{ErrorBody, FieldErrors};
pub use serde::{Deserialize, Serialize};
pub use tree::{CategoryNode, build_category_tree, count_nodes};
