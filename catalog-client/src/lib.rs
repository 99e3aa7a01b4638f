//! Catalog Client - data layer for the catalog admin
//!
//! Talks to the catalog REST API and keeps per-entity caches:
//! - [`HttpClient`]: transport adapter (network or in-process)
//! - [`EntityStore`]: generic fetch / cache / optimistic-mutate store
//! - [`CatalogState`]: the four entity stores behind one container

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod notify;
pub mod store;

pub use catalog::CatalogState;
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use client::{HttpClient, NetworkHttpClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use notify::{Notice, Notifier, TracingNotifier};
pub use store::{
    CategoryStore, EntityStore, ProductGroupStore, ProductStore, Readable, Resource, StoreState,
    Updatable, VariationStore,
};

// Re-export shared types for convenience
pub use shared::models::{
    Category, CategoryCreate, CategoryUpdate, Product, ProductCreate, ProductGroup,
    ProductGroupCreate, ProductUpdate, Variation, VariationCreate, VariationUpdate,
};
pub use shared::{CategoryNode, ErrorBody, FieldErrors, build_category_tree};
