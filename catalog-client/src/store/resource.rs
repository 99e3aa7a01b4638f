//! REST resource descriptions
//!
//! A [`Resource`] ties an entity type to its collection path and payloads.
//! Optional routes are opted into through marker traits.

use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{
    Category, CategoryCreate, CategoryUpdate, Product, ProductCreate, ProductGroup,
    ProductGroupCreate, ProductUpdate, Variation, VariationCreate, VariationUpdate,
};

/// An entity served under `/{PATH}/`
pub trait Resource: Clone + DeserializeOwned + Send + Sync + 'static {
    /// Collection path segment, without slashes
    const PATH: &'static str;
    /// Human-readable singular name used in messages
    const NAME: &'static str;

    /// Create payload
    type Create: Serialize + Send + Sync;

    fn id(&self) -> i64;

    /// `{PATH}/`
    fn collection_path() -> String {
        format!("{}/", Self::PATH)
    }

    /// `{PATH}/{id}`
    fn item_path(id: i64) -> String {
        format!("{}/{}", Self::PATH, id)
    }
}

/// Resource with a `GET /{PATH}/{id}` route
pub trait Readable: Resource {}

/// Resource with a `PATCH /{PATH}/{id}` route.
///
/// Readable too, so a partial PATCH response can be followed by a re-read.
pub trait Updatable: Readable {
    type Update: Serialize + Send + Sync;
}

impl Resource for Category {
    const PATH: &'static str = "categories";
    const NAME: &'static str = "category";
    type Create = CategoryCreate;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Readable for Category {}

impl Updatable for Category {
    type Update = CategoryUpdate;
}

impl Resource for Product {
    const PATH: &'static str = "products";
    const NAME: &'static str = "product";
    type Create = ProductCreate;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Readable for Product {}

impl Updatable for Product {
    type Update = ProductUpdate;
}

impl Resource for Variation {
    const PATH: &'static str = "variations";
    const NAME: &'static str = "variation";
    type Create = VariationCreate;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Readable for Variation {}

impl Updatable for Variation {
    type Update = VariationUpdate;
}

// List, create and delete only.
impl Resource for ProductGroup {
    const PATH: &'static str = "product-groups";
    const NAME: &'static str = "product group";
    type Create = ProductGroupCreate;

    fn id(&self) -> i64 {
        self.id
    }
}
