//! Category-only store operations

use shared::models::Category;
use shared::{CategoryNode, build_category_tree};

use super::{EntityStore, Pending, Resource};
use crate::client::HttpClient;

impl<H: HttpClient> EntityStore<Category, H> {
    /// Forest built from the current collection
    pub fn tree(&self) -> Vec<CategoryNode> {
        self.read(|s| build_category_tree(&s.items))
    }

    /// Load the direct children of `id` and merge them into the collection
    pub async fn fetch_subcategories(&self, id: i64) -> Option<Vec<Category>> {
        let _pending = Pending::begin(&self.state);
        self.state.send_modify(|s| s.error = None);

        let path = format!("{}/subcategories", Category::item_path(id));
        match self.http.get::<Vec<Category>>(&path).await {
            Ok(children) => {
                let children = children.unwrap_or_default();
                tracing::debug!(id, count = children.len(), "fetched subcategories");
                self.state.send_modify(|s| s.merge(children.iter().cloned()));
                Some(children)
            }
            Err(err) => {
                self.record_error("fetch_subcategories", &err);
                None
            }
        }
    }
}
