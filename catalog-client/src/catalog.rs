//! Catalog state container
//!
//! Owns one store per resource, all sharing a transport and a notifier.
//! Build one per session and pass it around by reference or `Arc`.

use std::sync::Arc;

use crate::client::{HttpClient, NetworkHttpClient};
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::notify::{Notifier, TracingNotifier};
use crate::store::{CategoryStore, ProductGroupStore, ProductStore, VariationStore};

pub struct CatalogState<H> {
    http: Arc<H>,
    categories: CategoryStore<H>,
    products: ProductStore<H>,
    variations: VariationStore<H>,
    product_groups: ProductGroupStore<H>,
}

impl CatalogState<NetworkHttpClient> {
    /// Connect over the network using `config`
    pub fn connect(config: &ClientConfig) -> ClientResult<Self> {
        let http = NetworkHttpClient::new(config)?;
        tracing::info!(base_url = %http.base_url(), "catalog client ready");
        Ok(Self::new(http, config))
    }
}

impl<H: HttpClient> CatalogState<H> {
    /// Container whose delete failures are logged through `tracing`
    pub fn new(http: H, config: &ClientConfig) -> Self {
        Self::with_notifier(http, config, Arc::new(TracingNotifier))
    }

    pub fn with_notifier(http: H, config: &ClientConfig, notifier: Arc<dyn Notifier>) -> Self {
        let http = Arc::new(http);
        let window = config.freshness_window;

        Self {
            categories: CategoryStore::new(http.clone(), window, notifier.clone()),
            products: ProductStore::new(http.clone(), window, notifier.clone()),
            variations: VariationStore::new(http.clone(), window, notifier.clone()),
            product_groups: ProductGroupStore::new(http.clone(), window, notifier),
            http,
        }
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    pub fn categories(&self) -> &CategoryStore<H> {
        &self.categories
    }

    pub fn products(&self) -> &ProductStore<H> {
        &self.products
    }

    pub fn variations(&self) -> &VariationStore<H> {
        &self.variations
    }

    pub fn product_groups(&self) -> &ProductGroupStore<H> {
        &self.product_groups
    }

    /// Fetch every collection concurrently. Returns whether all succeeded.
    pub async fn refresh_all(&self, force: bool) -> bool {
        let (categories, products, variations, groups) = tokio::join!(
            self.categories.fetch_all(force),
            self.products.fetch_all(force),
            self.variations.fetch_all(force),
            self.product_groups.fetch_all(force),
        );
        categories && products && variations && groups
    }

    /// Recorded errors as `(resource, message)` pairs
    pub fn errors(&self) -> Vec<(&'static str, String)> {
        [
            ("categories", self.categories.error()),
            ("products", self.products.error()),
            ("variations", self.variations.error()),
            ("product-groups", self.product_groups.error()),
        ]
        .into_iter()
        .filter_map(|(name, error)| error.map(|e| (name, e)))
        .collect()
    }

    /// Tear every store down to empty
    pub fn reset(&self) {
        self.categories.reset();
        self.products.reset();
        self.variations.reset();
        self.product_groups.reset();
        tracing::debug!("catalog state reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[test]
    fn test_connect_validates_config() {
        let result = CatalogState::connect(&ClientConfig::new("catalog.local"));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_connect_starts_empty() {
        let catalog = CatalogState::connect(&ClientConfig::default()).unwrap();
        assert_eq!(catalog.http().base_url(), "http://localhost:8000");
        assert!(catalog.categories().is_empty());
        assert!(catalog.product_groups().is_stale());
        assert!(catalog.errors().is_empty());
    }
}
