//! Entity stores
//!
//! One generic [`EntityStore`] per REST resource. Each store owns its
//! collection and publishes every change through a `watch` channel; views
//! subscribe and re-render. Failures never escape an action, they are
//! recorded on the state instead.
//!
//! Concurrent actions on one store are not serialized. Whichever call
//! resolves last writes the collection.

mod category;
mod resource;
mod state;

pub use resource::{Readable, Resource, Updatable};
pub use state::StoreState;

use std::sync::Arc;
use std::time::Duration;

use shared::FieldErrors;
use shared::models::{Category, Product, ProductGroup, Variation};
use tokio::sync::watch;
use tokio::time::Instant;

use crate::client::HttpClient;
use crate::error::{ClientError, ClientResult};
use crate::notify::{Notice, Notifier};

pub type CategoryStore<H> = EntityStore<Category, H>;
pub type ProductStore<H> = EntityStore<Product, H>;
pub type VariationStore<H> = EntityStore<Variation, H>;
pub type ProductGroupStore<H> = EntityStore<ProductGroup, H>;

/// Fetch / cache / mutate store for one resource
pub struct EntityStore<R, H> {
    http: Arc<H>,
    state: watch::Sender<StoreState<R>>,
    freshness_window: Duration,
    notifier: Arc<dyn Notifier>,
}

/// Marks an action as in flight until dropped
struct Pending<'a, R>(&'a watch::Sender<StoreState<R>>);

impl<'a, R> Pending<'a, R> {
    fn begin(state: &'a watch::Sender<StoreState<R>>) -> Self {
        state.send_modify(|s| s.pending += 1);
        Self(state)
    }
}

impl<R> Drop for Pending<'_, R> {
    fn drop(&mut self) {
        self.0
            .send_modify(|s| s.pending = s.pending.saturating_sub(1));
    }
}

fn require<T>(value: Option<T>) -> ClientResult<T> {
    value.ok_or_else(|| ClientError::InvalidResponse("empty response body".into()))
}

impl<R: Resource, H: HttpClient> EntityStore<R, H> {
    pub fn new(http: Arc<H>, freshness_window: Duration, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            http,
            state: watch::Sender::new(StoreState::default()),
            freshness_window,
            notifier,
        }
    }

    // ========== Reads ==========

    /// Receiver that observes every state change
    pub fn subscribe(&self) -> watch::Receiver<StoreState<R>> {
        self.state.subscribe()
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> StoreState<R> {
        self.state.borrow().clone()
    }

    /// Run `f` against the current state without cloning it
    pub fn read<T>(&self, f: impl FnOnce(&StoreState<R>) -> T) -> T {
        f(&self.state.borrow())
    }

    pub fn items(&self) -> Vec<R> {
        self.read(|s| s.items.clone())
    }

    pub fn get(&self, id: i64) -> Option<R> {
        self.read(|s| s.get(id).cloned())
    }

    pub fn len(&self) -> usize {
        self.read(|s| s.items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.read(|s| s.items.is_empty())
    }

    pub fn loading(&self) -> bool {
        self.read(StoreState::loading)
    }

    pub fn error(&self) -> Option<String> {
        self.read(|s| s.error.clone())
    }

    pub fn field_errors(&self) -> Option<FieldErrors> {
        self.read(|s| s.field_errors.clone())
    }

    /// Whether the next `fetch_all(false)` would hit the network
    pub fn is_stale(&self) -> bool {
        !self.read(|s| s.is_fresh(self.freshness_window))
    }

    // ========== Local mutations ==========

    /// Forget the fetch time so the next `fetch_all` refetches
    pub fn invalidate(&self) {
        self.state.send_modify(|s| s.last_fetch = None);
    }

    pub fn clear_errors(&self) {
        self.state.send_modify(|s| {
            s.error = None;
            s.field_errors = None;
        });
    }

    /// Drop the collection and all status
    pub fn reset(&self) {
        self.state.send_modify(|s| *s = StoreState::default());
    }

    fn record_error(&self, action: &'static str, err: &ClientError) {
        tracing::warn!(
            resource = R::NAME,
            action,
            status = ?err.status(),
            error = %err,
            "request failed"
        );
        let message = err.to_string();
        self.state.send_modify(|s| s.error = Some(message));
    }

    // ========== Actions ==========

    /// Load the whole collection unless it is still fresh.
    ///
    /// Returns whether the collection is current. On failure the previous
    /// items stay in place.
    pub async fn fetch_all(&self, force: bool) -> bool {
        let fresh = self.read(|s| s.is_fresh(self.freshness_window));
        if !force && fresh {
            tracing::debug!(resource = R::NAME, "collection fresh, skipping fetch");
            return true;
        }

        let _pending = Pending::begin(&self.state);
        self.state.send_modify(|s| s.error = None);
        let started = Instant::now();

        match self.http.get::<Vec<R>>(&R::collection_path()).await {
            Ok(items) => {
                let mut fetched = StoreState::default();
                fetched.merge(items.unwrap_or_default());
                tracing::debug!(resource = R::NAME, count = fetched.items.len(), "fetched collection");
                self.state.send_modify(|s| {
                    s.items = fetched.items;
                    s.last_fetch = Some(started);
                });
                true
            }
            Err(err) => {
                self.record_error("fetch_all", &err);
                false
            }
        }
    }

    /// Create an entity and append the server's copy
    pub async fn create(&self, payload: &R::Create) -> Option<R> {
        let _pending = Pending::begin(&self.state);
        self.clear_errors();

        match self
            .http
            .post::<R, _>(&R::collection_path(), payload)
            .await
            .and_then(require)
        {
            Ok(item) => {
                tracing::info!(resource = R::NAME, id = item.id(), "created");
                self.state.send_modify(|s| s.upsert(item.clone()));
                Some(item)
            }
            Err(err) => {
                match err.field_errors() {
                    Some(fields) => {
                        let names: Vec<&str> = fields.keys().map(String::as_str).collect();
                        tracing::warn!(resource = R::NAME, fields = ?names, "create rejected");
                        self.state.send_modify(|s| s.field_errors = Some(fields));
                    }
                    None => self.record_error("create", &err),
                }
                None
            }
        }
    }

    /// Optimistically remove an entity.
    ///
    /// The entity disappears immediately. If the server refuses, the previous
    /// collection is put back, an error is recorded and the notifier fires.
    pub async fn remove(&self, id: i64) -> bool {
        let _pending = Pending::begin(&self.state);

        let mut snapshot = Vec::new();
        self.state.send_modify(|s| {
            snapshot = s.items.clone();
            s.items.retain(|item| item.id() != id);
        });

        match self.http.delete(&R::item_path(id)).await {
            Ok(()) => {
                tracing::info!(resource = R::NAME, id, "deleted");
                true
            }
            Err(err) => {
                tracing::warn!(resource = R::NAME, id, status = ?err.status(), error = %err, "delete failed, rolling back");
                self.state.send_modify(|s| {
                    s.items = snapshot;
                    s.error = Some(format!("Failed to delete {}", R::NAME));
                });
                let notice = Notice::new(R::NAME, format!("Could not delete {}.", R::NAME))
                    .with_detail(err.to_string());
                self.notifier.notify(&notice);
                false
            }
        }
    }
}

impl<R: Readable, H: HttpClient> EntityStore<R, H> {
    /// Cached entity, or `GET /{PATH}/{id}` when missing or forced
    pub async fn fetch_one(&self, id: i64, force: bool) -> Option<R> {
        if !force {
            if let Some(item) = self.get(id) {
                tracing::debug!(resource = R::NAME, id, "cache hit");
                return Some(item);
            }
        }

        let _pending = Pending::begin(&self.state);
        self.state.send_modify(|s| s.error = None);

        match self.http.get::<R>(&R::item_path(id)).await.and_then(require) {
            Ok(item) => {
                self.state.send_modify(|s| s.upsert(item.clone()));
                Some(item)
            }
            Err(err) => {
                self.record_error("fetch_one", &err);
                None
            }
        }
    }
}

impl<R: Updatable, H: HttpClient> EntityStore<R, H> {
    /// Patch an entity and replace the local copy with the server's.
    ///
    /// Some routes answer a PATCH with the update payload rather than the
    /// entity. When the body does not decode as `R` the entity is re-read
    /// with `GET /{PATH}/{id}`.
    pub async fn update(&self, id: i64, payload: &R::Update) -> Option<R> {
        let _pending = Pending::begin(&self.state);
        self.state.send_modify(|s| s.error = None);

        match self.patch_and_read(id, payload).await {
            Ok(item) => {
                tracing::info!(resource = R::NAME, id, "updated");
                self.state.send_modify(|s| s.replace_at(id, item.clone()));
                Some(item)
            }
            Err(err) => {
                self.record_error("update", &err);
                None
            }
        }
    }

    async fn patch_and_read(&self, id: i64, payload: &R::Update) -> ClientResult<R> {
        let path = R::item_path(id);
        let body = self.http.patch::<serde_json::Value, _>(&path, payload).await?;

        if let Some(body) = body {
            match serde_json::from_value::<R>(body) {
                Ok(item) => return Ok(item),
                Err(err) => {
                    tracing::debug!(resource = R::NAME, id, error = %err, "partial update response, re-reading");
                }
            }
        }

        self.http.get::<R>(&path).await.and_then(require)
    }
}
