//! Observable store state

use std::collections::HashMap;
use std::time::Duration;

use shared::FieldErrors;
use tokio::time::Instant;

use super::resource::Resource;

/// Everything a view reads from a store
#[derive(Debug, Clone)]
pub struct StoreState<R> {
    /// Entities in server order, ids unique
    pub items: Vec<R>,
    /// Number of actions currently awaiting the transport
    pub pending: usize,
    /// Last general error message
    pub error: Option<String>,
    /// Per-field messages from the last failed create
    pub field_errors: Option<FieldErrors>,
    /// When the last successful `fetch_all` was issued
    pub last_fetch: Option<Instant>,
}

impl<R> Default for StoreState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pending: 0,
            error: None,
            field_errors: None,
            last_fetch: None,
        }
    }
}

impl<R: Resource> StoreState<R> {
    pub fn loading(&self) -> bool {
        self.pending > 0
    }

    pub fn get(&self, id: i64) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn position(&self, id: i64) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Replace the entity with the same id, or append it
    pub fn upsert(&mut self, item: R) {
        match self.position(item.id()) {
            Some(index) => self.items[index] = item,
            None => self.items.push(item),
        }
    }

    /// Upsert a whole batch in one pass.
    ///
    /// A repeated id keeps its first position and takes its last value.
    pub fn merge(&mut self, batch: impl IntoIterator<Item = R>) {
        let mut index: HashMap<i64, usize> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.id(), i))
            .collect();

        for item in batch {
            match index.get(&item.id()) {
                Some(&i) => self.items[i] = item,
                None => {
                    index.insert(item.id(), self.items.len());
                    self.items.push(item);
                }
            }
        }
    }

    /// Put `item` where `id` currently sits, or append it.
    ///
    /// Any other entry already carrying the new id is dropped so ids stay
    /// unique if the server changed it.
    pub fn replace_at(&mut self, id: i64, item: R) {
        let new_id = item.id();
        match self.position(id) {
            Some(index) => {
                self.items[index] = item;
                let mut current = 0;
                self.items.retain(|existing| {
                    let keep = current == index || existing.id() != new_id;
                    current += 1;
                    keep
                });
            }
            None => self.upsert(item),
        }
    }

    /// Whether the collection was fetched within `window`
    pub fn is_fresh(&self, window: Duration) -> bool {
        !self.items.is_empty()
            && self
                .last_fetch
                .is_some_and(|fetched| fetched.elapsed() < window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Variation;

    fn variation(id: i64, name: &str) -> Variation {
        Variation {
            id,
            name: name.into(),
            category_id: None,
        }
    }

    fn ids(state: &StoreState<Variation>) -> Vec<i64> {
        state.items.iter().map(|v| v.id).collect()
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut state = StoreState::default();
        state.upsert(variation(1, "Size"));
        state.upsert(variation(2, "Color"));
        state.upsert(variation(1, "Sizes"));
        assert_eq!(ids(&state), vec![1, 2]);
        assert_eq!(state.get(1).unwrap().name, "Sizes");
    }

    #[test]
    fn test_merge_first_position_last_value() {
        let mut state = StoreState::default();
        state.items = vec![variation(5, "old")];
        state.merge(vec![
            variation(1, "a"),
            variation(5, "new"),
            variation(1, "b"),
            variation(2, "c"),
        ]);
        assert_eq!(ids(&state), vec![5, 1, 2]);
        assert_eq!(state.get(1).unwrap().name, "b");
        assert_eq!(state.get(5).unwrap().name, "new");
    }

    #[test]
    fn test_merge_large_batch() {
        let mut state = StoreState::default();
        state.merge((0..50_000).map(|i| variation(i % 25_000, "x")));
        assert_eq!(state.items.len(), 25_000);
        assert_eq!(state.items[24_999].id, 24_999);
    }

    #[test]
    fn test_replace_at_keeps_ids_unique() {
        let mut state = StoreState::default();
        state.items = vec![variation(1, "a"), variation(2, "b"), variation(3, "c")];
        state.replace_at(1, variation(3, "moved"));
        assert_eq!(ids(&state), vec![3, 2]);
        assert_eq!(state.items[0].name, "moved");
    }

    #[test]
    fn test_replace_at_appends_unknown() {
        let mut state = StoreState::default();
        state.items = vec![variation(1, "a")];
        state.replace_at(9, variation(9, "new"));
        assert_eq!(ids(&state), vec![1, 9]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_is_fresh() {
        let mut state: StoreState<Variation> = StoreState::default();
        let window = Duration::from_secs(60);
        assert!(!state.is_fresh(window));

        state.last_fetch = Some(Instant::now());
        // an empty collection is never fresh
        assert!(!state.is_fresh(window));

        state.items.push(variation(1, "a"));
        assert!(state.is_fresh(window));

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(!state.is_fresh(window));
    }
}
