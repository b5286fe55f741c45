//! Liked songs, persisted on every change

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::storage::{self, KeyValueStore, LIKED_SONGS_KEY};

/// Set of liked track ids
pub struct LikeSet {
    liked_ids: BTreeSet<u32>,
    store: Arc<dyn KeyValueStore>,
}

impl LikeSet {
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let ids: Vec<u32> = storage::load_or_default(store.as_ref(), LIKED_SONGS_KEY);
        tracing::debug!(count = ids.len(), "Liked songs loaded");
        Self {
            liked_ids: ids.into_iter().collect(),
            store,
        }
    }

    pub fn persist(&self) {
        let ids: Vec<u32> = self.liked_ids.iter().copied().collect();
        if let Err(e) = storage::save_json(self.store.as_ref(), LIKED_SONGS_KEY, &ids) {
            tracing::warn!(error = %e, "Failed to save liked songs");
        }
    }

    /// Flip membership of `track_id` and return whether it is now liked
    pub fn toggle(&mut self, track_id: u32) -> bool {
        let liked = if self.liked_ids.remove(&track_id) {
            false
        } else {
            self.liked_ids.insert(track_id);
            true
        };
        self.persist();
        liked
    }

    pub fn is_liked(&self, track_id: u32) -> bool {
        self.liked_ids.contains(&track_id)
    }

    pub fn ids(&self) -> &BTreeSet<u32> {
        &self.liked_ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn double_toggle_restores_membership() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut likes = LikeSet::load(store);
        likes.toggle(2);
        let before = likes.ids().clone();

        assert!(likes.toggle(5));
        assert!(!likes.toggle(5));
        assert_eq!(likes.ids(), &before);

        assert!(!likes.toggle(2));
        assert!(likes.toggle(2));
        assert_eq!(likes.ids(), &before);
    }

    #[test]
    fn likes_round_trip_through_storage() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut likes = LikeSet::load(store.clone());
        likes.toggle(4);
        likes.toggle(1);

        assert_eq!(store.get(LIKED_SONGS_KEY).as_deref(), Some("[1,4]"));
        let reloaded = LikeSet::load(store);
        assert_eq!(reloaded.ids(), likes.ids());
        assert!(reloaded.is_liked(4));
    }

    #[test]
    fn malformed_likes_start_empty() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set(LIKED_SONGS_KEY, "{\"liked\": true}").unwrap();
        assert!(LikeSet::load(store).ids().is_empty());
    }
}
