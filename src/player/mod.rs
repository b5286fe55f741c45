//! Player demo - static catalog, simulated playback and liked songs
//!
//! - `catalog`: fixed track list
//! - `playback`: playback state machine advanced by external ticks
//! - `likes`: persisted set of liked track ids

pub mod catalog;
pub mod likes;
pub mod playback;

pub use catalog::{Catalog, Track};
pub use likes::LikeSet;
pub use playback::{PlaybackSnapshot, PlaybackState, PlaybackStatus};

/// Owns the catalog, the playback state and the liked songs
pub struct Player {
    catalog: Catalog,
    playback: PlaybackState,
    likes: LikeSet,
}

impl Player {
    pub fn new(catalog: Catalog, likes: LikeSet) -> Self {
        Self {
            catalog,
            playback: PlaybackState::new(),
            likes,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn play(&mut self, index: usize) {
        self.playback.play(&self.catalog, index);
        self.log_now_playing("Playing track");
    }

    pub fn pause(&mut self) {
        self.playback.pause();
        tracing::debug!(elapsed = self.playback.elapsed_seconds, "Playback paused");
    }

    pub fn resume(&mut self) {
        self.playback.resume();
        tracing::debug!(elapsed = self.playback.elapsed_seconds, "Playback resumed");
    }

    pub fn toggle_playback(&mut self) {
        self.playback.toggle(&self.catalog);
        tracing::debug!(status = ?self.playback.status, "Playback toggled");
    }

    pub fn next(&mut self) {
        self.playback.next(&self.catalog);
        self.log_now_playing("Skipped to next track");
    }

    pub fn previous(&mut self) {
        self.playback.previous(&self.catalog);
        self.log_now_playing("Went back to previous track");
    }

    pub fn seek(&mut self, fraction: f64) {
        self.playback.seek(&self.catalog, fraction);
        tracing::debug!(fraction, elapsed = self.playback.elapsed_seconds, "Seeked");
    }

    /// Seek relative to the current position, in seconds
    pub fn seek_by(&mut self, delta_seconds: f64) {
        let Some(track) = self.playback.current_track(&self.catalog) else {
            return;
        };
        let fraction = (self.playback.elapsed_seconds + delta_seconds) / track.duration();
        self.seek(fraction);
    }

    pub fn tick(&mut self, step: f64) {
        if self.playback.tick(&self.catalog, step) {
            self.log_now_playing("Track finished, advancing");
        }
    }

    /// Flip the liked status of `track_id`; returns the new status
    pub fn toggle_like(&mut self, track_id: u32) -> bool {
        let liked = self.likes.toggle(track_id);
        tracing::info!(track_id, liked, "Liked status toggled");
        liked
    }

    pub fn is_liked(&self, track_id: u32) -> bool {
        self.likes.is_liked(track_id)
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        let track = self.playback.current_track(&self.catalog).copied();
        PlaybackSnapshot {
            track,
            current_index: self.playback.current_index,
            elapsed_seconds: self.playback.elapsed_seconds,
            duration_seconds: track.map(|t| t.duration()).unwrap_or(0.0),
            status: self.playback.status,
            liked: track.is_some_and(|t| self.likes.is_liked(t.id)),
        }
    }

    fn log_now_playing(&self, message: &str) {
        if let Some(track) = self.playback.current_track(&self.catalog) {
            tracing::info!(index = self.playback.current_index, title = track.title, artist = track.artist, "{}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::storage::{KeyValueStore, MemoryStore};

    fn player() -> Player {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        Player::new(Catalog::builtin(), LikeSet::load(store))
    }

    #[test]
    fn snapshot_tracks_current_song_and_like() {
        let mut player = player();
        let stopped = player.snapshot();
        assert_eq!(stopped.status, PlaybackStatus::Stopped);
        assert_eq!(stopped.track.map(|t| t.id), Some(1));

        player.play(2);
        let id = player.snapshot().track.unwrap().id;
        assert!(player.toggle_like(id));

        let snapshot = player.snapshot();
        assert_eq!(snapshot.status, PlaybackStatus::Playing);
        assert!(snapshot.liked);
        assert_eq!(snapshot.progress_ratio(), 0.0);
    }

    #[test]
    fn seek_by_moves_relative_to_position() {
        let mut player = player();
        player.play(0);
        player.tick(10.0);
        player.seek_by(5.0);
        assert!((player.state().elapsed_seconds - 15.0).abs() < 1e-9);

        player.seek_by(-60.0);
        assert_eq!(player.state().elapsed_seconds, 0.0);
    }
}
