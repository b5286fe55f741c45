//! Simulated playback state
//!
//! There is no audio: "playing" means an external ticker keeps calling
//! [`PlaybackState::tick`], which moves the elapsed time forward and rolls over
//! to the next track when the current one runs out.

use super::catalog::{Catalog, Track};

// Keeps a seek to 100% just short of the end so it never counts as finished
const SEEK_END_MARGIN: f64 = 0.001;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaybackState {
    pub current_index: usize,
    pub elapsed_seconds: f64,
    pub status: PlaybackStatus,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn current_track<'a>(&self, catalog: &'a Catalog) -> Option<&'a Track> {
        catalog.get(self.current_index)
    }

    pub fn play(&mut self, catalog: &Catalog, index: usize) {
        if catalog.is_empty() {
            return;
        }
        self.current_index = index % catalog.len();
        self.elapsed_seconds = 0.0;
        self.status = PlaybackStatus::Playing;
    }

    /// Advance by `step` seconds. Returns true when the tick rolled over to the next track.
    pub fn tick(&mut self, catalog: &Catalog, step: f64) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(track) = self.current_track(catalog) else {
            return false;
        };

        self.elapsed_seconds += step;
        if self.elapsed_seconds >= track.duration() {
            self.current_index = (self.current_index + 1) % catalog.len();
            self.elapsed_seconds = 0.0;
            return true;
        }
        false
    }

    pub fn pause(&mut self) {
        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == PlaybackStatus::Paused {
            self.status = PlaybackStatus::Playing;
        }
    }

    /// Play/pause button: pause, resume, or start the current track from stopped
    pub fn toggle(&mut self, catalog: &Catalog) {
        match self.status {
            PlaybackStatus::Playing => self.pause(),
            PlaybackStatus::Paused => self.resume(),
            PlaybackStatus::Stopped => self.play(catalog, self.current_index),
        }
    }

    /// Jump to `fraction` (0.0..=1.0) of the current track
    pub fn seek(&mut self, catalog: &Catalog, fraction: f64) {
        let Some(track) = self.current_track(catalog) else {
            return;
        };
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        let duration = track.duration();

        let target = fraction * duration;
        self.elapsed_seconds = if target >= duration {
            (duration - SEEK_END_MARGIN).max(0.0)
        } else {
            target
        };
    }

    pub fn next(&mut self, catalog: &Catalog) {
        if catalog.is_empty() {
            return;
        }
        self.play(catalog, (self.current_index + 1) % catalog.len());
    }

    pub fn previous(&mut self, catalog: &Catalog) {
        if catalog.is_empty() {
            return;
        }
        let len = catalog.len();
        self.play(catalog, (self.current_index % len + len - 1) % len);
    }
}

/// Everything the view needs to draw the now-playing bar
#[derive(Clone, Debug)]
pub struct PlaybackSnapshot {
    pub track: Option<Track>,
    pub current_index: usize,
    pub elapsed_seconds: f64,
    pub duration_seconds: f64,
    pub status: PlaybackStatus,
    pub liked: bool,
}

impl PlaybackSnapshot {
    pub fn progress_ratio(&self) -> f64 {
        if self.duration_seconds > 0.0 {
            (self.elapsed_seconds / self.duration_seconds).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
