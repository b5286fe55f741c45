//! Main application model with state management

use std::sync::Arc;

use super::intent::Intent;
use super::types::{Notification, NotificationLevel, TrackRow, UiState};
use crate::player::{Catalog, LikeSet, PlaybackSnapshot, Player};
use crate::scanner::{
    MockCandidates, ScanEvent, ScanHistory, ScanSession, ScanSnapshot, SessionState, SyntheticCamera,
    encode,
};
use crate::storage::KeyValueStore;

/// Main application model containing all state
pub struct AppModel {
    scanner: ScanSession,
    player: Player,
    ui_state: UiState,
    should_quit: bool,
}

impl AppModel {
    pub fn new(scanner: ScanSession, player: Player) -> Self {
        Self {
            scanner,
            player,
            ui_state: UiState::default(),
            should_quit: false,
        }
    }

    /// Model wired to the synthetic camera, random mock codes and the built-in catalog
    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        let scanner = ScanSession::new(
            Box::new(SyntheticCamera::new()),
            Box::new(MockCandidates),
            ScanHistory::load(store.clone()),
        );
        let player = Player::new(Catalog::builtin(), LikeSet::load(store));
        Self::new(scanner, player)
    }

    // ========================================================================
    // Intent dispatch
    // ========================================================================

    pub fn handle(&mut self, intent: Intent) {
        tracing::debug!(?intent, "Handling intent");

        match intent {
            Intent::StartScan => match self.scanner.start() {
                Ok(()) => self.notify(NotificationLevel::Success, "Camera started"),
                Err(e) => self.notify(NotificationLevel::Error, e.to_string()),
            },
            Intent::StopScan => {
                if self.scanner.state() != SessionState::Idle {
                    self.scanner.stop();
                    self.notify(NotificationLevel::Info, "Scanning stopped");
                }
            }
            Intent::Reset => {
                self.scanner.reset();
                self.ui_state.manual_input.clear();
                self.notify(NotificationLevel::Info, "Reset");
            }
            Intent::ManualSubmit(text) => self.submit_manual(&text),
            Intent::ClearHistory => {
                self.scanner.clear_history();
                self.ui_state.confirm_clear_history = false;
                self.notify(NotificationLevel::Info, "History cleared");
            }
            Intent::Play(index) => {
                self.player.play(index);
                self.ui_state.track_selected = self.player.state().current_index;
            }
            Intent::TogglePlayback => self.player.toggle_playback(),
            Intent::Pause => self.player.pause(),
            Intent::Resume => self.player.resume(),
            Intent::Next => {
                self.player.next();
                self.ui_state.track_selected = self.player.state().current_index;
            }
            Intent::Previous => {
                self.player.previous();
                self.ui_state.track_selected = self.player.state().current_index;
            }
            Intent::Seek(fraction) => self.player.seek(fraction),
            Intent::SeekBy(seconds) => self.player.seek_by(seconds),
            Intent::ToggleLike(track_id) => {
                let liked = self.player.toggle_like(track_id);
                let message = if liked { "Added to liked songs" } else { "Removed from liked songs" };
                self.notify(NotificationLevel::Info, message);
            }
            Intent::SwitchPanel => {
                self.ui_state.active_panel = self.ui_state.active_panel.next();
                self.ui_state.editing_manual_input = false;
            }
            Intent::Quit => self.should_quit = true,
        }
    }

    fn submit_manual(&mut self, text: &str) {
        let Some(result) = self.scanner.submit_manual(text) else {
            self.notify(NotificationLevel::Error, "Enter barcode data first");
            return;
        };

        match result.verdict {
            Ok(_) => {
                self.ui_state.manual_input.clear();
                self.notify(NotificationLevel::Success, "Barcode is valid");
            }
            Err(e) => self.notify(NotificationLevel::Error, format!("Validation failed: {}", e)),
        }
    }

    // ========================================================================
    // Ticks
    // ========================================================================

    /// One frame tick of the scanner; a no-op unless scanning
    pub fn on_frame_tick(&mut self) -> ScanEvent {
        let event = self.scanner.on_frame();
        if let ScanEvent::Matched(result) = &event {
            let message = format!("Scanned {} ({})", result.data, result.symbology().map(|s| s.as_str()).unwrap_or("?"));
            self.notify(NotificationLevel::Success, message);
        }
        event
    }

    /// One playback tick; a no-op unless playing
    pub fn on_playback_tick(&mut self, step_seconds: f64) {
        let before = self.player.state().current_index;
        self.player.tick(step_seconds);
        let after = self.player.state().current_index;
        if before != after && self.ui_state.track_selected == before {
            self.ui_state.track_selected = after;
        }
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let notification = Notification::new(level, message);
        tracing::debug!(level = ?notification.level, message = %notification.message, "Notification");
        self.ui_state.notification = Some(notification);
    }

    pub fn auto_clear_old_notifications(&mut self) {
        if self.ui_state.notification.as_ref().is_some_and(Notification::is_expired) {
            self.ui_state.notification = None;
        }
    }

    pub fn clear_notification(&mut self) {
        self.ui_state.notification = None;
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn ui_state(&self) -> &UiState {
        &self.ui_state
    }

    pub fn begin_manual_input(&mut self) {
        self.ui_state.editing_manual_input = true;
    }

    pub fn end_manual_input(&mut self) {
        self.ui_state.editing_manual_input = false;
    }

    pub fn append_to_manual_input(&mut self, c: char) {
        self.ui_state.manual_input.push(c);
    }

    pub fn backspace_manual_input(&mut self) {
        self.ui_state.manual_input.pop();
    }

    pub fn manual_input(&self) -> &str {
        &self.ui_state.manual_input
    }

    pub fn request_clear_history(&mut self) {
        if !self.scanner.history().is_empty() {
            self.ui_state.confirm_clear_history = true;
        }
    }

    pub fn cancel_clear_history(&mut self) {
        self.ui_state.confirm_clear_history = false;
    }

    pub fn toggle_help_popup(&mut self) {
        self.ui_state.show_help_popup = !self.ui_state.show_help_popup;
    }

    pub fn move_track_selection_up(&mut self) {
        self.ui_state.track_selected = self.ui_state.track_selected.saturating_sub(1);
    }

    pub fn move_track_selection_down(&mut self) {
        let last = self.player.catalog().len().saturating_sub(1);
        self.ui_state.track_selected = (self.ui_state.track_selected + 1).min(last);
    }

    pub fn selected_track_id(&self) -> Option<u32> {
        self.player.catalog().get(self.ui_state.track_selected).map(|t| t.id)
    }

    // ========================================================================
    // Snapshots for the view
    // ========================================================================

    pub fn scan_snapshot(&self) -> ScanSnapshot {
        self.scanner.snapshot()
    }

    pub fn playback_snapshot(&self) -> PlaybackSnapshot {
        self.player.snapshot()
    }

    pub fn track_rows(&self) -> Vec<TrackRow> {
        let current = self.player.state().current_index;
        self.player
            .catalog()
            .tracks()
            .iter()
            .enumerate()
            .map(|(i, track)| TrackRow {
                track: *track,
                liked: self.player.is_liked(track.id),
                is_current: i == current,
            })
            .collect()
    }

    /// Checksum line for the last accepted result
    pub fn last_checksum(&self) -> Option<u8> {
        self.scanner
            .last_result()
            .filter(|r| r.is_valid())
            .and_then(|r| encode(&r.data))
            .map(|e| e.checksum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ActivePanel;
    use crate::player::PlaybackStatus;
    use crate::scanner::candidates::ScriptedCandidates;
    use crate::storage::{LIKED_SONGS_KEY, MemoryStore, SCAN_HISTORY_KEY};

    fn model_with(camera: SyntheticCamera, store: Arc<dyn KeyValueStore>) -> AppModel {
        let scanner = ScanSession::new(
            Box::new(camera),
            Box::new(ScriptedCandidates::new(["CODE128DEMO"])),
            ScanHistory::load(store.clone()),
        );
        AppModel::new(scanner, Player::new(Catalog::builtin(), LikeSet::load(store)))
    }

    fn level(model: &AppModel) -> Option<NotificationLevel> {
        model.ui_state().notification.as_ref().map(|n| n.level)
    }

    #[test]
    fn scan_flow_through_intents() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut model = model_with(SyntheticCamera::new().with_pattern_every(1), store.clone());

        model.handle(Intent::StartScan);
        assert_eq!(level(&model), Some(NotificationLevel::Success));
        assert!(matches!(model.on_frame_tick(), ScanEvent::Matched(_)));
        assert_eq!(model.scan_snapshot().state, SessionState::Matched);
        assert_eq!(model.last_checksum(), encode("CODE128DEMO").map(|e| e.checksum));
        assert!(store.get(SCAN_HISTORY_KEY).unwrap().contains("CODE128DEMO"));

        model.handle(Intent::StopScan);
        assert_eq!(model.scan_snapshot().state, SessionState::Idle);
    }

    #[test]
    fn camera_failure_is_reported_not_fatal() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut model = model_with(SyntheticCamera::unavailable(), store);

        model.handle(Intent::StartScan);
        assert_eq!(level(&model), Some(NotificationLevel::Error));
        assert_eq!(model.scan_snapshot().state, SessionState::Idle);
        assert!(!model.should_quit());
    }

    #[test]
    fn manual_submit_notifies_and_clears_input_on_success() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut model = model_with(SyntheticCamera::new(), store);

        model.handle(Intent::ManualSubmit("  ".to_string()));
        assert_eq!(level(&model), Some(NotificationLevel::Error));
        assert!(model.scan_snapshot().last_result.is_none());

        for c in "42".chars() {
            model.append_to_manual_input(c);
        }
        let text = model.manual_input().to_string();
        model.handle(Intent::ManualSubmit(text));
        assert_eq!(level(&model), Some(NotificationLevel::Success));
        assert!(model.manual_input().is_empty());
        assert_eq!(model.scan_snapshot().history.len(), 1);

        model.handle(Intent::ManualSubmit("\u{7}\u{7}".to_string()));
        assert_eq!(level(&model), Some(NotificationLevel::Error));
        assert_eq!(model.scan_snapshot().history.len(), 1);
    }

    #[test]
    fn clear_history_needs_entries_to_prompt() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut model = model_with(SyntheticCamera::new(), store);

        model.request_clear_history();
        assert!(!model.ui_state().confirm_clear_history);

        model.handle(Intent::ManualSubmit("BARCODE001".to_string()));
        model.request_clear_history();
        assert!(model.ui_state().confirm_clear_history);

        model.handle(Intent::ClearHistory);
        assert!(!model.ui_state().confirm_clear_history);
        assert!(model.scan_snapshot().history.is_empty());
    }

    #[test]
    fn player_intents_drive_playback_and_likes() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut model = model_with(SyntheticCamera::new(), store.clone());

        model.handle(Intent::Play(1));
        assert_eq!(model.playback_snapshot().status, PlaybackStatus::Playing);
        assert_eq!(model.ui_state().track_selected, 1);

        model.on_playback_tick(0.25);
        assert_eq!(model.playback_snapshot().elapsed_seconds, 0.25);

        model.handle(Intent::Pause);
        model.on_playback_tick(0.25);
        assert_eq!(model.playback_snapshot().elapsed_seconds, 0.25);

        model.handle(Intent::Resume);
        model.handle(Intent::Next);
        assert_eq!(model.playback_snapshot().current_index, 2);

        model.handle(Intent::Seek(0.5));
        let snapshot = model.playback_snapshot();
        assert_eq!(snapshot.elapsed_seconds, snapshot.duration_seconds * 0.5);

        let id = model.selected_track_id().unwrap();
        model.handle(Intent::ToggleLike(id));
        assert!(model.track_rows()[2].liked);
        assert!(model.track_rows()[2].is_current);
        assert_eq!(store.get(LIKED_SONGS_KEY), Some(format!("[{}]", id)));
    }

    #[test]
    fn track_finishing_moves_selection_along() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut model = model_with(SyntheticCamera::new(), store);

        model.handle(Intent::Play(0));
        let duration = model.playback_snapshot().duration_seconds;
        model.on_playback_tick(duration);
        assert_eq!(model.playback_snapshot().current_index, 1);
        assert_eq!(model.ui_state().track_selected, 1);
    }

    #[test]
    fn switch_panel_and_quit() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut model = model_with(SyntheticCamera::new(), store);
        model.begin_manual_input();

        model.handle(Intent::SwitchPanel);
        assert_eq!(model.ui_state().active_panel, ActivePanel::Player);
        assert!(!model.ui_state().editing_manual_input);

        model.handle(Intent::Quit);
        assert!(model.should_quit());
    }
}
