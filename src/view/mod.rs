//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Top bar with panel tabs and scanner status
//! - `scanner`: Scanner panel (result, manual entry, history)
//! - `player`: Track list
//! - `progress`: Now-playing progress bar
//! - `overlays`: Notifications, confirmation and help popups

mod utils;
mod layout;
mod scanner;
mod player;
mod progress;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{ActivePanel, TrackRow, UiState};
use crate::player::{PlaybackSnapshot, PlaybackStatus};
use crate::scanner::ScanSnapshot;

/// Everything one frame of the UI is drawn from
pub struct ViewData {
    pub ui_state: UiState,
    pub scan: ScanSnapshot,
    pub checksum: Option<u8>,
    pub playback: PlaybackSnapshot,
    pub tracks: Vec<TrackRow>,
}

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, data: &ViewData) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs + scanner status
                Constraint::Min(0),    // Active panel
                Constraint::Length(3), // Progress bar with playback info
            ])
            .split(frame.area());

        let ui_state = &data.ui_state;

        layout::render_top_bar(frame, chunks[0], ui_state, data.scan.state, data.scan.history.len());

        match ui_state.active_panel {
            ActivePanel::Scanner => {
                scanner::render_scanner_panel(frame, chunks[1], ui_state, &data.scan, data.checksum);
            }
            ActivePanel::Player => {
                let is_playing = data.playback.status == PlaybackStatus::Playing;
                player::render_track_list(frame, chunks[1], ui_state, &data.tracks, is_playing);
            }
        }

        // Bottom: now playing, visible from both panels
        progress::render_progress_bar(frame, chunks[2], &data.playback);

        if ui_state.confirm_clear_history {
            overlays::render_clear_history_prompt(frame, data.scan.history.len());
        }

        if let Some(notification) = &ui_state.notification {
            overlays::render_notification(frame, notification);
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ratatui::{Terminal, backend::TestBackend};

    use crate::model::{AppModel, Intent};
    use crate::storage::{KeyValueStore, MemoryStore};

    fn view_data(model: &AppModel) -> ViewData {
        ViewData {
            ui_state: model.ui_state().clone(),
            scan: model.scan_snapshot(),
            checksum: model.last_checksum(),
            playback: model.playback_snapshot(),
            tracks: model.track_rows(),
        }
    }

    fn rendered_text(model: &AppModel) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let data = view_data(model);
        terminal.draw(|f| AppView::render(f, &data)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn model() -> AppModel {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        AppModel::with_store(store)
    }

    #[test]
    fn scanner_panel_shows_validated_barcode() {
        let mut model = model();
        model.handle(Intent::ManualSubmit("CODE128DEMO".to_string()));

        let text = rendered_text(&model);
        assert!(text.contains("CODE128DEMO"));
        assert!(text.contains("Code128-B"));
        assert!(text.contains("History (1)"));
    }

    #[test]
    fn player_panel_lists_tracks() {
        let mut model = model();
        model.handle(Intent::SwitchPanel);
        model.handle(Intent::Play(0));

        let text = rendered_text(&model);
        assert!(text.contains("Midnight Drive"));
        assert!(text.contains("Neon Coast"));
    }

    #[test]
    fn overlays_render_without_panicking() {
        let mut model = model();
        model.handle(Intent::ManualSubmit("BARCODE001".to_string()));
        model.request_clear_history();
        model.toggle_help_popup();

        let text = rendered_text(&model);
        assert!(text.contains("Help"));
    }
}
