//! Core type definitions for the application

use std::time::{Duration, Instant};

use crate::player::Track;

/// How long a notification stays on screen
pub const NOTIFICATION_LIFETIME: Duration = Duration::from_secs(3);

/// Which demo is in front
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActivePanel {
    #[default]
    Scanner,
    Player,
}

impl ActivePanel {
    pub fn next(self) -> Self {
        match self {
            ActivePanel::Scanner => ActivePanel::Player,
            ActivePanel::Player => ActivePanel::Scanner,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

/// Short-lived status message
#[derive(Clone, Debug)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub raised_at: Instant,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            raised_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.raised_at.elapsed() >= NOTIFICATION_LIFETIME
    }
}

/// One row of the track list
#[derive(Clone, Debug)]
pub struct TrackRow {
    pub track: Track,
    pub liked: bool,
    pub is_current: bool,
}

/// UI state for the application
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub active_panel: ActivePanel,
    pub manual_input: String,
    pub editing_manual_input: bool,
    pub track_selected: usize,
    pub notification: Option<Notification>,
    pub confirm_clear_history: bool,
    pub show_help_popup: bool,
}
