//! Model module - Application state
//!
//! - `types`: UI state, panels and notifications
//! - `intent`: user intents accepted by the model
//! - `app_model`: the single owner of the scan session, the player and the UI state

mod types;
mod intent;
mod app_model;

pub use types::{ActivePanel, Notification, NotificationLevel, TrackRow, UiState};

pub use intent::Intent;

pub use app_model::AppModel;
