//! Periodic tick tasks
//!
//! Both tasks keep running while the app is up. Stopping a scan or pausing
//! playback does not cancel them; each tick re-checks the state under the lock
//! and does nothing if there is nothing to advance.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use crate::scanner::ScanEvent;
use super::AppController;

/// Camera sampling rate
pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Playback clock period; each tick advances playback by the same amount
pub const PLAYBACK_TICK: Duration = Duration::from_millis(250);

impl AppController {
    pub fn start_tickers(&self) -> Vec<JoinHandle<()>> {
        tracing::info!(
            frame_ms = FRAME_INTERVAL.as_millis() as u64,
            playback_ms = PLAYBACK_TICK.as_millis() as u64,
            "Starting tickers"
        );
        vec![self.spawn_frame_ticker(), self.spawn_playback_ticker()]
    }

    fn spawn_frame_ticker(&self) -> JoinHandle<()> {
        let model = self.model.clone();

        tokio::spawn(async move {
            let mut ticker = interval(FRAME_INTERVAL);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                let mut model = model.lock().await;
                if model.should_quit() {
                    tracing::debug!("Frame ticker shutting down");
                    break;
                }

                match model.on_frame_tick() {
                    ScanEvent::Matched(result) => {
                        tracing::info!(data = %result.data, "Scan matched");
                    }
                    ScanEvent::Rejected(result) => {
                        tracing::debug!(data = %result.data, "Detected candidate rejected");
                    }
                    ScanEvent::NoFrame => tracing::trace!("Capture produced no frame"),
                    ScanEvent::NoPattern | ScanEvent::Inactive => {}
                }
            }
        })
    }

    fn spawn_playback_ticker(&self) -> JoinHandle<()> {
        let model = self.model.clone();
        let step = PLAYBACK_TICK.as_secs_f64();

        tokio::spawn(async move {
            let mut ticker = interval(PLAYBACK_TICK);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                let mut model = model.lock().await;
                if model.should_quit() {
                    tracing::debug!("Playback ticker shutting down");
                    break;
                }
                model.on_playback_tick(step);
            }
        })
    }
}
