//! Scan session state machine
//!
//! `Idle -> Scanning -> Matched`, with `stop()` returning to `Idle` from either
//! active state. Frame ticks arrive from outside; a tick that lands after the
//! session stopped scanning is ignored.

use chrono::Utc;

use super::candidates::CandidateSource;
use super::capture::{CaptureSource, CaptureStream};
use super::code128::{self, ValidationResult};
use super::frame::detect_bar_pattern;
use super::history::{HistoryEntry, ScanHistory};
use crate::error::CaptureError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Scanning,
    Matched,
}

/// What one frame tick produced
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanEvent {
    /// Not scanning; the tick was dropped
    Inactive,
    /// The capture stream produced no frame
    NoFrame,
    NoPattern,
    /// Bars seen but the candidate failed validation
    Rejected(ValidationResult),
    Matched(ValidationResult),
}

/// Read-only view of the session for rendering
#[derive(Clone, Debug)]
pub struct ScanSnapshot {
    pub state: SessionState,
    pub last_result: Option<ValidationResult>,
    pub history: Vec<HistoryEntry>,
    pub frames_scanned: u64,
}

pub struct ScanSession {
    capture: Box<dyn CaptureSource>,
    candidates: Box<dyn CandidateSource>,
    history: ScanHistory,
    state: SessionState,
    stream: Option<CaptureStream>,
    last_result: Option<ValidationResult>,
    frames_scanned: u64,
}

impl ScanSession {
    pub fn new(
        capture: Box<dyn CaptureSource>,
        candidates: Box<dyn CandidateSource>,
        history: ScanHistory,
    ) -> Self {
        Self {
            capture,
            candidates,
            history,
            state: SessionState::Idle,
            stream: None,
            last_result: None,
            frames_scanned: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_scanning(&self) -> bool {
        self.state == SessionState::Scanning
    }

    pub fn last_result(&self) -> Option<&ValidationResult> {
        self.last_result.as_ref()
    }

    pub fn history(&self) -> &ScanHistory {
        &self.history
    }

    pub fn start(&mut self) -> Result<(), CaptureError> {
        if self.state == SessionState::Scanning {
            return Ok(());
        }

        match self.capture.acquire() {
            Ok(stream) => {
                tracing::info!(width = stream.width, height = stream.height, "Scanning started");
                self.stream = Some(stream);
                self.state = SessionState::Scanning;
                self.frames_scanned = 0;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not start scanning");
                self.state = SessionState::Idle;
                Err(e)
            }
        }
    }

    pub fn stop(&mut self) {
        self.release_stream();
        if self.state != SessionState::Idle {
            tracing::info!(frames = self.frames_scanned, "Scanning stopped");
        }
        self.state = SessionState::Idle;
    }

    /// Clear the displayed result; a matched session goes back to idle
    pub fn reset(&mut self) {
        self.last_result = None;
        if self.state == SessionState::Matched {
            self.state = SessionState::Idle;
        }
    }

    /// Sample and evaluate one frame
    pub fn on_frame(&mut self) -> ScanEvent {
        if self.state != SessionState::Scanning {
            return ScanEvent::Inactive;
        }
        let Some(stream) = self.stream.as_ref() else {
            return ScanEvent::Inactive;
        };
        let Some(frame) = self.capture.sample_frame(stream) else {
            return ScanEvent::NoFrame;
        };
        self.frames_scanned += 1;

        if !detect_bar_pattern(&frame) {
            return ScanEvent::NoPattern;
        }

        let candidate = self.candidates.next_candidate();
        let result = code128::decode(&candidate);
        tracing::debug!(candidate = %candidate, valid = result.is_valid(), "Bar pattern detected");

        if !result.is_valid() {
            return ScanEvent::Rejected(result);
        }

        self.release_stream();
        self.state = SessionState::Matched;
        self.record(&result);
        self.last_result = Some(result.clone());
        ScanEvent::Matched(result)
    }

    /// Validate typed-in data without touching the camera.
    ///
    /// Returns `None` for blank input, which is not worth a validation message.
    pub fn submit_manual(&mut self, text: &str) -> Option<ValidationResult> {
        let input = text.trim();
        if input.is_empty() {
            return None;
        }

        let result = code128::validate(input);
        tracing::debug!(input, valid = result.is_valid(), "Manual barcode submitted");
        if result.is_valid() {
            self.record(&result);
        }
        self.last_result = Some(result.clone());
        Some(result)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn snapshot(&self) -> ScanSnapshot {
        ScanSnapshot {
            state: self.state,
            last_result: self.last_result.clone(),
            history: self.history.entries().to_vec(),
            frames_scanned: self.frames_scanned,
        }
    }

    fn record(&mut self, result: &ValidationResult) {
        if let Some(entry) = HistoryEntry::from_result(result, Utc::now()) {
            self.history.append(entry);
        }
    }

    fn release_stream(&mut self) {
        if let Some(stream) = self.stream.take() {
            self.capture.release(stream);
        }
    }
}
