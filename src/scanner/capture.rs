//! Frame capture collaborator
//!
//! The scan session only talks to a [`CaptureSource`]. The shipped
//! implementation is [`SyntheticCamera`], which renders flat noisy frames and,
//! every few frames, a frame with a band of bars across the middle.

use rand::Rng;

use super::frame::Frame;
use crate::error::CaptureError;

pub const DEFAULT_FRAME_WIDTH: usize = 320;
pub const DEFAULT_FRAME_HEIGHT: usize = 240;
const DEFAULT_PATTERN_EVERY: u64 = 12;
// Matches the detector's sampling stride so every sample lands on a new bar
const BAR_WIDTH: usize = 10;

/// Handle to an acquired capture stream
#[derive(Debug, PartialEq, Eq)]
pub struct CaptureStream {
    id: u64,
    pub width: usize,
    pub height: usize,
}

pub trait CaptureSource: Send {
    fn acquire(&mut self) -> Result<CaptureStream, CaptureError>;

    /// Next frame from `stream`, or `None` if the stream is no longer live
    fn sample_frame(&mut self, stream: &CaptureStream) -> Option<Frame>;

    fn release(&mut self, stream: CaptureStream);
}

/// Simulated camera producing synthetic frames
pub struct SyntheticCamera {
    width: usize,
    height: usize,
    pattern_every: u64,
    available: bool,
    next_id: u64,
    active: Option<u64>,
    frames_sampled: u64,
}

impl SyntheticCamera {
    pub fn new() -> Self {
        Self {
            width: DEFAULT_FRAME_WIDTH,
            height: DEFAULT_FRAME_HEIGHT,
            pattern_every: DEFAULT_PATTERN_EVERY,
            available: true,
            next_id: 1,
            active: None,
            frames_sampled: 0,
        }
    }

    /// Show bars on every `n`th frame (0 disables bars entirely)
    pub fn with_pattern_every(mut self, n: u64) -> Self {
        self.pattern_every = n;
        self
    }

    /// A camera that refuses every `acquire`, like a denied permission prompt
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    fn render_noise(&self) -> Frame {
        let mut rng = rand::thread_rng();
        let mut frame = Frame::solid(self.width, self.height, 0);
        for y in 0..self.height {
            for x in 0..self.width {
                // Stays well under the brightness threshold
                let level = rng.gen_range(70..=110);
                frame.set_pixel(x, y, [level, level, level]);
            }
        }
        frame
    }

    fn render_bars(&self) -> Frame {
        let mut rng = rand::thread_rng();
        let mut frame = self.render_noise();

        let band_top = self.height * 3 / 8;
        let band_bottom = self.height * 5 / 8;

        let mut x = self.width / 10;
        let right_edge = self.width - self.width / 10;
        let mut bright = true;
        while x < right_edge {
            if bright {
                let shade = rng.gen_range(200..=255);
                for bx in x..(x + BAR_WIDTH).min(right_edge) {
                    for y in band_top..band_bottom {
                        frame.set_pixel(bx, y, [shade, shade, shade]);
                    }
                }
            }
            bright = !bright;
            x += BAR_WIDTH;
        }
        frame
    }
}

impl Default for SyntheticCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSource for SyntheticCamera {
    fn acquire(&mut self) -> Result<CaptureStream, CaptureError> {
        if !self.available {
            return Err(CaptureError::Unavailable("no camera device found".to_string()));
        }
        if self.active.is_some() {
            return Err(CaptureError::Unavailable("camera is already in use".to_string()));
        }

        let id = self.next_id;
        self.next_id += 1;
        self.active = Some(id);
        self.frames_sampled = 0;
        tracing::debug!(stream_id = id, width = self.width, height = self.height, "Synthetic camera acquired");

        Ok(CaptureStream {
            id,
            width: self.width,
            height: self.height,
        })
    }

    fn sample_frame(&mut self, stream: &CaptureStream) -> Option<Frame> {
        if self.active != Some(stream.id) {
            return None;
        }

        self.frames_sampled += 1;
        let show_bars = self.pattern_every > 0 && self.frames_sampled % self.pattern_every == 0;
        Some(if show_bars { self.render_bars() } else { self.render_noise() })
    }

    fn release(&mut self, stream: CaptureStream) {
        if self.active == Some(stream.id) {
            self.active = None;
            tracing::debug!(stream_id = stream.id, frames = self.frames_sampled, "Synthetic camera released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::frame::detect_bar_pattern;

    #[test]
    fn unavailable_camera_refuses_acquire() {
        let mut camera = SyntheticCamera::unavailable();
        assert!(matches!(camera.acquire(), Err(CaptureError::Unavailable(_))));
    }

    #[test]
    fn bars_appear_on_the_configured_frame() {
        let mut camera = SyntheticCamera::new().with_pattern_every(3);
        let stream = camera.acquire().unwrap();

        let detections: Vec<bool> = (0..6)
            .map(|_| detect_bar_pattern(&camera.sample_frame(&stream).unwrap()))
            .collect();
        assert_eq!(detections, vec![false, false, true, false, false, true]);
    }

    #[test]
    fn released_stream_yields_no_frames() {
        let mut camera = SyntheticCamera::new();
        let stream = camera.acquire().unwrap();
        let stale = CaptureStream { id: 999, width: 0, height: 0 };
        assert!(camera.sample_frame(&stale).is_none());

        let id = stream.id;
        camera.release(stream);
        assert!(camera.sample_frame(&CaptureStream { id, width: 0, height: 0 }).is_none());

        // A fresh acquire works after release
        assert!(camera.acquire().is_ok());
    }
}
