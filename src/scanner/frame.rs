//! Brightness-threshold bar pattern detection
//!
//! Samples every 10th pixel on every 10th row across the middle band of the
//! frame (30%..70% of the height), thresholds each sample into light/dark and
//! reports a pattern when any sampled row flips between light and dark more
//! than 10 times.

const BAND_START: f64 = 0.3;
const BAND_END: f64 = 0.7;
const SAMPLE_STRIDE: usize = 10;
const BRIGHTNESS_THRESHOLD: u32 = 128;
const MIN_TRANSITIONS: usize = 10;

/// Bytes per RGBA pixel
pub const PIXEL_BYTES: usize = 4;

/// One captured RGBA frame
#[derive(Clone, Debug)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl Frame {
    /// Frame filled with one gray level
    pub fn solid(width: usize, height: usize, level: u8) -> Self {
        let mut pixels = vec![level; width * height * PIXEL_BYTES];
        for alpha in pixels.iter_mut().skip(3).step_by(PIXEL_BYTES) {
            *alpha = u8::MAX;
        }
        Self { width, height, pixels }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let idx = (y * self.width + x) * PIXEL_BYTES;
        if let Some(px) = self.pixels.get_mut(idx..idx + 3) {
            px.copy_from_slice(&rgb);
        }
    }

    fn is_bright(&self, x: usize, y: usize) -> Option<bool> {
        let idx = (y * self.width + x) * PIXEL_BYTES;
        let px = self.pixels.get(idx..idx + 3)?;
        // mean(r, g, b) > threshold, without truncating the mean
        let sum = px[0] as u32 + px[1] as u32 + px[2] as u32;
        Some(sum > BRIGHTNESS_THRESHOLD * 3)
    }
}

/// True when the frame looks like it contains bars
pub fn detect_bar_pattern(frame: &Frame) -> bool {
    let start_row = (frame.height as f64 * BAND_START).floor() as usize;
    let end_row = (frame.height as f64 * BAND_END).floor() as usize;

    (start_row..end_row)
        .step_by(SAMPLE_STRIDE)
        .any(|y| row_transitions(frame, y) > MIN_TRANSITIONS)
}

fn row_transitions(frame: &Frame, y: usize) -> usize {
    let mut transitions = 0;
    let mut previous = None;

    for x in (0..frame.width).step_by(SAMPLE_STRIDE) {
        // Missing pixels count as dark
        let bright = frame.is_bright(x, y).unwrap_or(false);
        if previous.is_some_and(|p| p != bright) {
            transitions += 1;
        }
        previous = Some(bright);
    }

    transitions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn striped(width: usize, height: usize, bar_width: usize) -> Frame {
        let mut frame = Frame::solid(width, height, 0);
        for y in 0..height {
            for x in 0..width {
                if (x / bar_width) % 2 == 0 {
                    frame.set_pixel(x, y, [255, 255, 255]);
                }
            }
        }
        frame
    }

    #[test]
    fn flat_frame_has_no_pattern() {
        assert!(!detect_bar_pattern(&Frame::solid(320, 240, 200)));
        assert!(!detect_bar_pattern(&Frame::solid(320, 240, 10)));
    }

    #[test]
    fn stripes_at_sampling_width_are_detected() {
        // Bars 10px wide flip on every sample: 31 transitions across 320px
        assert!(detect_bar_pattern(&striped(320, 240, 10)));
    }

    #[test]
    fn too_few_stripes_are_ignored() {
        // 80px bars over 320px give only 3 transitions per row
        assert!(!detect_bar_pattern(&striped(320, 240, 80)));
    }

    #[test]
    fn stripes_outside_the_middle_band_are_ignored() {
        let mut frame = Frame::solid(320, 240, 0);
        for y in 0..40 {
            for x in (0..320).step_by(20) {
                for dx in 0..10 {
                    frame.set_pixel(x + dx, y, [255, 255, 255]);
                }
            }
        }
        assert!(!detect_bar_pattern(&frame));
    }

    #[test]
    fn threshold_is_strictly_greater_than_128() {
        let mut frame = Frame::solid(320, 240, 0);
        for y in 0..240 {
            for x in (0..320).step_by(20) {
                for dx in 0..10 {
                    frame.set_pixel(x + dx, y, [128, 128, 128]);
                }
            }
        }
        assert!(!detect_bar_pattern(&frame));
    }

    #[test]
    fn empty_frame_is_not_a_pattern() {
        assert!(!detect_bar_pattern(&Frame { width: 0, height: 0, pixels: Vec::new() }));
    }
}
