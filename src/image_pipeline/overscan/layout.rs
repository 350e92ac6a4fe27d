use std::ops::Range;

use crate::image_pipeline::common::error::{Result, SkipperError};

/// Column geometry of one de-interleaved readout row.
///
/// Each half of the row holds `active_cols / 2` active columns followed
/// (left half) or preceded (right half) by overscan. `guard_cols`
/// columns next to the active area are left out of the left window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverscanLayout {
    image_cols: usize,
    active_cols: usize,
    guard_cols: usize,
    trim: usize,
    min_trimmed_count: usize,
}

impl OverscanLayout {
    /// Geometry of the Skipper CCD readout this tool was written for.
    pub const SKIPPER: Self = Self {
        image_cols: 1000,
        active_cols: 452 * 2,
        guard_cols: 3,
        trim: 4,
        min_trimmed_count: 4,
    };

    pub fn new(image_cols: usize, active_cols: usize, guard_cols: usize, trim: usize) -> Result<Self> {
        let half = image_cols / 2;
        let used = active_cols / 2 + guard_cols + 1;
        if image_cols < 2 || used >= half {
            return Err(SkipperError::InvalidRegion(format!(
                "no overscan columns left: image {} cols, active {}, guard {}",
                image_cols, active_cols, guard_cols
            )));
        }

        Ok(Self {
            image_cols,
            active_cols,
            guard_cols,
            trim,
            min_trimmed_count: Self::SKIPPER.min_trimmed_count,
        })
    }

    /// Window size at or below which the trimmed mean divides by the
    /// full count instead of the trimmed count.
    pub fn with_min_trimmed_count(mut self, min_trimmed_count: usize) -> Self {
        self.min_trimmed_count = min_trimmed_count;
        self
    }

    pub fn image_cols(&self) -> usize {
        self.image_cols
    }

    pub fn active_cols(&self) -> usize {
        self.active_cols
    }

    pub fn guard_cols(&self) -> usize {
        self.guard_cols
    }

    pub fn trim(&self) -> usize {
        self.trim
    }

    pub fn min_trimmed_count(&self) -> usize {
        self.min_trimmed_count
    }

    /// First column of the right half.
    pub fn half_width(&self) -> usize {
        self.image_cols / 2
    }

    pub fn window_width(&self) -> usize {
        (self.image_cols / 2 - self.active_cols / 2) - self.guard_cols - 1
    }

    pub fn left_window(&self) -> Range<usize> {
        let start = self.active_cols / 2 + self.guard_cols;
        start..start + self.window_width()
    }

    pub fn right_window(&self) -> Range<usize> {
        let start = self.half_width();
        start..start + self.window_width()
    }
}

impl Default for OverscanLayout {
    fn default() -> Self {
        Self::SKIPPER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipper_windows() {
        let layout = OverscanLayout::SKIPPER;
        assert_eq!(layout.window_width(), 44);
        assert_eq!(layout.left_window(), 455..499);
        assert_eq!(layout.right_window(), 500..544);
        assert_eq!(layout.half_width(), 500);
    }

    #[test]
    fn test_custom_layout() {
        let layout = OverscanLayout::new(40, 16, 1, 2).unwrap();
        assert_eq!(layout.window_width(), 10);
        assert_eq!(layout.left_window(), 9..19);
        assert_eq!(layout.right_window(), 20..30);
        assert_eq!(layout.trim(), 2);
    }

    #[test]
    fn test_layout_without_overscan_is_rejected() {
        let result = OverscanLayout::new(20, 16, 1, 2);
        assert!(matches!(result, Err(SkipperError::InvalidRegion(_))));
    }
}
