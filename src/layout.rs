//! Zone partition of the pixel buffer and point hit testing.
//!
//! The buffer splits into three vertical bands: the image-preview zone on
//! the left, a narrow strip hosting the region-select toggle icon, and the
//! category panel on the right half. The category panel is divided into one
//! horizontal strip per configured category, split evenly by height with
//! the remainder going to the last strip.
//!
//! The panel takes exactly half the buffer width so the histogram bar
//! formula yields visible bars for 256 buckets.

use pixort_raster::PixelRange;

use crate::constants::{TOGGLE_ICON_SIZE, TOGGLE_STRIP_WIDTH};

/// Computed zone rectangles for one session. Built once when sorting
/// starts and whenever the buffer dimensions change.
#[derive(Debug, Clone)]
pub struct SessionLayout {
    image_zone: PixelRange,
    toggle_icon: PixelRange,
    category_panel: PixelRange,
    category_count: usize,
}

impl SessionLayout {
    pub fn new(width: u32, height: u32, category_count: usize) -> Self {
        let panel_begin = width / 2;
        let strip_begin = panel_begin.saturating_sub(TOGGLE_STRIP_WIDTH);

        Self {
            image_zone: PixelRange::new(0, strip_begin, 0, height),
            toggle_icon: PixelRange::new(
                strip_begin,
                panel_begin.min(strip_begin + TOGGLE_ICON_SIZE),
                0,
                TOGGLE_ICON_SIZE.min(height),
            ),
            category_panel: PixelRange::new(panel_begin, width, 0, height),
            category_count,
        }
    }

    pub fn image_zone(&self) -> PixelRange {
        self.image_zone
    }

    pub fn toggle_icon(&self) -> PixelRange {
        self.toggle_icon
    }

    pub fn category_panel(&self) -> PixelRange {
        self.category_panel
    }

    /// Strip for category `index`; even vertical split of the panel, the
    /// last strip absorbing the rounding remainder.
    pub fn category_zone(&self, index: usize) -> PixelRange {
        debug_assert!(index < self.category_count);
        let panel = self.category_panel;
        let count = self.category_count.max(1) as u32;
        let strip_height = panel.height() / count;

        let y_begin = panel.y_begin + index as u32 * strip_height;
        let y_end = if index + 1 == self.category_count {
            panel.y_end
        } else {
            y_begin + strip_height
        };

        PixelRange::new(panel.x_begin, panel.x_end, y_begin, y_end)
    }

    /// Which category strip contains the point, if any.
    pub fn category_at(&self, x: u32, y: u32) -> Option<usize> {
        (0..self.category_count).find(|i| self.category_zone(*i).contains(x, y))
    }
}

/// Half-open point-in-range test.
pub fn hit_test(x: u32, y: u32, range: PixelRange) -> bool {
    range.contains(x, y)
}

/// Map normalized coordinates onto buffer pixels: `floor(n * extent)`.
///
/// Inputs are assumed in `[0, 1)`; no clamping happens here, so the
/// platform layer must never report exactly 1.0.
pub fn map_normalized(nx: f64, ny: f64, width: u32, height: u32) -> (u32, u32) {
    (
        (nx * f64::from(width)) as u32,
        (ny * f64::from(height)) as u32,
    )
}
