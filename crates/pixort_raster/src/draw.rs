//! Draw operations: fills, rectangles, blits, histogram bars.
//!
//! Every operation clips its target against the buffer bounds first and
//! silently does nothing when the clipped target is empty. Errors never
//! come out of a draw call.

use rayon::prelude::*;

use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::histogram::{Histogram, BUCKET_COUNT};
use crate::image::RasterImage;
use crate::range::PixelRange;

/// Pixels of blank space between histogram bars.
const BAR_SPACING: u32 = 1;

impl PixelBuffer {
    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        let packed = self.format().pack(color);
        self.pixels_mut().fill(packed);
    }

    /// [`fill`] with the per-row work handed to rayon. Same result; rows are
    /// disjoint so there are no ordering obligations.
    ///
    /// [`fill`]: PixelBuffer::fill
    pub fn par_fill(&mut self, color: Color) {
        let packed = self.format().pack(color);
        let stride = self.stride();
        self.pixels_mut()
            .par_chunks_mut(stride)
            .for_each(|row| row.fill(packed));
    }

    /// Fill a rectangle, clipped to the buffer. No-op when the clipped
    /// range is empty.
    pub fn fill_rect(&mut self, range: PixelRange, color: Color) {
        let clipped = range.clipped_to(self.width(), self.height());
        if clipped.is_empty() {
            return;
        }

        let packed = self.format().pack(color);
        let stride = self.stride();
        let (x0, x1) = (clipped.x_begin as usize, clipped.x_end as usize);
        let pixels = self.pixels_mut();
        for y in clipped.y_begin..clipped.y_end {
            let row = y as usize * stride;
            pixels[row + x0..row + x1].fill(packed);
        }
    }

    /// Draw a hollow border of `thickness` pixels just inside `range`,
    /// clipped to `clip` (typically the enclosing zone). Expressed as four
    /// filled strips so the clipped-fill primitive does all the work.
    pub fn draw_outline_rect(
        &mut self,
        range: PixelRange,
        thickness: u32,
        color: Color,
        clip: PixelRange,
    ) {
        let r = range.intersect(&clip);
        if r.is_empty() || thickness == 0 {
            return;
        }

        let t = thickness;
        // Top and bottom strips span the full width; left and right fill
        // the remaining edge columns.
        let top = PixelRange::new(r.x_begin, r.x_end, r.y_begin, (r.y_begin + t).min(r.y_end));
        let bottom = PixelRange::new(
            r.x_begin,
            r.x_end,
            r.y_end.saturating_sub(t).max(r.y_begin),
            r.y_end,
        );
        let left = PixelRange::new(r.x_begin, (r.x_begin + t).min(r.x_end), r.y_begin, r.y_end);
        let right = PixelRange::new(
            r.x_end.saturating_sub(t).max(r.x_begin),
            r.x_end,
            r.y_begin,
            r.y_end,
        );

        self.fill_rect(top, color);
        self.fill_rect(bottom, color);
        self.fill_rect(left, color);
        self.fill_rect(right, color);
    }

    /// Copy an image into the buffer at (x, y), converting each pixel
    /// through the buffer's packing. Clips against the right and bottom
    /// edges independently; x and y are unsigned so the image can never
    /// hang off the top or left.
    pub fn blit_image(&mut self, image: &RasterImage, x: u32, y: u32) {
        let copy_w = image.width().min(self.width().saturating_sub(x));
        let copy_h = image.height().min(self.height().saturating_sub(y));
        if copy_w == 0 || copy_h == 0 {
            return;
        }

        let format = self.format();
        let stride = self.stride();
        let pixels = self.pixels_mut();
        for row in 0..copy_h {
            let dst = (y + row) as usize * stride + x as usize;
            for col in 0..copy_w {
                let [r, g, b, _] = image.rgba_at(col, row);
                pixels[dst + col as usize] = format.pack(Color::rgb(r, g, b));
            }
        }
    }

    /// Blit an image stretched to exactly fill `range` (no aspect-ratio
    /// preservation). A mismatched image is resized fresh each call; a
    /// matching one is blitted directly.
    pub fn blit_image_into_range(&mut self, image: &RasterImage, range: PixelRange) {
        if range.is_empty() {
            return;
        }

        if image.width() == range.width() && image.height() == range.height() {
            self.blit_image(image, range.x_begin, range.y_begin);
        } else {
            let resized = image.resized_to(range.width(), range.height());
            self.blit_image(&resized, range.x_begin, range.y_begin);
        }
    }

    /// Draw a histogram as vertical bars inside `view`, one bar per bucket,
    /// measured from the bottom edge, with [`BAR_SPACING`] pixels between
    /// bars. Counts are normalized against `ceiling` when given, otherwise
    /// against the maximum bucket. Buckets whose bar height rounds to zero
    /// draw nothing at all.
    pub fn draw_histogram(
        &mut self,
        hist: &Histogram,
        view: PixelRange,
        bar_color: Color,
        ceiling: Option<u32>,
    ) {
        let view = view.clipped_to(self.width(), self.height());
        if view.is_empty() {
            return;
        }

        let max = ceiling.unwrap_or_else(|| hist.max_count());
        if max == 0 {
            return;
        }

        let n = BUCKET_COUNT as u32;
        let bar_width = ((view.width().saturating_sub(BAR_SPACING)) / n).saturating_sub(BAR_SPACING);
        if bar_width == 0 {
            return;
        }

        for (i, count) in hist.counts().iter().enumerate() {
            let bar_height =
                (u64::from(view.height()) * u64::from(*count) / u64::from(max)) as u32;
            if bar_height == 0 {
                continue;
            }

            let x = view.x_begin + BAR_SPACING + i as u32 * (bar_width + BAR_SPACING);
            let bar = PixelRange::new(
                x,
                x + bar_width,
                view.y_end.saturating_sub(bar_height),
                view.y_end,
            )
            .intersect(&view);
            self.fill_rect(bar, bar_color);
        }
    }
}
