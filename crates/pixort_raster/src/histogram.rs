//! Fixed-bucket color histograms.

use crate::image::RasterImage;
use crate::range::PixelRange;

/// Number of histogram buckets; quantizers map every pixel into
/// `[0, BUCKET_COUNT)`.
pub const BUCKET_COUNT: usize = 256;

/// How a pixel's color is quantized into a bucket index.
///
/// Every variant is deterministic and total over the bucket range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quantizer {
    /// Integer luminance approximation `(77r + 150g + 29b) >> 8`.
    #[default]
    Luminance,
    Red,
    Green,
    Blue,
}

impl Quantizer {
    /// Bucket index for a pixel; always in `[0, BUCKET_COUNT)`.
    pub fn bucket(&self, r: u8, g: u8, b: u8) -> usize {
        match self {
            Quantizer::Luminance => {
                ((77 * u32::from(r) + 150 * u32::from(g) + 29 * u32::from(b)) >> 8) as usize
            }
            Quantizer::Red => r as usize,
            Quantizer::Green => g as usize,
            Quantizer::Blue => b as usize,
        }
    }
}

/// A fixed array of bucket counts. Counts only ever accumulate; there is no
/// operation that decreases a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u32; BUCKET_COUNT],
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    pub fn new() -> Self {
        Self {
            counts: [0; BUCKET_COUNT],
        }
    }

    /// Count the pixels of `image`, or of `region` within it when given.
    /// The region is clipped against the image bounds; an empty region
    /// yields an empty histogram.
    pub fn of_image(image: &RasterImage, region: Option<PixelRange>, quantizer: Quantizer) -> Self {
        let bounds = PixelRange::new(0, image.width(), 0, image.height());
        let region = match region {
            Some(r) => r.intersect(&bounds),
            None => bounds,
        };

        let mut hist = Self::new();
        if region.is_empty() {
            return hist;
        }

        for y in region.y_begin..region.y_end {
            for x in region.x_begin..region.x_end {
                let [r, g, b, _] = image.rgba_at(x, y);
                hist.counts[quantizer.bucket(r, g, b)] += 1;
            }
        }
        hist
    }

    /// Elementwise accumulate: `self[i] += other[i]`.
    pub fn append(&mut self, other: &Histogram) {
        for (dst, src) in self.counts.iter_mut().zip(other.counts.iter()) {
            *dst += src;
        }
    }

    /// Add `n` to one bucket directly.
    pub fn add_bucket(&mut self, bucket: usize, n: u32) {
        if let Some(count) = self.counts.get_mut(bucket) {
            *count += n;
        }
    }

    pub fn counts(&self) -> &[u32; BUCKET_COUNT] {
        &self.counts
    }

    pub fn max_count(&self) -> u32 {
        *self.counts.iter().max().unwrap_or(&0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| u64::from(*c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|c| *c == 0)
    }
}
