//! Decoded images ready to blit.

use image::imageops::{self, FilterType};
use image::RgbaImage;

/// A decoded image: owned, contiguous, row-major RGBA pixels.
///
/// The buffer's channel order may differ from RGBA; the blit path converts
/// each pixel through the buffer's packing, so the image keeps its decoded
/// layout untouched.
#[derive(Debug, Clone)]
pub struct RasterImage {
    data: RgbaImage,
}

impl RasterImage {
    pub fn from_rgba(data: RgbaImage) -> Self {
        Self { data }
    }

    pub fn width(&self) -> u32 {
        self.data.width()
    }

    pub fn height(&self) -> u32 {
        self.data.height()
    }

    /// RGBA channels at (x, y). Callers stay in bounds.
    pub fn rgba_at(&self, x: u32, y: u32) -> [u8; 4] {
        self.data.get_pixel(x, y).0
    }

    /// A fresh copy scaled to exactly `width x height` with nearest-neighbour
    /// sampling. No caching: the resize is regenerated every time the source
    /// and target dimensions disagree.
    pub fn resized_to(&self, width: u32, height: u32) -> RasterImage {
        RasterImage {
            data: imageops::resize(&self.data, width, height, FilterType::Nearest),
        }
    }
}
