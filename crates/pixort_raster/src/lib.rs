//! Direct-to-buffer 2D software rasterizer.
//!
//! Everything here writes into a [`PixelBuffer`]: solid fills, clipped
//! rectangles, outlined rectangles, image blits (with nearest-neighbour
//! resize) and histogram bar charts. Drawing is best-effort by design:
//! a degenerate or fully clipped target rectangle makes the call a silent
//! no-op so that transient geometry can never interrupt a frame.

mod buffer;
mod color;
mod draw;
mod error;
mod histogram;
mod image;
mod range;

pub use buffer::{PixelBuffer, BYTES_PER_PIXEL};
pub use color::{Color, PixelFormat};
pub use error::BufferError;
pub use histogram::{Histogram, Quantizer, BUCKET_COUNT};
pub use image::RasterImage;
pub use range::PixelRange;
