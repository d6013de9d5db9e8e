//! The frame target: owned 32-bit pixel storage.

use crate::color::PixelFormat;
use crate::error::BufferError;
use crate::range::PixelRange;

/// Bytes per pixel; the buffer always stores whole 32-bit words.
pub const BYTES_PER_PIXEL: u32 = 4;

/// A raw addressable frame target.
///
/// Pixels are stored row-major as packed 32-bit words in the buffer's
/// [`PixelFormat`]. Storage is reallocated only on explicit [`resize`],
/// never during a draw.
///
/// [`resize`]: PixelBuffer::resize
pub struct PixelBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Allocate a buffer. Fails only on zero dimensions; an out-of-memory
    /// condition aborts, which matches the fatal-at-startup policy.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::ZeroSized { width, height });
        }

        Ok(Self {
            width,
            height,
            format,
            pixels: vec![0; width as usize * height as usize],
        })
    }

    /// Drop the old storage and commit a fresh allocation at the new size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::ZeroSized { width, height });
        }

        log::debug!("pixel buffer resized to {width}x{height}");
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width as usize * height as usize];
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// The full buffer extent as a range.
    pub fn bounds(&self) -> PixelRange {
        PixelRange::new(0, self.width, 0, self.height)
    }

    /// Packed pixel words, row-major. This is what the platform presents.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Packed word at (x, y), or `None` outside the buffer.
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Row stride in words. Rows are tightly packed today, but draw code
    /// goes through this rather than assuming `width`.
    pub(crate) fn stride(&self) -> usize {
        self.width as usize
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(PixelBuffer::new(0, 10, PixelFormat::XRGB).is_err());
        assert!(PixelBuffer::new(10, 0, PixelFormat::XRGB).is_err());
    }

    #[test]
    fn test_new_allocates_cleared_storage() {
        let buffer = PixelBuffer::new(4, 3, PixelFormat::XRGB).unwrap();
        assert_eq!(buffer.pixels().len(), 12);
        assert!(buffer.pixels().iter().all(|p| *p == 0));
    }

    #[test]
    fn test_resize_reallocates() {
        let mut buffer = PixelBuffer::new(4, 3, PixelFormat::XRGB).unwrap();
        buffer.resize(8, 2).unwrap();
        assert_eq!(buffer.width(), 8);
        assert_eq!(buffer.height(), 2);
        assert_eq!(buffer.pixels().len(), 16);
    }

    #[test]
    fn test_pixel_at_bounds() {
        let buffer = PixelBuffer::new(4, 3, PixelFormat::XRGB).unwrap();
        assert!(buffer.pixel_at(3, 2).is_some());
        assert!(buffer.pixel_at(4, 0).is_none());
        assert!(buffer.pixel_at(0, 3).is_none());
    }
}
