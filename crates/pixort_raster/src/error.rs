//! Error types for buffer construction.

use thiserror::Error;

/// Errors raised when creating or resizing a [`crate::PixelBuffer`].
///
/// Drawing never produces errors: degenerate geometry is a silent no-op.
#[derive(Debug, Error)]
pub enum BufferError {
    #[error("pixel buffer dimensions must be non-zero (got {width}x{height})")]
    ZeroSized { width: u32, height: u32 },
}
