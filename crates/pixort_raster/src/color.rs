//! Colors and 32-bit pixel packing.
//!
//! The buffer's native channel order is caller-supplied: the platform layer
//! decides how (r, g, b) map into a 32-bit word and every draw call converts
//! through the same packing. The packing is a plain value type holding the
//! channel shifts rather than a stored callback.

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
}

/// Channel ordering for a 32-bit pixel word.
///
/// Each field is the bit offset of that channel within the word; the
/// remaining byte is left zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFormat {
    r_shift: u32,
    g_shift: u32,
    b_shift: u32,
}

impl PixelFormat {
    /// `0x00RRGGBB` — the layout softbuffer and Windows DIB sections expect.
    pub const XRGB: Self = Self {
        r_shift: 16,
        g_shift: 8,
        b_shift: 0,
    };

    /// `0x00BBGGRR`.
    pub const XBGR: Self = Self {
        r_shift: 0,
        g_shift: 8,
        b_shift: 16,
    };

    /// Pack a color into the native 32-bit word.
    pub const fn pack(&self, color: Color) -> u32 {
        ((color.r as u32) << self.r_shift)
            | ((color.g as u32) << self.g_shift)
            | ((color.b as u32) << self.b_shift)
    }

    /// Recover the color from a packed word (test and inspection helper).
    pub const fn unpack(&self, value: u32) -> Color {
        Color {
            r: ((value >> self.r_shift) & 0xFF) as u8,
            g: ((value >> self.g_shift) & 0xFF) as u8,
            b: ((value >> self.b_shift) & 0xFF) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xrgb_packing() {
        let c = Color::rgb(0x12, 0x34, 0x56);
        assert_eq!(PixelFormat::XRGB.pack(c), 0x0012_3456);
    }

    #[test]
    fn test_xbgr_packing() {
        let c = Color::rgb(0x12, 0x34, 0x56);
        assert_eq!(PixelFormat::XBGR.pack(c), 0x0056_3412);
    }

    #[test]
    fn test_pack_unpack_round_trip() {
        let c = Color::rgb(200, 100, 50);
        for format in [PixelFormat::XRGB, PixelFormat::XBGR] {
            assert_eq!(format.unpack(format.pack(c)), c);
        }
    }
}
