//! Half-open pixel rectangles in buffer coordinates.

/// A half-open rectangle `[x_begin, x_end) x [y_begin, y_end)` in unsigned
/// buffer coordinates.
///
/// A range is *empty* when either axis has `end <= begin`. Draw calls clamp
/// ranges against the buffer bounds and treat empty results as no-ops, so
/// callers may pass transiently invalid geometry without checking first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRange {
    pub x_begin: u32,
    pub x_end: u32,
    pub y_begin: u32,
    pub y_end: u32,
}

impl PixelRange {
    /// Create a range from its four edges.
    pub fn new(x_begin: u32, x_end: u32, y_begin: u32, y_end: u32) -> Self {
        Self {
            x_begin,
            x_end,
            y_begin,
            y_end,
        }
    }

    /// Create a range from an origin and a size.
    pub fn from_origin_size(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x_begin: x,
            x_end: x + width,
            y_begin: y,
            y_end: y + height,
        }
    }

    pub fn width(&self) -> u32 {
        self.x_end.saturating_sub(self.x_begin)
    }

    pub fn height(&self) -> u32 {
        self.y_end.saturating_sub(self.y_begin)
    }

    /// True when either axis spans no pixels.
    pub fn is_empty(&self) -> bool {
        self.x_end <= self.x_begin || self.y_end <= self.y_begin
    }

    /// Half-open containment: a point on `x_begin`/`y_begin` is inside,
    /// a point on `x_end`/`y_end` is outside.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x_begin && x < self.x_end && y >= self.y_begin && y < self.y_end
    }

    /// Clamp against a `width x height` extent anchored at the origin.
    /// The result may be empty; coordinates are unsigned so nothing is
    /// ever clamped against negative values.
    pub fn clipped_to(&self, width: u32, height: u32) -> PixelRange {
        PixelRange {
            x_begin: self.x_begin.min(width),
            x_end: self.x_end.min(width),
            y_begin: self.y_begin.min(height),
            y_end: self.y_end.min(height),
        }
    }

    /// Intersection of two ranges (empty when they do not overlap).
    pub fn intersect(&self, other: &PixelRange) -> PixelRange {
        PixelRange {
            x_begin: self.x_begin.max(other.x_begin),
            x_end: self.x_end.min(other.x_end),
            y_begin: self.y_begin.max(other.y_begin),
            y_end: self.y_end.min(other.y_end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_half_open_boundaries() {
        let range = PixelRange::new(10, 20, 10, 20);

        assert!(range.contains(10, 10));
        assert!(range.contains(19, 19));
        assert!(!range.contains(20, 15));
        assert!(!range.contains(15, 20));
        assert!(!range.contains(9, 15));
    }

    #[test]
    fn test_empty_ranges() {
        assert!(PixelRange::new(5, 5, 0, 10).is_empty());
        assert!(PixelRange::new(5, 3, 0, 10).is_empty());
        assert!(PixelRange::new(0, 10, 7, 7).is_empty());
        assert!(!PixelRange::new(0, 1, 0, 1).is_empty());
    }

    #[test]
    fn test_clip_to_extent() {
        let range = PixelRange::new(50, 150, 30, 90);
        let clipped = range.clipped_to(100, 60);
        assert_eq!(clipped, PixelRange::new(50, 100, 30, 60));

        // Fully outside on the x axis clips to empty.
        let outside = PixelRange::new(200, 250, 0, 10).clipped_to(100, 60);
        assert!(outside.is_empty());
    }

    #[test]
    fn test_intersect() {
        let a = PixelRange::new(0, 10, 0, 10);
        let b = PixelRange::new(5, 15, 5, 15);
        assert_eq!(a.intersect(&b), PixelRange::new(5, 10, 5, 10));

        let disjoint = PixelRange::new(20, 30, 20, 30);
        assert!(a.intersect(&disjoint).is_empty());
    }
}
