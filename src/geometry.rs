//! Rectangles used when sampling images and placing them on screen.

/// A rectangle in image pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SourceRect {
    /// Create a new source rectangle.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// The whole image, anchored at the origin.
    #[inline]
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Bottom edge (exclusive), widened to avoid overflow on large atlases.
    #[inline]
    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }
}

/// A destination rectangle in screen coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl DrawRect {
    /// Create a new destination rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Place a source region at `(x, y)` scaled uniformly on both axes.
    ///
    /// ```rust
    /// use sprite_core_view::{DrawRect, SourceRect};
    ///
    /// let src = SourceRect::new(126, 0, 126, 126);
    /// let dst = DrawRect::scaled(500.0, 100.0, &src, 2.0);
    /// assert_eq!(dst, DrawRect::new(500.0, 100.0, 252.0, 252.0));
    /// ```
    #[inline]
    pub fn scaled(x: f32, y: f32, source: &SourceRect, scale: f32) -> Self {
        Self {
            x,
            y,
            width: source.width as f32 * scale,
            height: source.height as f32 * scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_rect_starts_at_origin() {
        let rect = SourceRect::full(64, 32);
        assert_eq!(rect, SourceRect::new(0, 0, 64, 32));
        assert_eq!(rect.right(), 64);
        assert_eq!(rect.bottom(), 32);
    }

    #[test]
    fn test_scale_is_applied_to_size_only() {
        let src = SourceRect::new(32, 64, 32, 16);
        let dst = DrawRect::scaled(10.0, 20.0, &src, 1.5);
        assert_eq!(dst.x, 10.0);
        assert_eq!(dst.y, 20.0);
        assert_eq!(dst.width, 48.0);
        assert_eq!(dst.height, 24.0);
    }

    #[test]
    fn test_edges_do_not_overflow() {
        let rect = SourceRect::new(u32::MAX, u32::MAX, 10, 10);
        assert_eq!(rect.right(), u32::MAX as u64 + 10);
        assert_eq!(rect.bottom(), u32::MAX as u64 + 10);
    }
}
