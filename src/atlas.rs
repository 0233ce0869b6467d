//! Sprite-sheet tile addressing.
//!
//! An atlas is a single image holding equally sized tiles laid out left to
//! right, top to bottom. Frame `n` of an animation lives at column
//! `n % frames_per_row` and row `n / frames_per_row + row_offset`.

use crate::error::{Result, SpriteError};
use crate::geometry::SourceRect;

/// Immutable tile layout of an atlas image.
///
/// ## Example
///
/// ```rust
/// use sprite_core_view::{AtlasLayout, SourceRect};
///
/// // Two 126px tiles per row in a 252px wide sheet.
/// let layout = AtlasLayout::new(126, 126, 252, 0).unwrap();
/// assert_eq!(layout.frames_per_row(), 2);
/// assert_eq!(layout.tile_rect(6), SourceRect::new(0, 378, 126, 126));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtlasLayout {
    tile_width: u32,
    tile_height: u32,
    atlas_width: u32,
    row_offset: u32,
    /// Cached `atlas_width / tile_width`
    frames_per_row: u32,
}

impl AtlasLayout {
    /// Create a layout for tiles of `tile_width` x `tile_height` pixels in an
    /// atlas `atlas_width` pixels wide, skipping `row_offset` rows.
    ///
    /// Fails when a tile dimension is zero or a tile is wider than the atlas.
    pub fn new(
        tile_width: u32,
        tile_height: u32,
        atlas_width: u32,
        row_offset: u32,
    ) -> Result<Self> {
        if tile_width == 0 || tile_height == 0 {
            return Err(SpriteError::InvalidConfiguration(format!(
                "tile dimensions must be positive, got {tile_width}x{tile_height}"
            )));
        }

        let frames_per_row = atlas_width / tile_width;
        if frames_per_row == 0 {
            return Err(SpriteError::InvalidConfiguration(format!(
                "tile width {tile_width} exceeds atlas width {atlas_width}"
            )));
        }

        Ok(Self {
            tile_width,
            tile_height,
            atlas_width,
            row_offset,
            frames_per_row,
        })
    }

    #[inline]
    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    #[inline]
    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    #[inline]
    pub fn atlas_width(&self) -> u32 {
        self.atlas_width
    }

    #[inline]
    pub fn row_offset(&self) -> u32 {
        self.row_offset
    }

    /// Number of tiles that fit horizontally in the atlas (always >= 1).
    #[inline]
    pub fn frames_per_row(&self) -> u32 {
        self.frames_per_row
    }

    /// Source rectangle of frame `frame_index`.
    ///
    /// Coordinates saturate at `u32::MAX` for indices far beyond any real atlas.
    pub fn tile_rect(&self, frame_index: usize) -> SourceRect {
        let per_row = self.frames_per_row as u64;
        let index = frame_index as u64;
        let column = index % per_row;
        let row = (index / per_row).saturating_add(self.row_offset as u64);
        self.rect_at(column, row)
    }

    /// Source rectangle of the tile at grid position `(column, row)`.
    ///
    /// The row offset applies here too, so `tile_at(0, 0)` is the first tile
    /// of this layout's animation.
    pub fn tile_at(&self, column: u32, row: u32) -> SourceRect {
        self.rect_at(column as u64, (row as u64).saturating_add(self.row_offset as u64))
    }

    /// Rows, including the offset, spanned by an animation of `frame_count` frames.
    ///
    /// Saturates at `u64::MAX`.
    pub fn rows_needed(&self, frame_count: usize) -> u64 {
        let per_row = self.frames_per_row as u64;
        (frame_count as u64)
            .div_ceil(per_row)
            .saturating_add(self.row_offset as u64)
    }

    /// Check that every frame of `frame_count` lies inside an atlas
    /// `atlas_height` pixels tall.
    pub fn fits_height(&self, frame_count: usize, atlas_height: u32) -> bool {
        self.rows_needed(frame_count)
            .checked_mul(self.tile_height as u64)
            .is_some_and(|needed| needed <= atlas_height as u64)
    }

    fn rect_at(&self, column: u64, row: u64) -> SourceRect {
        let clamp = |v: u64| u32::try_from(v).unwrap_or(u32::MAX);
        SourceRect {
            x: clamp(column.saturating_mul(self.tile_width as u64)),
            y: clamp(row.saturating_mul(self.tile_height as u64)),
            width: self.tile_width,
            height: self.tile_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid_32() -> AtlasLayout {
        AtlasLayout::new(32, 32, 128, 0).unwrap()
    }

    #[test]
    fn test_first_row() {
        let layout = grid_32();
        assert_eq!(layout.frames_per_row(), 4);
        assert_eq!(layout.tile_rect(0), SourceRect::new(0, 0, 32, 32));
        assert_eq!(layout.tile_rect(3), SourceRect::new(96, 0, 32, 32));
    }

    #[test]
    fn test_wraps_to_next_row() {
        assert_eq!(grid_32().tile_rect(4), SourceRect::new(0, 32, 32, 32));
    }

    #[test]
    fn test_row_offset() {
        let layout = AtlasLayout::new(32, 32, 128, 2).unwrap();
        assert_eq!(layout.tile_rect(0), SourceRect::new(0, 64, 32, 32));
        assert_eq!(layout.tile_rect(5), SourceRect::new(32, 96, 32, 32));
    }

    #[test]
    fn test_seven_frame_sheet() {
        let layout = AtlasLayout::new(126, 126, 252, 0).unwrap();
        assert_eq!(layout.frames_per_row(), 2);
        assert_eq!(layout.tile_rect(6), SourceRect::new(0, 378, 126, 126));
    }

    #[test]
    fn test_partial_tiles_are_ignored() {
        // 100 / 32 = 3 whole tiles per row
        let layout = AtlasLayout::new(32, 16, 100, 0).unwrap();
        assert_eq!(layout.frames_per_row(), 3);
        assert_eq!(layout.tile_rect(3), SourceRect::new(0, 16, 32, 16));
    }

    #[test]
    fn test_tile_at_uses_both_coordinates() {
        let layout = AtlasLayout::new(16, 24, 64, 1).unwrap();
        assert_eq!(layout.tile_at(2, 3), SourceRect::new(32, 96, 16, 24));
    }

    #[test]
    fn test_invalid_layouts() {
        assert!(matches!(
            AtlasLayout::new(0, 32, 128, 0),
            Err(SpriteError::InvalidConfiguration(_))
        ));
        assert!(AtlasLayout::new(32, 0, 128, 0).is_err());
        assert!(AtlasLayout::new(129, 32, 128, 0).is_err());
    }

    #[test]
    fn test_fits_height() {
        let layout = AtlasLayout::new(126, 126, 252, 0).unwrap();
        assert_eq!(layout.rows_needed(7), 4);
        assert!(layout.fits_height(7, 504));
        assert!(!layout.fits_height(7, 503));

        let offset = AtlasLayout::new(32, 32, 128, 2).unwrap();
        assert_eq!(offset.rows_needed(4), 3);
        assert!(offset.fits_height(4, 96));
        assert!(!offset.fits_height(5, 96));
    }

    #[test]
    fn test_huge_index_saturates() {
        let layout = AtlasLayout::new(32, 32, 32, 0).unwrap();
        assert_eq!(layout.tile_rect(usize::MAX), SourceRect::new(0, u32::MAX, 32, 32));

        let offset = AtlasLayout::new(32, 32, 32, u32::MAX).unwrap();
        assert_eq!(offset.tile_rect(usize::MAX).y, u32::MAX);
        assert_eq!(
            offset.tile_at(u32::MAX, u32::MAX),
            SourceRect::new(u32::MAX, u32::MAX, 32, 32)
        );
    }

    #[test]
    fn test_huge_frame_count_does_not_fit() {
        let layout = AtlasLayout::new(32, 32, 32, 0).unwrap();
        assert_eq!(layout.rows_needed(usize::MAX), usize::MAX as u64);
        assert!(!layout.fits_height(usize::MAX, u32::MAX));

        let offset = AtlasLayout::new(1, 1, 1, u32::MAX).unwrap();
        assert_eq!(offset.rows_needed(usize::MAX), u64::MAX);
        assert!(!offset.fits_height(usize::MAX, u32::MAX));
    }

    proptest! {
        #[test]
        fn test_tile_rect_is_pure(
            tw in 1u32..256,
            th in 1u32..256,
            extra in 0u32..1024,
            offset in 0u32..8,
            index in 0usize..4096,
        ) {
            let layout = AtlasLayout::new(tw, th, tw + extra, offset).unwrap();
            prop_assert_eq!(layout.tile_rect(index), layout.tile_rect(index));
        }

        #[test]
        fn test_tile_rect_stays_in_row_width(
            tw in 1u32..256,
            th in 1u32..256,
            extra in 0u32..1024,
            index in 0usize..4096,
        ) {
            let layout = AtlasLayout::new(tw, th, tw + extra, 0).unwrap();
            let rect = layout.tile_rect(index);
            prop_assert!(rect.right() <= layout.atlas_width() as u64);
            prop_assert_eq!(rect.x % tw, 0);
            prop_assert_eq!(rect.y % th, 0);
        }
    }
}
