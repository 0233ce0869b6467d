//! Renderable sprite objects.

use std::fmt;
use std::rc::Rc;

use crate::animation::{FrameAnimator, STATIC_FRAME_DURATION};
use crate::atlas::AtlasLayout;
use crate::backend::RenderBackend;
use crate::config::{SpriteConfig, SpriteSource};
use crate::error::{Result, SpriteError};
use crate::geometry::{DrawRect, SourceRect};

/// Where a sprite is drawn and how much it is scaled.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Left edge in screen pixels
    pub x: f32,
    /// Top edge in screen pixels
    pub y: f32,
    /// Uniform scale applied to both axes
    pub scale: f32,
}

impl Placement {
    pub fn new(x: f32, y: f32, scale: f32) -> Self {
        Self { x, y, scale }
    }

    /// Unscaled placement at `(x, y)`.
    pub fn at(x: f32, y: f32) -> Self {
        Self::new(x, y, 1.0)
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::at(0.0, 0.0)
    }
}

/// Tile layout of an animated sprite sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SheetSpec {
    pub tile_width: u32,
    pub tile_height: u32,
    /// Number of frames in the animation (1 for a static tile)
    pub frame_count: usize,
    /// Tile rows to skip before frame 0
    pub row_offset: u32,
}

impl SheetSpec {
    /// A single static tile of the given size in the first row.
    pub fn new(tile_width: u32, tile_height: u32) -> Self {
        Self {
            tile_width,
            tile_height,
            frame_count: 1,
            row_offset: 0,
        }
    }

    pub fn with_frame_count(mut self, frame_count: usize) -> Self {
        self.frame_count = frame_count;
        self
    }

    pub fn with_row_offset(mut self, row_offset: u32) -> Self {
        self.row_offset = row_offset;
        self
    }
}

/// How a sprite's images map to animation frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameMode {
    /// One whole image per frame
    Discrete,
    /// Frames are tiles of a single atlas image
    Atlas { layout: AtlasLayout, frame_count: usize },
    /// One fixed tile of an atlas image
    Tile { source: SourceRect },
}

/// A positioned, optionally animated sprite.
///
/// A sprite owns the images it loaded and releases each of them exactly once
/// when dropped. Construction either returns a fully loaded sprite or an error,
/// in which case any image loaded along the way has already been released.
///
/// ## Example
///
/// ```rust
/// use std::rc::Rc;
/// use sprite_core_view::render::CommandBuffer;
/// use sprite_core_view::{Placement, Sprite};
///
/// let buffer = Rc::new(
///     CommandBuffer::new()
///         .with_image("idle/0.png", 32, 32)
///         .with_image("idle/1.png", 32, 32),
/// );
/// let paths = ["idle/0.png", "idle/1.png"];
/// let mut sprite = Sprite::frames(&buffer, &paths, Placement::new(300.0, 300.0, 2.0), 0.2)?;
///
/// sprite.render(0.2);
/// assert_eq!(sprite.current_frame(), 1);
/// assert_eq!(buffer.commands()[0].path, "idle/1.png");
/// # Ok::<(), sprite_core_view::SpriteError>(())
/// ```
pub struct Sprite<B: RenderBackend> {
    backend: Rc<B>,
    images: Vec<B::Image>,
    mode: FrameMode,
    animator: FrameAnimator,
    placement: Placement,
}

impl<B: RenderBackend> Sprite<B> {
    fn empty(backend: &Rc<B>, placement: Placement, animator: FrameAnimator) -> Self {
        Self {
            backend: Rc::clone(backend),
            images: Vec::new(),
            mode: FrameMode::Discrete,
            animator,
            placement,
        }
    }

    /// Load one more image. On error the caller drops `self`, which releases
    /// everything loaded so far.
    fn load(&mut self, path: &str) -> Result<()> {
        match self.backend.load_image(path) {
            Ok(image) => {
                self.images.push(image);
                Ok(())
            }
            Err(err) => {
                log::warn!(
                    "{err}; releasing {} image(s) already loaded for this sprite",
                    self.images.len()
                );
                Err(err)
            }
        }
    }

    /// A static sprite drawn from one whole image.
    pub fn single(backend: &Rc<B>, path: &str, placement: Placement) -> Result<Self> {
        Self::frames(backend, &[path], placement, STATIC_FRAME_DURATION)
    }

    /// An animation with one image file per frame, in the given order.
    pub fn frames<P: AsRef<str>>(
        backend: &Rc<B>,
        paths: &[P],
        placement: Placement,
        frame_duration: f32,
    ) -> Result<Self> {
        if paths.is_empty() {
            return Err(SpriteError::InvalidConfiguration(
                "a sprite needs at least one frame image".into(),
            ));
        }

        let animator = FrameAnimator::new(frame_duration)?;
        let mut sprite = Self::empty(backend, placement, animator);
        for path in paths {
            sprite.load(path.as_ref())?;
        }
        log::debug!("Loaded {}-frame sprite", sprite.images.len());
        Ok(sprite)
    }

    /// An animation whose frames are tiles of one sprite-sheet image.
    ///
    /// Fails with `InvalidConfiguration` when the tiles do not fit the sheet
    /// or the sheet is too short to hold every frame.
    pub fn sheet(
        backend: &Rc<B>,
        path: &str,
        placement: Placement,
        sheet: SheetSpec,
        frame_duration: f32,
    ) -> Result<Self> {
        if sheet.frame_count == 0 {
            return Err(SpriteError::InvalidConfiguration(
                "a sprite sheet needs at least one frame".into(),
            ));
        }

        let animator = FrameAnimator::new(frame_duration)?;
        let mut sprite = Self::empty(backend, placement, animator);
        sprite.load(path)?;

        let image = &sprite.images[0];
        let width = backend.image_width(image);
        let height = backend.image_height(image);
        let layout =
            AtlasLayout::new(sheet.tile_width, sheet.tile_height, width, sheet.row_offset)?;
        if !layout.fits_height(sheet.frame_count, height) {
            return Err(SpriteError::InvalidConfiguration(format!(
                "{path} is {height}px tall but {} frames of {}px from row {} need {} rows",
                sheet.frame_count,
                sheet.tile_height,
                sheet.row_offset,
                layout.rows_needed(sheet.frame_count),
            )));
        }

        sprite.mode = FrameMode::Atlas {
            layout,
            frame_count: sheet.frame_count,
        };
        log::debug!(
            "Loaded {}-frame sheet {path} ({} per row)",
            sheet.frame_count,
            layout.frames_per_row()
        );
        Ok(sprite)
    }

    /// A static sprite showing the tile at `(column, row)` of a sprite sheet.
    pub fn tile(
        backend: &Rc<B>,
        path: &str,
        placement: Placement,
        tile_width: u32,
        tile_height: u32,
        column: u32,
        row: u32,
    ) -> Result<Self> {
        let mut sprite = Self::empty(backend, placement, FrameAnimator::default());
        sprite.load(path)?;

        let image = &sprite.images[0];
        let width = backend.image_width(image);
        let height = backend.image_height(image);
        let source = AtlasLayout::new(tile_width, tile_height, width, 0)?.tile_at(column, row);
        if source.right() > width as u64 || source.bottom() > height as u64 {
            return Err(SpriteError::InvalidConfiguration(format!(
                "tile ({column}, {row}) lies outside {path} ({width}x{height})"
            )));
        }

        sprite.mode = FrameMode::Tile { source };
        Ok(sprite)
    }

    /// Build a sprite from its configuration.
    pub fn from_config(backend: &Rc<B>, config: &SpriteConfig) -> Result<Self> {
        let placement = config.placement();
        match &config.source {
            SpriteSource::Single { path } => Self::single(backend, path, placement),
            SpriteSource::Frames { paths } => {
                Self::frames(backend, paths.as_slice(), placement, config.frame_duration)
            }
            SpriteSource::Sheet {
                path,
                tile_width,
                tile_height,
                frame_count,
                row_offset,
            } => {
                let sheet = SheetSpec::new(*tile_width, *tile_height)
                    .with_frame_count(*frame_count)
                    .with_row_offset(*row_offset);
                Self::sheet(backend, path, placement, sheet, config.frame_duration)
            }
            SpriteSource::Tile {
                path,
                tile_width,
                tile_height,
                column,
                row,
            } => Self::tile(backend, path, placement, *tile_width, *tile_height, *column, *row),
        }
    }

    /// Advance the animation by `delta` and draw the current frame.
    pub fn render(&mut self, delta: f32) {
        if self.images.is_empty() {
            return;
        }

        let frame_count = self.frame_count();
        self.animator.advance(delta, frame_count);
        let frame = self.animator.current_frame();

        let (image, source) = match &self.mode {
            FrameMode::Discrete => {
                let Some(image) = self.images.get(frame) else {
                    return;
                };
                let source = SourceRect::full(
                    self.backend.image_width(image),
                    self.backend.image_height(image),
                );
                (image, source)
            }
            FrameMode::Atlas { layout, .. } => (&self.images[0], layout.tile_rect(frame)),
            FrameMode::Tile { source } => (&self.images[0], *source),
        };

        let dest = DrawRect::scaled(
            self.placement.x,
            self.placement.y,
            &source,
            self.placement.scale,
        );
        self.backend.draw_region(image, source, dest);
    }

    /// Number of animation frames.
    pub fn frame_count(&self) -> usize {
        match self.mode {
            FrameMode::Discrete => self.images.len(),
            FrameMode::Atlas { frame_count, .. } => frame_count,
            FrameMode::Tile { .. } => 1,
        }
    }

    /// Get the current frame index.
    #[inline]
    pub fn current_frame(&self) -> usize {
        self.animator.current_frame()
    }

    /// Jump to a frame, wrapping it into the frame range.
    pub fn set_current_frame(&mut self, frame: usize) {
        let count = self.frame_count();
        self.animator.set_current_frame(frame, count);
    }

    #[inline]
    pub fn animator(&self) -> &FrameAnimator {
        &self.animator
    }

    /// Restart the animation from frame 0.
    pub fn reset_animation(&mut self) {
        self.animator.reset();
    }

    #[inline]
    pub fn mode(&self) -> &FrameMode {
        &self.mode
    }

    #[inline]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.placement.x = x;
        self.placement.y = y;
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.placement.scale = scale;
    }
}

impl<B: RenderBackend> Drop for Sprite<B> {
    fn drop(&mut self) {
        if !self.images.is_empty() {
            log::debug!("Releasing {} sprite image(s)", self.images.len());
        }
        for image in self.images.drain(..) {
            self.backend.release_image(image);
        }
    }
}

impl<B: RenderBackend> fmt::Debug for Sprite<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sprite")
            .field("mode", &self.mode)
            .field("images", &self.images.len())
            .field("animator", &self.animator)
            .field("placement", &self.placement)
            .finish()
    }
}
