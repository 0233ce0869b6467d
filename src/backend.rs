//! The rendering capabilities a sprite needs from a graphics library.

use crate::error::Result;
use crate::geometry::{DrawRect, SourceRect};

/// Trait for rendering backends.
///
/// Implement this trait to draw sprites with your specific graphics library
/// (raylib, SDL, SFML, an HTML canvas, ...). Sprites share one backend through
/// an `Rc`, so every method takes `&self`; backends that need mutation keep it
/// behind `RefCell`/`Cell`.
///
/// No `Send` bounds. The backend lives on the thread that owns the graphics
/// context.
pub trait RenderBackend {
    /// Handle to a loaded image (texture).
    type Image;

    /// Load the image at `path`.
    ///
    /// Fails with `SpriteError::ResourceLoadFailure` naming `path`.
    fn load_image(&self, path: &str) -> Result<Self::Image>;

    /// Release an image previously returned by `load_image`.
    fn release_image(&self, image: Self::Image);

    /// Draw the `source` region of `image` scaled into `dest`, untinted.
    fn draw_region(&self, image: &Self::Image, source: SourceRect, dest: DrawRect);

    /// Width of `image` in pixels.
    fn image_width(&self, image: &Self::Image) -> u32;

    /// Height of `image` in pixels.
    fn image_height(&self, image: &Self::Image) -> u32;
}
