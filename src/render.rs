//! Concrete rendering backends.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::backend::RenderBackend;
use crate::error::{Result, SpriteError};
use crate::geometry::{DrawRect, SourceRect};

/// A single recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCommand {
    /// Path the drawn image was loaded from
    pub path: String,
    /// Region of the image that was sampled
    pub source: SourceRect,
    /// Where it landed on screen
    pub dest: DrawRect,
}

/// Image handle issued by a [`CommandBuffer`].
#[derive(Debug, PartialEq, Eq)]
pub struct BufferedImage {
    id: u64,
    path: String,
    width: u32,
    height: u32,
}

impl BufferedImage {
    /// Path the image was loaded from.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Platform-agnostic backend that records draw commands instead of drawing.
///
/// Images are "decoded" from a registry of known paths and sizes. Each
/// consumer can replay the recorded commands on its own renderer, and the
/// buffer keeps track of which images are still held.
///
/// ## Example
///
/// ```rust
/// use std::rc::Rc;
/// use sprite_core_view::render::CommandBuffer;
/// use sprite_core_view::{Placement, SheetSpec, Sprite};
///
/// let buffer = Rc::new(CommandBuffer::new().with_image("img/Attack1.png", 252, 504));
/// let sheet = SheetSpec::new(126, 126).with_frame_count(7);
/// let placement = Placement::new(500.0, 100.0, 2.0);
/// let mut sprite = Sprite::sheet(&buffer, "img/Attack1.png", placement, sheet, 0.1)?;
///
/// sprite.render(0.1);
/// let commands = buffer.take_commands();
/// assert_eq!(commands[0].source.x, 126);
/// assert_eq!(commands[0].dest.width, 252.0);
///
/// drop(sprite);
/// assert_eq!(buffer.live_images(), 0);
/// # Ok::<(), sprite_core_view::SpriteError>(())
/// ```
#[derive(Debug, Default)]
pub struct CommandBuffer {
    sizes: RefCell<HashMap<String, (u32, u32)>>,
    failing: RefCell<HashSet<String>>,
    live: RefCell<BTreeMap<u64, String>>,
    next_id: Cell<u64>,
    commands: RefCell<Vec<DrawCommand>>,
}

impl CommandBuffer {
    /// Create an empty buffer with no known images.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`register_image`](Self::register_image).
    pub fn with_image(self, path: impl Into<String>, width: u32, height: u32) -> Self {
        self.register_image(path, width, height);
        self
    }

    /// Make `path` loadable as an image of `width` x `height` pixels.
    pub fn register_image(&self, path: impl Into<String>, width: u32, height: u32) {
        self.sizes.borrow_mut().insert(path.into(), (width, height));
    }

    /// Make every future load of `path` fail.
    pub fn fail_on(&self, path: impl Into<String>) {
        self.failing.borrow_mut().insert(path.into());
    }

    /// Number of images loaded and not yet released.
    pub fn live_images(&self) -> usize {
        self.live.borrow().len()
    }

    /// Paths of images still held, in load order.
    pub fn live_paths(&self) -> Vec<String> {
        self.live.borrow().values().cloned().collect()
    }

    /// Recorded draw commands, oldest first.
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.commands.borrow().clone()
    }

    /// Remove and return the recorded draw commands.
    pub fn take_commands(&self) -> Vec<DrawCommand> {
        std::mem::take(&mut *self.commands.borrow_mut())
    }
}

impl RenderBackend for CommandBuffer {
    type Image = BufferedImage;

    fn load_image(&self, path: &str) -> Result<BufferedImage> {
        if self.failing.borrow().contains(path) {
            return Err(SpriteError::load_failure(path, "decode failed"));
        }
        let (width, height) = *self
            .sizes
            .borrow()
            .get(path)
            .ok_or_else(|| SpriteError::load_failure(path, "no such image"))?;

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.live.borrow_mut().insert(id, path.to_string());
        log::debug!("Loaded image #{id} {path} ({width}x{height})");

        Ok(BufferedImage {
            id,
            path: path.to_string(),
            width,
            height,
        })
    }

    fn release_image(&self, image: BufferedImage) {
        if self.live.borrow_mut().remove(&image.id).is_none() {
            log::warn!("Released image #{} {} that was not live", image.id, image.path);
        } else {
            log::debug!("Released image #{} {}", image.id, image.path);
        }
    }

    fn draw_region(&self, image: &BufferedImage, source: SourceRect, dest: DrawRect) {
        self.commands.borrow_mut().push(DrawCommand {
            path: image.path.clone(),
            source,
            dest,
        });
    }

    fn image_width(&self, image: &BufferedImage) -> u32 {
        image.width
    }

    fn image_height(&self, image: &BufferedImage) -> u32 {
        image.height
    }
}

/// Web-specific rendering backend.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use wasm_bindgen::JsValue;
    use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

    /// Backend drawing onto an HTML canvas 2D context.
    ///
    /// Browsers decode images asynchronously, so the host preloads them
    /// (waiting for `onload`) and hands them over with
    /// [`insert_image`](Self::insert_image). `load_image` then resolves paths
    /// against that set and rejects images that are missing or not decoded.
    #[derive(Debug)]
    pub struct CanvasBackend {
        ctx: CanvasRenderingContext2d,
        images: RefCell<HashMap<String, HtmlImageElement>>,
    }

    impl CanvasBackend {
        /// Create a backend drawing into `ctx`.
        pub fn new(ctx: CanvasRenderingContext2d) -> Self {
            Self {
                ctx,
                images: RefCell::new(HashMap::new()),
            }
        }

        /// Make a preloaded image available under `path`.
        pub fn insert_image(&self, path: impl Into<String>, image: HtmlImageElement) {
            self.images.borrow_mut().insert(path.into(), image);
        }

        /// Get the canvas context.
        pub fn context(&self) -> &CanvasRenderingContext2d {
            &self.ctx
        }
    }

    fn js_error(err: JsValue) -> String {
        err.as_string().unwrap_or_else(|| format!("{err:?}"))
    }

    impl RenderBackend for CanvasBackend {
        type Image = HtmlImageElement;

        fn load_image(&self, path: &str) -> Result<HtmlImageElement> {
            let image = self
                .images
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| SpriteError::load_failure(path, "image was not preloaded"))?;

            if !image.complete() || image.natural_width() == 0 {
                return Err(SpriteError::load_failure(path, "image is not decoded"));
            }
            Ok(image)
        }

        fn release_image(&self, image: HtmlImageElement) {
            // The element stays cached in `images`; only this handle goes away.
            drop(image);
        }

        fn draw_region(&self, image: &HtmlImageElement, source: SourceRect, dest: DrawRect) {
            let result = self
                .ctx
                .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    image,
                    source.x as f64,
                    source.y as f64,
                    source.width as f64,
                    source.height as f64,
                    dest.x as f64,
                    dest.y as f64,
                    dest.width as f64,
                    dest.height as f64,
                );
            if let Err(err) = result {
                log::warn!("Failed to draw {}: {}", image.src(), js_error(err));
            }
        }

        fn image_width(&self, image: &HtmlImageElement) -> u32 {
            image.natural_width()
        }

        fn image_height(&self, image: &HtmlImageElement) -> u32 {
            image.natural_height()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_registered_image() {
        let buffer = CommandBuffer::new().with_image("a.png", 16, 8);
        let image = buffer.load_image("a.png").unwrap();

        assert_eq!(image.path(), "a.png");
        assert_eq!(buffer.image_width(&image), 16);
        assert_eq!(buffer.image_height(&image), 8);
        assert_eq!(buffer.live_images(), 1);

        buffer.release_image(image);
        assert_eq!(buffer.live_images(), 0);
    }

    #[test]
    fn test_unknown_and_failing_paths() {
        let buffer = CommandBuffer::new().with_image("bad.png", 4, 4);
        buffer.fail_on("bad.png");

        let err = buffer.load_image("missing.png").unwrap_err();
        assert_eq!(err.path(), Some("missing.png"));

        let err = buffer.load_image("bad.png").unwrap_err();
        assert_eq!(err.path(), Some("bad.png"));
        assert_eq!(buffer.live_images(), 0);
    }

    #[test]
    fn test_records_draws_in_order() {
        let buffer = CommandBuffer::new().with_image("a.png", 32, 32).with_image("b.png", 16, 16);
        let a = buffer.load_image("a.png").unwrap();
        let b = buffer.load_image("b.png").unwrap();

        buffer.draw_region(&a, SourceRect::full(32, 32), DrawRect::new(0.0, 0.0, 32.0, 32.0));
        buffer.draw_region(&b, SourceRect::new(0, 0, 8, 8), DrawRect::new(5.0, 5.0, 16.0, 16.0));

        let commands = buffer.commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].path, "a.png");
        assert_eq!(commands[1].path, "b.png");
        assert_eq!(commands[1].source, SourceRect::new(0, 0, 8, 8));

        assert_eq!(buffer.take_commands().len(), 2);
        assert!(buffer.commands().is_empty());
        assert_eq!(buffer.live_paths(), vec!["a.png".to_string(), "b.png".to_string()]);
    }
}
