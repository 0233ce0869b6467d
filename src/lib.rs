//! # sprite-core-view
//!
//! Backend-agnostic 2D sprite animation.
//!
//! This crate provides the platform-independent part of drawing sprites:
//! - Advancing animation frames from elapsed time
//! - Addressing tiles inside sprite-sheet (atlas) images
//! - Sprite objects that own their images and draw one region per frame
//! - A [`RenderBackend`] trait to plug in any graphics library
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for data structures
//! - `toml` - Parse scene descriptions from TOML
//! - `web` - Enable the HTML canvas rendering backend
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use sprite_core_view::render::CommandBuffer;
//! use sprite_core_view::{Placement, SheetSpec, Sprite};
//!
//! // Any RenderBackend works; CommandBuffer just records draw calls.
//! let backend = Rc::new(CommandBuffer::new().with_image("img/Attack1.png", 252, 504));
//!
//! // A 7-frame attack animation, 126px tiles, 0.1s per frame
//! let sheet = SheetSpec::new(126, 126).with_frame_count(7);
//! let placement = Placement::new(500.0, 100.0, 2.0);
//! let mut attack = Sprite::sheet(&backend, "img/Attack1.png", placement, sheet, 0.1)?;
//!
//! // Once per frame tick
//! attack.render(1.0 / 60.0);
//! # Ok::<(), sprite_core_view::SpriteError>(())
//! ```

mod animation;
mod atlas;
mod backend;
mod config;
mod data;
mod error;
mod geometry;
pub mod render;
mod sprite;

pub use animation::{FrameAnimator, STATIC_FRAME_DURATION};
pub use atlas::AtlasLayout;
pub use backend::RenderBackend;
pub use config::{SceneConfig, SpriteConfig, SpriteSource};
pub use data::{frame_paths_in_order, FramePath};
pub use error::{Result, SpriteError};
pub use geometry::{DrawRect, SourceRect};
pub use sprite::{FrameMode, Placement, SheetSpec, Sprite};

#[cfg(feature = "web")]
pub use render::web::CanvasBackend;
