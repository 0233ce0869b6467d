//! Declarative sprite descriptions.
//!
//! With the `toml` feature a whole scene can be described in a file:
//!
//! ```toml
//! [[sprite]]
//! x = 500.0
//! y = 100.0
//! scale = 2.0
//! frame_duration = 0.1
//! source = { mode = "sheet", path = "img/Attack1.png", tile_width = 126, tile_height = 126, frame_count = 7 }
//! ```

use crate::animation::STATIC_FRAME_DURATION;
use crate::sprite::Placement;

/// Where a sprite's images come from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "snake_case"))]
pub enum SpriteSource {
    /// One static image
    Single { path: String },
    /// One image per animation frame
    Frames { paths: Vec<String> },
    /// Animation frames packed in a sprite sheet
    Sheet {
        path: String,
        tile_width: u32,
        tile_height: u32,
        #[cfg_attr(feature = "serde", serde(default = "default_frame_count"))]
        frame_count: usize,
        #[cfg_attr(feature = "serde", serde(default))]
        row_offset: u32,
    },
    /// A single fixed tile of a sprite sheet
    Tile {
        path: String,
        tile_width: u32,
        tile_height: u32,
        column: u32,
        row: u32,
    },
}

/// Configuration for one sprite.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpriteConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    pub x: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub y: f32,
    #[cfg_attr(feature = "serde", serde(default = "default_scale"))]
    pub scale: f32,
    #[cfg_attr(feature = "serde", serde(default = "default_frame_duration"))]
    pub frame_duration: f32,
    pub source: SpriteSource,
}

#[cfg(feature = "serde")]
fn default_frame_count() -> usize {
    1
}

#[cfg(feature = "serde")]
fn default_scale() -> f32 {
    1.0
}

#[cfg(feature = "serde")]
fn default_frame_duration() -> f32 {
    STATIC_FRAME_DURATION
}

impl SpriteConfig {
    /// Unscaled, static configuration drawing `source` at the origin.
    pub fn new(source: SpriteSource) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            frame_duration: STATIC_FRAME_DURATION,
            source,
        }
    }

    /// Position and scale of the sprite.
    pub fn placement(&self) -> Placement {
        Placement::new(self.x, self.y, self.scale)
    }

    /// Every image path this sprite loads.
    pub fn paths(&self) -> Vec<&str> {
        match &self.source {
            SpriteSource::Frames { paths } => paths.iter().map(String::as_str).collect(),
            SpriteSource::Single { path }
            | SpriteSource::Sheet { path, .. }
            | SpriteSource::Tile { path, .. } => vec![path.as_str()],
        }
    }
}

/// A list of sprites, typically read from a TOML file.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneConfig {
    #[cfg_attr(feature = "serde", serde(default, rename = "sprite"))]
    pub sprites: Vec<SpriteConfig>,
}

impl SceneConfig {
    /// Parse a scene description.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_static() {
        let config = SpriteConfig::new(SpriteSource::Single {
            path: "idle/0.png".into(),
        });
        assert_eq!(config.placement(), Placement::default());
        assert_eq!(config.frame_duration, STATIC_FRAME_DURATION);
        assert_eq!(config.paths(), vec!["idle/0.png"]);
    }

    #[test]
    fn test_frame_paths_are_listed_in_order() {
        let config = SpriteConfig::new(SpriteSource::Frames {
            paths: vec!["a/0.png".into(), "a/1.png".into()],
        });
        assert_eq!(config.paths(), vec!["a/0.png", "a/1.png"]);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_parse_scene() {
        let scene = SceneConfig::from_toml_str(
            r#"
            [[sprite]]
            x = 100.0
            y = 100.0
            scale = 2.0
            source = { mode = "single", path = "img/player/Idle/0.png" }

            [[sprite]]
            x = 500.0
            y = 100.0
            scale = 2.0
            frame_duration = 0.1
            source = { mode = "sheet", path = "img/Attack1.png", tile_width = 126, tile_height = 126, frame_count = 7 }

            [[sprite]]
            frame_duration = 0.2
            source = { mode = "frames", paths = ["idle/0.png", "idle/1.png"] }

            [[sprite]]
            source = { mode = "tile", path = "tiles.png", tile_width = 16, tile_height = 16, column = 2, row = 3 }
            "#,
        )
        .unwrap();

        assert_eq!(scene.sprites.len(), 4);
        assert_eq!(scene.sprites[0].placement(), Placement::new(100.0, 100.0, 2.0));
        assert_eq!(scene.sprites[0].frame_duration, STATIC_FRAME_DURATION);
        assert_eq!(
            scene.sprites[1].source,
            SpriteSource::Sheet {
                path: "img/Attack1.png".into(),
                tile_width: 126,
                tile_height: 126,
                frame_count: 7,
                row_offset: 0,
            }
        );
        assert_eq!(scene.sprites[2].paths(), vec!["idle/0.png", "idle/1.png"]);
        assert_eq!(scene.sprites[3].placement(), Placement::default());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_unknown_mode_is_rejected() {
        let result = SceneConfig::from_toml_str(
            r#"
            [[sprite]]
            source = { mode = "video", path = "clip.mp4" }
            "#,
        );
        assert!(result.is_err());
    }
}
