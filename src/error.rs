//! Error types for sprite construction and rendering.

use thiserror::Error;

/// Sprite errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpriteError {
    /// An image could not be loaded or decoded by the backend
    #[error("Failed to load image {path}: {reason}")]
    ResourceLoadFailure { path: String, reason: String },

    /// Tile dimensions, frame duration or frame layout are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl SpriteError {
    /// Build a load failure for `path`.
    pub fn load_failure(path: impl Into<String>, reason: impl Into<String>) -> Self {
        SpriteError::ResourceLoadFailure {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// The path that failed to load, if this is a load failure.
    pub fn path(&self) -> Option<&str> {
        match self {
            SpriteError::ResourceLoadFailure { path, .. } => Some(path),
            SpriteError::InvalidConfiguration(_) => None,
        }
    }
}

/// Result type for sprite operations
pub type Result<T> = std::result::Result<T, SpriteError>;
