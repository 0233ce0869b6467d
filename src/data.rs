//! Frame file naming and ordering.

use std::path::Path;

/// A frame image path with the index parsed from its file name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FramePath {
    /// Path passed to the backend
    pub path: String,
    /// Frame index for ordering (extracted from filename)
    pub index: u32,
}

impl FramePath {
    /// Parse the frame index of `path`, using `fallback` when the file stem
    /// carries no number.
    pub fn new(path: impl Into<String>, fallback: u32) -> Self {
        let path = path.into();
        let index = Path::new(&path)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(|stem| Self::extract_index(stem, fallback))
            .unwrap_or(fallback);
        Self { path, index }
    }

    /// Extract frame index from a filename stem.
    ///
    /// Handles patterns like:
    /// - "frame_0001" -> 1
    /// - "3" -> 3
    /// - "idle_12" -> 12
    pub fn extract_index(stem: &str, fallback: u32) -> u32 {
        if let Some(suffix) = stem.strip_prefix("frame_") {
            if let Ok(index) = suffix.parse::<u32>() {
                return index;
            }
        }
        let digits: String = stem.chars().filter(|c| c.is_ascii_digit()).collect();
        digits.parse::<u32>().unwrap_or(fallback)
    }
}

/// Order frame image paths by the number in their file names.
///
/// A path without a number sorts as if its number were its position in `paths`.
///
/// ```rust
/// use sprite_core_view::frame_paths_in_order;
///
/// let paths = ["idle/10.png", "idle/2.png", "idle/0.png", "idle/1.png"];
/// assert_eq!(
///     frame_paths_in_order(&paths),
///     vec!["idle/0.png", "idle/1.png", "idle/2.png", "idle/10.png"],
/// );
/// ```
pub fn frame_paths_in_order<P: AsRef<str>>(paths: &[P]) -> Vec<String> {
    let mut frames: Vec<FramePath> = paths
        .iter()
        .enumerate()
        .map(|(i, p)| FramePath::new(p.as_ref(), i as u32))
        .collect();
    frames.sort_by_key(|f| f.index);
    frames.into_iter().map(|f| f.path).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_index() {
        assert_eq!(FramePath::extract_index("frame_0001", 0), 1);
        assert_eq!(FramePath::extract_index("frame_42", 0), 42);
        assert_eq!(FramePath::extract_index("0042", 0), 42);
        assert_eq!(FramePath::extract_index("idle_3", 0), 3);
        assert_eq!(FramePath::extract_index("no_digits", 99), 99);
    }

    #[test]
    fn test_frame_path_uses_stem() {
        let frame = FramePath::new("img/player/Idle/3.png", 0);
        assert_eq!(frame.index, 3);
        assert_eq!(frame.path, "img/player/Idle/3.png");

        // Directory digits do not leak into the index.
        assert_eq!(FramePath::new("run2/attack.png", 7).index, 7);
    }

    #[test]
    fn test_order_is_numeric() {
        let ordered =
            frame_paths_in_order(&["b/frame_0003.png", "b/frame_0001.png", "b/frame_0002.png"]);
        assert_eq!(ordered, vec!["b/frame_0001.png", "b/frame_0002.png", "b/frame_0003.png"]);
    }
}
