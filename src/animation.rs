//! Frame timing for animated sprites.

use crate::error::{Result, SpriteError};

/// Frame duration used by sprites that never animate.
pub const STATIC_FRAME_DURATION: f32 = 1.0;

/// Elapsed-time frame animator.
///
/// The animator does not measure time itself. The caller passes the time
/// since its previous tick to `advance()` along with the number of frames
/// the sprite owns.
///
/// A call advances by at most one frame: when the accumulated time reaches
/// the frame duration the frame index moves forward by one (wrapping) and
/// the accumulator is reset to zero, dropping any excess.
///
/// ## Example
///
/// ```rust
/// use sprite_core_view::FrameAnimator;
///
/// let mut animator = FrameAnimator::new(0.1).unwrap();
///
/// assert!(!animator.advance(0.05, 7));
/// assert!(animator.advance(0.05, 7));
/// assert_eq!(animator.current_frame(), 1);
/// assert_eq!(animator.elapsed(), 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FrameAnimator {
    /// Current frame index
    current_frame: usize,
    /// Time accumulated since the last advance
    elapsed: f32,
    /// Time each frame stays on screen
    frame_duration: f32,
}

impl FrameAnimator {
    /// Create an animator starting at frame 0.
    ///
    /// Fails when `frame_duration` is not a positive, finite number.
    pub fn new(frame_duration: f32) -> Result<Self> {
        if !(frame_duration.is_finite() && frame_duration > 0.0) {
            return Err(SpriteError::InvalidConfiguration(format!(
                "frame duration must be positive, got {frame_duration}"
            )));
        }
        Ok(Self {
            current_frame: 0,
            elapsed: 0.0,
            frame_duration,
        })
    }

    /// Advance the animation by `delta` time units.
    ///
    /// Sprites with one frame or fewer are left untouched and do not
    /// accumulate time. Negative deltas count as zero.
    ///
    /// Returns true if the frame changed.
    pub fn advance(&mut self, delta: f32, frame_count: usize) -> bool {
        if frame_count <= 1 {
            return false;
        }

        self.elapsed += delta.max(0.0);
        if self.elapsed >= self.frame_duration {
            self.current_frame = (self.current_frame + 1) % frame_count;
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    /// Get the current frame index.
    #[inline]
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Jump to a frame, wrapping it into `0..frame_count`.
    ///
    /// The accumulated time is kept.
    pub fn set_current_frame(&mut self, frame: usize, frame_count: usize) {
        self.current_frame = if frame_count == 0 { 0 } else { frame % frame_count };
    }

    /// Time accumulated towards the next advance.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Get the frame duration.
    #[inline]
    pub fn frame_duration(&self) -> f32 {
        self.frame_duration
    }

    /// Reset to frame 0 with no accumulated time.
    pub fn reset(&mut self) {
        self.current_frame = 0;
        self.elapsed = 0.0;
    }
}

impl Default for FrameAnimator {
    fn default() -> Self {
        Self {
            current_frame: 0,
            elapsed: 0.0,
            frame_duration: STATIC_FRAME_DURATION,
        }
    }
}
