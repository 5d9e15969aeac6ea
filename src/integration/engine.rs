//! Traits for visual tracker backends.

use thiserror::Error;

use crate::tracker::Rect;
use crate::video::Frame;

/// Error type for tracker backend failures.
#[derive(Debug, Error)]
pub enum TrackError {
    /// The seed box has zero width or height.
    #[error("seed box is empty")]
    EmptySeed,

    /// The seed box does not overlap the frame.
    #[error("seed box does not overlap the {width}x{height} frame")]
    SeedOutOfFrame { width: usize, height: usize },

    /// An external backend failed to start.
    #[error("tracker backend failed: {0}")]
    Backend(String),
}

/// A running single-object tracker locked onto one target.
pub trait ObjectTracker {
    /// Advance the tracker with the next frame.
    ///
    /// Returns the target's new box, or `None` when the target was not found
    /// in this frame. A miss does not invalidate the tracker; later frames
    /// may find the target again.
    fn update(&mut self, frame: &Frame) -> Option<Rect>;
}

/// Trait for visual tracking backends.
///
/// Implement this trait to plug any single-object tracker into the session.
/// The engine is a factory: each call to `start` produces an independent
/// tracker locked onto the seeded target.
///
/// # Example
///
/// ```ignore
/// use droptrack::{Frame, ObjectTracker, Rect, TrackError, TrackerEngine};
///
/// struct MyEngine {
///     // Your tracker configuration here
/// }
///
/// impl TrackerEngine for MyEngine {
///     fn start(
///         &mut self,
///         frame: &Frame,
///         seed: Rect,
///     ) -> Result<Box<dyn ObjectTracker>, TrackError> {
///         // Initialize a tracker on `frame` locked to `seed`
///         Err(TrackError::Backend("not implemented".into()))
///     }
/// }
/// ```
pub trait TrackerEngine {
    /// Start a tracker on `frame`, locked onto the target under `seed`.
    fn start(&mut self, frame: &Frame, seed: Rect) -> Result<Box<dyn ObjectTracker>, TrackError>;
}
