//! Droplet tracking state core for terminal-velocity video analysis.
//!
//! `droptrack` keeps the bookkeeping of a droplet-tracking session out of
//! the UI: per-droplet tracker lifecycle with frame-indexed box histories,
//! a locked-step raw/preprocessed stream pair, forward-only per-frame
//! reconciliation driven by navigation, and tab-separated persistence of
//! the recorded tracks.
//!
//! The visual tracker and the video decoder are pluggable through the
//! [`TrackerEngine`] and [`FrameSource`] traits; a self-contained centroid
//! backend and an in-memory frame source ship with the crate.
//!
//! # Example
//!
//! ```ignore
//! use droptrack::{
//!     CentroidEngine, DualSource, Rect, RunningMeanBackground, TrackingSession,
//! };
//!
//! // Any FrameSource works here; decode the clip however you like.
//! let raw = open_clip("drops.mp4")?;
//!
//! let mut model = RunningMeanBackground::default();
//! let frames = DualSource::with_background(raw, &mut model)?;
//! let mut session = TrackingSession::new(frames, CentroidEngine::new(), "out/drops")?;
//!
//! session.append_droplet();
//! session.reseed_selected(Rect::new(100.0, 80.0, 12.0, 12.0))?;
//! while session.advance()? {}
//! session.finish()?;
//! ```

pub mod config;
pub mod integration;
pub mod persist;
pub mod tracker;
pub mod video;

/// 0-based index of a frame in the video's natural order.
pub type FrameIndex = usize;

pub use config::{ConfigError, KeyBindings};
pub use integration::{CentroidEngine, ObjectTracker, PointKalman, TrackError, TrackerEngine};
pub use persist::{Calibration, CenterMode, PersistError};
pub use tracker::{Droplet, DropletRegistry, KeyframeSet, Rect, TrackingSession, ViewMode};
pub use video::{
    BackgroundModel, BufferedSource, DualSource, Frame, FrameSource, RunningMeanBackground,
    VideoError,
};
