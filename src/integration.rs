//! Integration module for connecting visual tracker backends to the session.
//!
//! This module provides the traits a tracking backend implements plus a
//! self-contained centroid backend that needs nothing beyond the
//! preprocessed stream.

mod centroid;
mod engine;
mod kalman;

pub use centroid::{CentroidEngine, CentroidTracker};
pub use engine::{ObjectTracker, TrackError, TrackerEngine};
pub use kalman::PointKalman;
