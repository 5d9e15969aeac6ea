//! Tab-separated persistence codecs for session data.
//!
//! Three plain-text files, each with a header row, written in full on every
//! save: position data (`.txt`), keyframe marks (`.kfr`) and pixel-scale
//! calibration (`.clb`). All of them hang off one base path and differ only
//! in extension.

mod calibration;
mod keyframes;
mod positions;

pub use calibration::{Calibration, load_calibration, write_calibration};
pub use keyframes::{load_keyframes, write_keyframes};
pub use positions::{load_positions, write_positions};

use std::path::PathBuf;

use thiserror::Error;

/// Error type for persistence failures.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Underlying file I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The file is empty where a header row is required.
    #[error("{}: missing header row", .path.display())]
    MissingHeader { path: PathBuf },

    /// A data row could not be parsed. Loads abort on the first bad row.
    #[error("{}:{line}: {reason}", .path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

/// How the y-coordinate of a box center is computed in position data.
///
/// Older releases of this tool computed the y center with the x half-extent
/// (`y + S_x`) and inverted that same formula when loading. Their files
/// still round-trip, but store a y value off by `S_x - S_y` for non-square
/// boxes. `Legacy` stays bit-compatible with those files; `Corrected` uses
/// the matching half-extent on each axis. The mode must match between the
/// writer and the reader of a given file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CenterMode {
    /// Each axis uses its own half-extent.
    #[default]
    Corrected,
    /// The y center uses the x half-extent, on write and on read.
    Legacy,
}
