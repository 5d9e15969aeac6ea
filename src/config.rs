//! Key-binding configuration document.
//!
//! The interactive frontend reads its keycodes from a flat JSON file
//! (`config.JSON` by convention). Fields missing from the file keep their
//! defaults, so a partially filled config merges instead of failing, and
//! saving writes the full merged document back.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for key-binding configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying file I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The file is not a valid key-binding document.
    #[error("malformed key bindings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Keycode bindings for the interactive controls.
///
/// Keycodes are whatever the frontend's key-wait primitive reports, which
/// for plain letters is the ASCII value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyBindings {
    /// Write output files and end the session.
    pub finish: i32,
    /// Toggle free-running playback.
    pub pause: i32,
    /// Mark the current frame as a keyframe.
    pub keyframe: i32,
    /// Unmark the current frame.
    pub rem_keyframe: i32,
    /// Seek back to the first frame.
    pub restart: i32,
    /// Step one frame forward.
    pub forward: i32,
    /// Step one frame back.
    pub back: i32,
    /// Toggle between raw and processed view.
    pub view: i32,
    /// Append a new droplet.
    pub new: i32,
    /// Select the next droplet.
    pub next_drop: i32,
    /// Select the previous droplet.
    pub prev_drop: i32,
    /// Reseed the selected droplet's tracker.
    pub res_tracker: i32,
    /// Disable the selected droplet's tracker.
    pub dis_tracker: i32,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            finish: i32::from(b'q'),
            pause: i32::from(b' '),
            keyframe: i32::from(b'k'),
            rem_keyframe: i32::from(b'u'),
            restart: i32::from(b'r'),
            forward: i32::from(b'f'),
            back: i32::from(b'b'),
            view: i32::from(b'v'),
            new: i32::from(b'n'),
            next_drop: i32::from(b']'),
            prev_drop: i32::from(b'['),
            res_tracker: i32::from(b't'),
            dis_tracker: i32::from(b'x'),
        }
    }
}

impl KeyBindings {
    /// Load bindings from `path`, falling back to the defaults when the
    /// file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Write the full binding set to `path` as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let mut out = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut out, self)?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(tag: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "droptrack-config-{tag}-{}.JSON",
            std::process::id()
        ));
        path
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let bindings = KeyBindings::load("/nonexistent/config.JSON").unwrap();
        assert_eq!(bindings, KeyBindings::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let path = temp_path("roundtrip");
        let mut bindings = KeyBindings::default();
        bindings.pause = 80;

        bindings.save(&path).unwrap();
        let loaded = KeyBindings::load(&path).unwrap();
        assert_eq!(loaded, bindings);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_partial_file_merges_with_defaults() {
        let path = temp_path("partial");
        std::fs::write(&path, r#"{"pause": 13, "nextDrop": 46}"#).unwrap();

        let bindings = KeyBindings::load(&path).unwrap();
        assert_eq!(bindings.pause, 13);
        assert_eq!(bindings.next_drop, 46);
        assert_eq!(bindings.finish, KeyBindings::default().finish);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_field_names_match_the_document() {
        let json = serde_json::to_string(&KeyBindings::default()).unwrap();
        for key in [
            "finish",
            "pause",
            "keyframe",
            "remKeyframe",
            "restart",
            "forward",
            "back",
            "view",
            "new",
            "nextDrop",
            "prevDrop",
            "resTracker",
            "disTracker",
        ] {
            assert!(json.contains(&format!("\"{key}\"")), "missing key {key}");
        }
    }
}
