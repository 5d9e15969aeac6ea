use std::path::{Path, PathBuf};

use crate::FrameIndex;
use crate::integration::{TrackError, TrackerEngine};
use crate::persist::{self, CenterMode, PersistError};
use crate::video::{DualSource, Frame, VideoError};

use super::keyframes::KeyframeSet;
use super::rect::Rect;
use super::registry::DropletRegistry;

/// Which stream variant `display_frame` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    Raw,
    #[default]
    Processed,
}

/// One tracking session over a video: frame navigation, droplet lifecycle
/// and persistence, bundled with a pluggable tracking backend.
///
/// The session always has a frame loaded; constructing it reads frame 0.
/// Navigation keeps the raw and processed cursors locked together and runs
/// the droplet reconciliation pass on every newly read frame.
pub struct TrackingSession<E: TrackerEngine> {
    frames: DualSource,
    registry: DropletRegistry,
    keyframes: KeyframeSet,
    engine: E,
    view: ViewMode,
    center_mode: CenterMode,
    output_base: PathBuf,
}

impl<E: TrackerEngine> TrackingSession<E> {
    /// Start a session over an aligned stream pair, reading frame 0.
    ///
    /// Output files are derived from `output_base` by swapping extensions
    /// (`.txt` for positions, `.kfr` for keyframes). Fails when the stream
    /// holds no frames at all.
    pub fn new(
        mut frames: DualSource,
        engine: E,
        output_base: impl Into<PathBuf>,
    ) -> Result<Self, VideoError> {
        if !frames.read_next()? {
            return Err(VideoError::EmptyStream);
        }

        Ok(Self {
            frames,
            registry: DropletRegistry::new(),
            keyframes: KeyframeSet::new(),
            engine,
            view: ViewMode::default(),
            center_mode: CenterMode::default(),
            output_base: output_base.into(),
        })
    }

    /// Choose how box centers are written to and read from position data.
    pub fn with_center_mode(mut self, mode: CenterMode) -> Self {
        self.center_mode = mode;
        self
    }

    /// Index of the currently loaded frame.
    pub fn current_frame(&self) -> FrameIndex {
        self.frames.position().saturating_sub(1)
    }

    /// Step one frame forward and reconcile every droplet with it.
    ///
    /// Returns `Ok(false)` at end of stream; the loaded frame and both
    /// cursors stay as they were. Callers wanting to land cleanly on the
    /// final frame follow up with `retreat()` then `advance()`.
    pub fn advance(&mut self) -> Result<bool, VideoError> {
        if !self.frames.read_next()? {
            return Ok(false);
        }

        let current = self.current_frame();
        if let Some(processed) = self.frames.processed_frame() {
            self.registry.reconcile(current, processed);
        }
        Ok(true)
    }

    /// Step one frame back by seeking and replaying a single forward read.
    ///
    /// Returns `Ok(false)` at frame 0, with nothing moved.
    pub fn retreat(&mut self) -> Result<bool, VideoError> {
        let current = self.current_frame();
        if current == 0 {
            return Ok(false);
        }

        self.frames.seek(current - 1);
        self.advance()
    }

    /// Seek both streams to the beginning and load frame 0 again.
    pub fn restart(&mut self) -> Result<bool, VideoError> {
        self.frames.seek(0);
        self.advance()
    }

    /// Add a new inactive droplet and select it.
    pub fn append_droplet(&mut self) -> usize {
        self.registry.append_droplet()
    }

    pub fn select_next(&mut self) {
        self.registry.select_next();
    }

    pub fn select_previous(&mut self) {
        self.registry.select_previous();
    }

    /// Index of the selected droplet, if any.
    pub fn selection(&self) -> Option<usize> {
        self.registry.selection()
    }

    /// Disable the selected droplet at the current frame, dropping its
    /// estimate there. No-op when nothing is selected.
    pub fn disable_selected(&mut self) {
        if let Some(index) = self.registry.selection() {
            let at = self.current_frame();
            self.registry.disable(index, at);
        }
    }

    /// Restart the selected droplet's tracker from `seed` on the current
    /// processed frame, recording `seed` as its position here.
    ///
    /// No-op when nothing is selected. Fails when the backend rejects the
    /// seed; the droplet is left untouched in that case.
    pub fn reseed_selected(&mut self, seed: Rect) -> Result<(), TrackError> {
        let Some(index) = self.registry.selection() else {
            return Ok(());
        };
        let at = self.current_frame();
        let Some(processed) = self.frames.processed_frame() else {
            return Ok(());
        };

        let tracker = self.engine.start(processed, seed)?;
        self.registry.reseed(index, at, seed, tracker);
        Ok(())
    }

    /// Mark the current frame as a keyframe.
    pub fn mark_keyframe(&mut self) {
        let at = self.current_frame();
        self.keyframes.mark(at);
    }

    /// Unmark the current frame.
    pub fn unmark_keyframe(&mut self) {
        let at = self.current_frame();
        self.keyframes.unmark(at);
    }

    /// Whether the current frame is marked.
    pub fn is_keyframe(&self) -> bool {
        self.keyframes.contains(self.current_frame())
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    /// Flip between the raw and processed view.
    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            ViewMode::Raw => ViewMode::Processed,
            ViewMode::Processed => ViewMode::Raw,
        };
    }

    /// The loaded frame in the variant selected by the view mode.
    pub fn display_frame(&self) -> Option<&Frame> {
        match self.view {
            ViewMode::Raw => self.frames.raw_frame(),
            ViewMode::Processed => self.frames.processed_frame(),
        }
    }

    /// Get a reference to the underlying stream pair.
    pub fn frames(&self) -> &DualSource {
        &self.frames
    }

    /// Get a reference to the droplet registry.
    pub fn registry(&self) -> &DropletRegistry {
        &self.registry
    }

    /// Get a mutable reference to the droplet registry.
    pub fn registry_mut(&mut self) -> &mut DropletRegistry {
        &mut self.registry
    }

    /// Get a reference to the keyframe set.
    pub fn keyframes(&self) -> &KeyframeSet {
        &self.keyframes
    }

    /// Get a mutable reference to the keyframe set.
    pub fn keyframes_mut(&mut self) -> &mut KeyframeSet {
        &mut self.keyframes
    }

    /// Get a reference to the underlying tracker engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Get a mutable reference to the underlying tracker engine.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Base path the output files are derived from.
    pub fn output_base(&self) -> &Path {
        &self.output_base
    }

    /// Write position data and keyframes next to `output_base`.
    ///
    /// Either file is only written when there is something to write; both
    /// writes are full overwrites.
    pub fn finish(&self) -> Result<(), PersistError> {
        persist::write_positions(&self.registry, &self.output_base, self.center_mode)?;
        persist::write_keyframes(&self.keyframes, &self.output_base)?;
        Ok(())
    }

    /// Load persisted position data into the registry.
    ///
    /// Restored droplets come back inactive with their histories protected
    /// from navigation; the first droplet becomes selected.
    pub fn load_data(&mut self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        persist::load_positions(path, &mut self.registry, self.center_mode)
    }

    /// Load persisted keyframe marks into the keyframe set.
    pub fn load_keyframes(&mut self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        persist::load_keyframes(path, &mut self.keyframes)
    }
}
