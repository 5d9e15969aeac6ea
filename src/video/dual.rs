//! Locked-step raw/processed stream pair.

use log::warn;

use crate::FrameIndex;

use super::background::{BackgroundModel, precompute};
use super::frame::Frame;
use super::source::{FrameSource, VideoError};

/// A raw stream and its preprocessed twin, advanced and repositioned
/// together, plus the currently loaded frame pair.
///
/// Both cursors always agree; if the processed stream runs out while the raw
/// one still decodes, the pair is desynchronized and the read fails.
pub struct DualSource {
    raw: Box<dyn FrameSource>,
    processed: Box<dyn FrameSource>,
    loaded: Option<(Frame, Frame)>,
}

impl DualSource {
    /// Pair two already-aligned sources. No frame is read.
    pub fn new(raw: Box<dyn FrameSource>, processed: Box<dyn FrameSource>) -> Self {
        Self {
            raw,
            processed,
            loaded: None,
        }
    }

    /// Build the processed twin by running `raw` through a background model,
    /// then pair the two with both cursors at frame 0.
    pub fn with_background<B: BackgroundModel>(
        mut raw: Box<dyn FrameSource>,
        model: &mut B,
    ) -> Result<Self, VideoError> {
        let processed = precompute(raw.as_mut(), model)?;
        Ok(Self::new(raw, Box::new(processed)))
    }

    /// Read the next frame from both streams.
    ///
    /// Returns `Ok(false)` at end of stream; cursors and the loaded pair are
    /// untouched in that case.
    pub fn read_next(&mut self) -> Result<bool, VideoError> {
        let Some(raw_frame) = self.raw.read_next()? else {
            return Ok(false);
        };

        let frame = self.raw.position() - 1;
        let Some(processed_frame) = self.processed.read_next()? else {
            warn!("processed stream exhausted at frame {frame}");
            return Err(VideoError::Desync { frame });
        };

        self.loaded = Some((raw_frame, processed_frame));
        Ok(true)
    }

    /// Reposition both cursors. The loaded pair is kept until the next read.
    pub fn seek(&mut self, index: FrameIndex) {
        self.raw.seek(index);
        self.processed.seek(index);
    }

    /// Shared cursor position: the frame the next read will produce.
    pub fn position(&self) -> FrameIndex {
        debug_assert_eq!(self.raw.position(), self.processed.position());
        self.raw.position()
    }

    /// Currently loaded raw frame, if any read has succeeded.
    pub fn raw_frame(&self) -> Option<&Frame> {
        self.loaded.as_ref().map(|(raw, _)| raw)
    }

    /// Currently loaded processed frame, if any read has succeeded.
    pub fn processed_frame(&self) -> Option<&Frame> {
        self.loaded.as_ref().map(|(_, processed)| processed)
    }
}
