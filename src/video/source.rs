//! Frame decode seam and the in-memory source implementation.

use thiserror::Error;

use crate::FrameIndex;

use super::frame::Frame;

/// Error type for frame decode failures.
#[derive(Debug, Error)]
pub enum VideoError {
    /// A pixel buffer did not match the declared frame dimensions.
    #[error("frame buffer holds {got} bytes, expected {expected}")]
    FrameShape { expected: usize, got: usize },

    /// The stream produced no frames at all.
    #[error("video stream contains no frames")]
    EmptyStream,

    /// The processed stream ended while the raw stream still has frames.
    #[error("processed stream ended at frame {frame} while the raw stream continues")]
    Desync { frame: FrameIndex },

    /// A backend decoder failed to produce a frame.
    #[error("decode failed: {0}")]
    Decode(String),
}

/// Trait for video decode backends.
///
/// Implement this trait to connect any frame decoder to the session. The
/// cursor always names the frame the next read will produce; a failed or
/// exhausted read must leave it unchanged.
///
/// # Example
///
/// ```ignore
/// use droptrack::{Frame, FrameSource, VideoError};
///
/// struct MyDecoder {
///     // Your decoder here
/// }
///
/// impl FrameSource for MyDecoder {
///     fn read_next(&mut self) -> Result<Option<Frame>, VideoError> {
///         // Decode one frame, or return Ok(None) at end of stream
///         Ok(None)
///     }
///
///     fn seek(&mut self, index: usize) {
///         // Reposition the decoder
///     }
///
///     fn position(&self) -> usize {
///         0
///     }
/// }
/// ```
pub trait FrameSource {
    /// Decode the frame under the cursor and advance the cursor by one.
    ///
    /// Returns `Ok(None)` at end of stream, with the cursor unchanged.
    fn read_next(&mut self) -> Result<Option<Frame>, VideoError>;

    /// Move the cursor so the next read produces frame `index`.
    fn seek(&mut self, index: FrameIndex);

    /// Index of the frame the next read will produce.
    fn position(&self) -> FrameIndex;
}

/// Frame source backed by a fully decoded in-memory frame list.
///
/// This is what the preprocessing pass produces for the processed stream,
/// and the natural source for short clips already held in memory.
#[derive(Debug, Clone, Default)]
pub struct BufferedSource {
    frames: Vec<Frame>,
    cursor: FrameIndex,
}

impl BufferedSource {
    /// Create a source over the given frames, cursor at the start.
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// Append a frame at the end of the stream.
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Number of frames in the stream.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the stream holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameSource for BufferedSource {
    fn read_next(&mut self) -> Result<Option<Frame>, VideoError> {
        match self.frames.get(self.cursor) {
            Some(frame) => {
                self.cursor += 1;
                Ok(Some(frame.clone()))
            }
            None => Ok(None),
        }
    }

    fn seek(&mut self, index: FrameIndex) {
        self.cursor = index;
    }

    fn position(&self) -> FrameIndex {
        self.cursor
    }
}
