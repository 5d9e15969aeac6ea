//! Video module: frames, decode sources, background subtraction and the
//! locked-step raw/processed stream pair.

mod background;
mod dual;
mod frame;
mod source;

pub use background::{BackgroundModel, RunningMeanBackground, mask_and, median_blur, precompute};
pub use dual::DualSource;
pub use frame::Frame;
pub use source::{BufferedSource, FrameSource, VideoError};
