//! Background subtraction and the stream preprocessing pass.
//!
//! The processed stream the trackers run on is built ahead of time: every
//! raw frame goes through a background model, the foreground mask is
//! median-filtered to kill speckle, and the mask is ANDed with the original
//! intensities so foreground objects keep their appearance.

use log::debug;
use ndarray::{Array2, Zip};

use super::frame::Frame;
use super::source::{BufferedSource, FrameSource, VideoError};

/// Median filter kernel applied to foreground masks during preprocessing.
const MASK_MEDIAN_KSIZE: usize = 5;

/// Trait for stateful background subtraction models.
///
/// `apply` both classifies the frame against the current background estimate
/// and folds the frame into that estimate, so call order is the stream order.
pub trait BackgroundModel {
    /// Update the model with `frame` and return its foreground mask.
    ///
    /// Mask values are 0 (background) or 255 (foreground), matching the
    /// frame's dimensions.
    fn apply(&mut self, frame: &Frame) -> Array2<u8>;
}

/// Running-average background model.
///
/// Keeps an exponentially weighted mean of the stream and marks pixels
/// deviating from it by more than a threshold as foreground. The first frame
/// seeds the mean, so its mask is empty.
#[derive(Debug, Clone)]
pub struct RunningMeanBackground {
    mean: Option<Array2<f32>>,
    learning_rate: f32,
    threshold: f32,
}

impl RunningMeanBackground {
    /// Create a model with the given per-frame learning rate and foreground
    /// intensity threshold.
    pub fn new(learning_rate: f32, threshold: f32) -> Self {
        Self {
            mean: None,
            learning_rate,
            threshold,
        }
    }
}

impl Default for RunningMeanBackground {
    fn default() -> Self {
        Self::new(0.05, 25.0)
    }
}

impl BackgroundModel for RunningMeanBackground {
    fn apply(&mut self, frame: &Frame) -> Array2<u8> {
        let pix = frame.pixels().mapv(|p| p as f32);

        let Some(mean) = self.mean.as_mut() else {
            let mask = Array2::zeros(pix.raw_dim());
            self.mean = Some(pix);
            return mask;
        };

        let mut mask = Array2::zeros(pix.raw_dim());
        Zip::from(&mut mask)
            .and(&pix)
            .and(&*mean)
            .for_each(|m, &p, &bg| {
                if (p - bg).abs() > self.threshold {
                    *m = 255;
                }
            });

        Zip::from(mean).and(&pix).for_each(|bg, &p| {
            *bg += self.learning_rate * (p - *bg);
        });

        mask
    }
}

/// Median-filter an 8-bit image with a `ksize` x `ksize` window.
///
/// `ksize` must be odd. Borders replicate the edge pixel.
pub fn median_blur(src: &Array2<u8>, ksize: usize) -> Array2<u8> {
    debug_assert!(ksize % 2 == 1, "median kernel must be odd");

    let (rows, cols) = src.dim();
    let half = (ksize / 2) as isize;
    let mut dst = Array2::zeros((rows, cols));
    let mut window = Vec::with_capacity(ksize * ksize);

    for r in 0..rows {
        for c in 0..cols {
            window.clear();
            for dr in -half..=half {
                for dc in -half..=half {
                    let rr = (r as isize + dr).clamp(0, rows as isize - 1) as usize;
                    let cc = (c as isize + dc).clamp(0, cols as isize - 1) as usize;
                    window.push(src[[rr, cc]]);
                }
            }
            window.sort_unstable();
            dst[[r, c]] = window[window.len() / 2];
        }
    }

    dst
}

/// Keep frame intensities where the mask is set, zero elsewhere.
pub fn mask_and(frame: &Frame, mask: &Array2<u8>) -> Frame {
    let mut pixels = frame.pixels().clone();
    Zip::from(&mut pixels).and(mask).for_each(|p, &m| {
        *p &= m;
    });
    Frame::new(pixels)
}

/// Run the whole raw stream through the background model and collect the
/// processed frames.
///
/// Rewinds `raw` to frame 0 before and after the pass, so the caller can
/// start navigating from the beginning on both streams.
pub fn precompute<B: BackgroundModel>(
    raw: &mut dyn FrameSource,
    model: &mut B,
) -> Result<BufferedSource, VideoError> {
    raw.seek(0);

    let mut processed = BufferedSource::default();
    while let Some(frame) = raw.read_next()? {
        let mask = model.apply(&frame);
        let mask = median_blur(&mask, MASK_MEDIAN_KSIZE);
        processed.push(mask_and(&frame, &mask));
    }

    raw.seek(0);
    debug!("precomputed {} processed frames", processed.len());
    Ok(processed)
}
