//! Built-in centroid tracker backend.
//!
//! Runs on the preprocessed stream, where background pixels are black:
//! each update finds the intensity centroid of the foreground mass inside a
//! search window around the target's last box, smooths it with a
//! constant-velocity Kalman filter, and re-centers the box there. Intended
//! as a dependency-free default; heavier visual trackers plug in through
//! the same `TrackerEngine` seam.

use crate::tracker::Rect;
use crate::video::Frame;

use super::engine::{ObjectTracker, TrackError, TrackerEngine};
use super::kalman::PointKalman;

use ndarray::{Array1, Array2};

/// Factory for [`CentroidTracker`] instances.
#[derive(Debug, Clone)]
pub struct CentroidEngine {
    min_mass: f64,
    search_factor: f32,
}

impl CentroidEngine {
    pub fn new() -> Self {
        Self {
            min_mass: 500.0,
            search_factor: 1.0,
        }
    }

    /// Set the foreground mass below which an update counts as a miss.
    ///
    /// Mass is summed 8-bit intensity, so one saturated pixel contributes
    /// 255.
    pub fn with_min_mass(mut self, min_mass: f64) -> Self {
        self.min_mass = min_mass;
        self
    }

    /// Set the search margin as a multiple of the box dimensions.
    ///
    /// A factor of 1.0 searches a window three boxes wide and tall,
    /// centered on the last known position.
    pub fn with_search_factor(mut self, search_factor: f32) -> Self {
        self.search_factor = search_factor;
        self
    }
}

impl Default for CentroidEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerEngine for CentroidEngine {
    fn start(&mut self, frame: &Frame, seed: Rect) -> Result<Box<dyn ObjectTracker>, TrackError> {
        if seed.is_empty() {
            return Err(TrackError::EmptySeed);
        }
        let bounds = frame_bounds(frame);
        if seed.intersect(&bounds).is_none() {
            return Err(TrackError::SeedOutOfFrame {
                width: frame.width(),
                height: frame.height(),
            });
        }

        let filter = PointKalman::new();
        let (cx, cy) = seed.center();
        let (mean, cov) = filter.initiate([cx as f64, cy as f64]);

        Ok(Box::new(CentroidTracker {
            filter,
            mean,
            cov,
            last_box: seed,
            min_mass: self.min_mass,
            search_factor: self.search_factor,
        }))
    }
}

/// A single target followed by foreground centroid.
pub struct CentroidTracker {
    filter: PointKalman,
    mean: Array1<f64>,
    cov: Array2<f64>,
    last_box: Rect,
    min_mass: f64,
    search_factor: f32,
}

impl CentroidTracker {
    /// Intensity centroid of the window, or `None` when the mass under it
    /// is below the miss threshold.
    fn measure(&self, frame: &Frame, window: &Rect) -> Option<(f64, f64)> {
        let x0 = window.x.floor().max(0.0) as usize;
        let y0 = window.y.floor().max(0.0) as usize;
        let x1 = ((window.x + window.width).ceil() as usize).min(frame.width());
        let y1 = ((window.y + window.height).ceil() as usize).min(frame.height());

        let mut mass = 0.0f64;
        let mut sum_x = 0.0f64;
        let mut sum_y = 0.0f64;
        let pixels = frame.pixels();
        for y in y0..y1 {
            for x in x0..x1 {
                let p = pixels[[y, x]] as f64;
                if p > 0.0 {
                    mass += p;
                    sum_x += p * x as f64;
                    sum_y += p * y as f64;
                }
            }
        }

        if mass < self.min_mass {
            return None;
        }
        Some((sum_x / mass, sum_y / mass))
    }
}

impl ObjectTracker for CentroidTracker {
    fn update(&mut self, frame: &Frame) -> Option<Rect> {
        let margin_x = self.last_box.width * self.search_factor;
        let margin_y = self.last_box.height * self.search_factor;
        let window = self
            .last_box
            .inflate(margin_x, margin_y)
            .intersect(&frame_bounds(frame))?;

        let (mx, my) = self.measure(frame, &window)?;

        let (mean, cov) = self.filter.predict(&self.mean, &self.cov);
        let (mean, cov) = self.filter.update(&mean, &cov, [mx, my]);
        self.mean = mean;
        self.cov = cov;

        let (half_w, half_h) = self.last_box.half_extents();
        self.last_box = Rect::from_center_extents(
            self.mean[0] as f32,
            self.mean[1] as f32,
            half_w,
            half_h,
        );
        Some(self.last_box)
    }
}

fn frame_bounds(frame: &Frame) -> Rect {
    Rect::new(0.0, 0.0, frame.width() as f32, frame.height() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Black frame with a saturated 3x3 blob centered at (cx, cy).
    fn blob_frame(cx: usize, cy: usize) -> Frame {
        let mut pixels = Array2::zeros((32, 32));
        for y in cy - 1..=cy + 1 {
            for x in cx - 1..=cx + 1 {
                pixels[[y, x]] = 255u8;
            }
        }
        Frame::new(pixels)
    }

    #[test]
    fn test_follows_moving_blob() {
        let mut engine = CentroidEngine::new();
        let mut tracker = engine
            .start(&blob_frame(10, 16), Rect::new(7.0, 13.0, 6.0, 6.0))
            .unwrap();

        let mut centers_x = Vec::new();
        for step in 1..=4 {
            let rect = tracker.update(&blob_frame(10 + 2 * step, 16)).unwrap();
            centers_x.push(rect.center().0);
        }

        // Moving right by 2 per frame; the filtered track follows.
        assert!(centers_x[3] > centers_x[0] + 2.0);
        assert!(centers_x[3] > 13.0 && centers_x[3] < 19.0);
    }

    #[test]
    fn test_empty_frame_is_a_miss() {
        let mut engine = CentroidEngine::new();
        let mut tracker = engine
            .start(&blob_frame(10, 10), Rect::new(7.0, 7.0, 6.0, 6.0))
            .unwrap();

        assert!(tracker.update(&Frame::filled(32, 32, 0)).is_none());

        // The target coming back is picked up again.
        assert!(tracker.update(&blob_frame(11, 10)).is_some());
    }

    #[test]
    fn test_box_size_is_preserved() {
        let mut engine = CentroidEngine::new();
        let mut tracker = engine
            .start(&blob_frame(10, 10), Rect::new(7.0, 7.0, 6.0, 4.0))
            .unwrap();

        let rect = tracker.update(&blob_frame(10, 10)).unwrap();
        assert_eq!(rect.width, 6.0);
        assert_eq!(rect.height, 4.0);
    }

    #[test]
    fn test_rejects_empty_seed() {
        let mut engine = CentroidEngine::new();
        assert!(matches!(
            engine.start(&blob_frame(10, 10), Rect::default()),
            Err(TrackError::EmptySeed)
        ));
    }

    #[test]
    fn test_rejects_seed_outside_frame() {
        let mut engine = CentroidEngine::new();
        assert!(matches!(
            engine.start(&blob_frame(10, 10), Rect::new(100.0, 100.0, 5.0, 5.0)),
            Err(TrackError::SeedOutOfFrame {
                width: 32,
                height: 32
            })
        ));
    }
}
