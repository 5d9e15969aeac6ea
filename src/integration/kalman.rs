//! Constant-velocity Kalman filter for point tracks using ndarray and a manual/nalgebra-based inverse.

use ndarray::{Array1, Array2};

/// Filter over a 4-dimensional state (x, y, vx, vy) observing positions.
///
/// The filter itself is stateless; callers hold the (mean, covariance) pair
/// and thread it through `predict` and `update`.
#[derive(Debug, Clone)]
pub struct PointKalman {
    motion_mat: Array2<f64>,
    update_mat: Array2<f64>,
    std_position: f64,
    std_velocity: f64,
}

impl Default for PointKalman {
    fn default() -> Self {
        Self::new()
    }
}

impl PointKalman {
    pub fn new() -> Self {
        let ndim = 2;
        let mut motion_mat = Array2::eye(2 * ndim);
        for i in 0..ndim {
            motion_mat[[i, ndim + i]] = 1.0;
        }

        let mut update_mat = Array2::zeros((ndim, 2 * ndim));
        for i in 0..ndim {
            update_mat[[i, i]] = 1.0;
        }

        Self {
            motion_mat,
            update_mat,
            std_position: 1.0,
            std_velocity: 1.0 / 16.0,
        }
    }

    pub fn initiate(&self, measurement: [f64; 2]) -> (Array1<f64>, Array2<f64>) {
        let mut mean = Array1::zeros(4);
        for i in 0..2 {
            mean[i] = measurement[i];
        }

        let std = [
            2.0 * self.std_position,
            2.0 * self.std_position,
            10.0 * self.std_velocity,
            10.0 * self.std_velocity,
        ];

        let mut cov = Array2::zeros((4, 4));
        for i in 0..4 {
            cov[[i, i]] = std[i] * std[i];
        }

        (mean, cov)
    }

    pub fn predict(
        &self,
        mean: &Array1<f64>,
        covariance: &Array2<f64>,
    ) -> (Array1<f64>, Array2<f64>) {
        let std = [
            self.std_position,
            self.std_position,
            self.std_velocity,
            self.std_velocity,
        ];

        let mut motion_cov = Array2::zeros((4, 4));
        for i in 0..4 {
            motion_cov[[i, i]] = std[i] * std[i];
        }

        let new_mean = self.motion_mat.dot(mean);
        let new_covariance = self.motion_mat.dot(covariance).dot(&self.motion_mat.t()) + motion_cov;

        (new_mean, new_covariance)
    }

    pub fn project(
        &self,
        mean: &Array1<f64>,
        covariance: &Array2<f64>,
    ) -> (Array1<f64>, Array2<f64>) {
        let std = [self.std_position, self.std_position];

        let mut innovation_cov = Array2::zeros((2, 2));
        for i in 0..2 {
            innovation_cov[[i, i]] = std[i] * std[i];
        }

        let mean_proj = self.update_mat.dot(mean);
        let covariance_proj =
            self.update_mat.dot(covariance).dot(&self.update_mat.t()) + innovation_cov;

        (mean_proj, covariance_proj)
    }

    pub fn update(
        &self,
        mean: &Array1<f64>,
        covariance: &Array2<f64>,
        measurement: [f64; 2],
    ) -> (Array1<f64>, Array2<f64>) {
        let (projected_mean, projected_cov) = self.project(mean, covariance);

        let measurement_arr = Array1::from_vec(measurement.to_vec());
        let innovation = measurement_arr - projected_mean;

        // K = P * H^T * S^-1
        // Since H is [I 0], P * H^T is the first 2 columns of P (4x2).
        // S is projected_cov (2x2).

        // We use nalgebra internally for 2x2 inversion to avoid BLAS/LAPACK.
        let s_inv = self.invert_2x2(&projected_cov);

        let pht = covariance.dot(&self.update_mat.t()); // 4x2
        let kalman_gain = pht.dot(&s_inv); // 4x2

        let new_mean = mean + kalman_gain.dot(&innovation);
        let new_covariance = covariance - kalman_gain.dot(&projected_cov).dot(&kalman_gain.t());

        (new_mean, new_covariance)
    }

    /// Helper to invert a 2x2 matrix using nalgebra (pure Rust).
    fn invert_2x2(&self, m: &Array2<f64>) -> Array2<f64> {
        let mut nm = nalgebra::Matrix2::zeros();
        for i in 0..2 {
            for j in 0..2 {
                nm[(i, j)] = m[[i, j]];
            }
        }
        let inv = nm.try_inverse().expect("2x2 matrix inversion failed");
        let mut res = Array2::zeros((2, 2));
        for i in 0..2 {
            for j in 0..2 {
                res[[i, j]] = inv[(i, j)];
            }
        }
        res
    }
}
