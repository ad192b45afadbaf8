//! Gaussian curve sampling over the fixed `[0, 100]` domain.
//!
//! [`normal_distribution`] is the raw generator and performs no input checks:
//! a zero standard deviation or a single sample propagate as NaN/infinity in
//! the output. Callers facing untrusted input go through
//! [`DistributionParams::validate`] first.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Point};

/// Lower and upper bound of the sampled x axis.
pub const DOMAIN_START: f64 = 0.0;
pub const DOMAIN_END: f64 = 100.0;

/// Upper bound on samples accepted through [`DistributionParams::validate`].
pub const MAX_POINTS: usize = 10_000;

/// Normal probability density at `x`.
pub fn pdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    let z = (x - mean) / std_dev;
    (1.0 / (std_dev * (2.0 * PI).sqrt())) * (-0.5 * z.powi(2)).exp()
}

/// Sample `num_points` evenly spaced points of the normal density over `[0, 100]`.
///
/// The step is computed in floating point, so `num_points == 1` yields an
/// infinite step and a NaN abscissa, and `num_points == 0` yields no points.
pub fn normal_distribution(mean: f64, std_dev: f64, num_points: usize) -> Vec<Point> {
    let step = (DOMAIN_END - DOMAIN_START) / (num_points as f64 - 1.0);

    (0..num_points)
        .map(|i| {
            let x = DOMAIN_START + i as f64 * step;
            Point::new(x, pdf(x, mean, std_dev))
        })
        .collect()
}

/// Parameters for one curve, as accepted from clients or configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionParams {
    pub mean: f64,
    pub std_dev: f64,
    pub num_points: usize,
}

impl DistributionParams {
    pub fn new(mean: f64, std_dev: f64, num_points: usize) -> Self {
        Self {
            mean,
            std_dev,
            num_points,
        }
    }

    /// Reject inputs that would make the generator emit non-finite values.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.mean.is_finite() {
            return Err(DomainError::validation("mean must be a finite number"));
        }
        if !self.std_dev.is_finite() || self.std_dev == 0.0 {
            return Err(DomainError::validation(
                "std_dev must be a finite, non-zero number",
            ));
        }
        if self.num_points < 2 {
            return Err(DomainError::validation("points must be at least 2"));
        }
        if self.num_points > MAX_POINTS {
            return Err(DomainError::validation(format!(
                "points cannot exceed {MAX_POINTS}"
            )));
        }
        Ok(())
    }

    pub fn generate(&self) -> Vec<Point> {
        normal_distribution(self.mean, self.std_dev, self.num_points)
    }
}

impl Default for DistributionParams {
    fn default() -> Self {
        Self::new(50.0, 10.0, 101)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64, rel: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= expected.abs() * rel,
            "expected {expected}, got {actual} (diff {diff})"
        );
    }

    #[test]
    fn length_matches_requested_points() {
        for n in [2, 3, 5, 10, 101, 1000] {
            assert_eq!(normal_distribution(50.0, 10.0, n).len(), n);
        }
    }

    #[test]
    fn covers_whole_domain() {
        for n in [2, 7, 33, 101] {
            let points = normal_distribution(30.0, 5.0, n);
            assert!((points[0].x - 0.0).abs() < EPS);
            assert!((points[n - 1].x - 100.0).abs() < EPS);
        }
    }

    #[test]
    fn spacing_is_uniform() {
        let n = 13;
        let expected = 100.0 / (n as f64 - 1.0);
        let points = normal_distribution(50.0, 10.0, n);
        for pair in points.windows(2) {
            assert!((pair[1].x - pair[0].x - expected).abs() < EPS);
        }
    }

    #[test]
    fn densities_follow_the_normal_pdf() {
        let points = normal_distribution(50.0, 10.0, 5);
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 25.0, 50.0, 75.0, 100.0]);

        assert_close(points[0].y, 1.486_719_5e-7, 1e-6);
        assert_close(points[1].y, 1.752_830_0e-3, 1e-6);
        assert_close(points[2].y, 3.989_422_8e-2, 1e-8);
        assert_close(points[3].y, 1.752_830_0e-3, 1e-6);
        assert_close(points[4].y, 1.486_719_5e-7, 1e-6);
    }

    #[test]
    fn curve_is_symmetric_around_centred_mean() {
        let points = normal_distribution(50.0, 10.0, 5);
        assert_eq!(points[1].y, points[3].y);
        assert_eq!(points[0].y, points[4].y);

        let dense = normal_distribution(50.0, 7.5, 101);
        for i in 0..50 {
            assert!((dense[i].y - dense[100 - i].y).abs() < 1e-15);
        }
    }

    #[test]
    fn output_is_deterministic() {
        assert_eq!(
            normal_distribution(42.0, 3.0, 17),
            normal_distribution(42.0, 3.0, 17)
        );
    }

    #[test]
    fn single_point_propagates_nan() {
        let points = normal_distribution(50.0, 10.0, 1);
        assert_eq!(points.len(), 1);
        assert!(points[0].x.is_nan());
        assert!(points[0].y.is_nan());
    }

    #[test]
    fn zero_points_yields_empty_curve() {
        assert!(normal_distribution(50.0, 10.0, 0).is_empty());
    }

    #[test]
    fn zero_std_dev_propagates_non_finite_values() {
        let points = normal_distribution(50.0, 0.0, 5);
        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|p| !p.y.is_finite()));
    }

    #[test]
    fn negative_std_dev_keeps_sign_of_coefficient() {
        let points = normal_distribution(50.0, -10.0, 5);
        assert_close(points[2].y, -3.989_422_8e-2, 1e-8);
        assert!(points.iter().all(|p| p.y < 0.0));
    }

    #[test]
    fn validate_rejects_degenerate_params() {
        assert!(DistributionParams::new(50.0, 10.0, 1).validate().is_err());
        assert!(DistributionParams::new(50.0, 0.0, 5).validate().is_err());
        assert!(DistributionParams::new(f64::NAN, 10.0, 5)
            .validate()
            .is_err());
        assert!(DistributionParams::new(50.0, f64::INFINITY, 5)
            .validate()
            .is_err());
        assert!(DistributionParams::new(50.0, 10.0, MAX_POINTS + 1)
            .validate()
            .is_err());
    }

    #[test]
    fn validate_accepts_negative_std_dev() {
        let params = DistributionParams::new(50.0, -10.0, 5);
        assert!(params.validate().is_ok());
        assert_eq!(params.generate().len(), 5);
    }

    #[test]
    fn default_params_are_valid() {
        let params = DistributionParams::default();
        params.validate().unwrap();
        assert_eq!(params.generate().len(), 101);
    }
}
