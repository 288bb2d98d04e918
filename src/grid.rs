//! Cartesian sampling lattice with derived spherical coordinates.

use ndarray::{Array1, Array3, Zip};
use std::f64::consts::FRAC_PI_2;

use crate::error::{OrbitalError, Result};

/// Polar angle used where r = 0 (arccos of a zeroed z/r).
pub const ORIGIN_THETA: f64 = FRAC_PI_2;

/// A points³ lattice over [-rmax, rmax]³. Element `[i, j, k]` is the point
/// `(axis[i], axis[j], axis[k])`.
#[derive(Debug, Clone)]
pub struct SphericalGrid {
    pub rmax: f64,
    pub points: usize,
    pub axis: Array1<f64>,
    pub x: Array3<f64>,
    pub y: Array3<f64>,
    pub z: Array3<f64>,
    pub r: Array3<f64>,
    pub theta: Array3<f64>,
    pub phi: Array3<f64>,
}

impl SphericalGrid {
    pub fn build(rmax: f64, points: usize) -> Result<Self> {
        if points == 0 {
            return Err(OrbitalError::InvalidGrid("points must be at least 1".into()));
        }
        if !rmax.is_finite() || rmax <= 0.0 {
            return Err(OrbitalError::InvalidGrid(format!(
                "rmax must be positive and finite, got {rmax}"
            )));
        }

        let axis = linspace(-rmax, rmax, points);
        let shape = (points, points, points);
        let x = Array3::from_shape_fn(shape, |(i, _, _)| axis[i]);
        let y = Array3::from_shape_fn(shape, |(_, j, _)| axis[j]);
        let z = Array3::from_shape_fn(shape, |(_, _, k)| axis[k]);

        let r = Zip::from(&x)
            .and(&y)
            .and(&z)
            .map_collect(|&x, &y, &z| (x * x + y * y + z * z).sqrt());
        let theta = Zip::from(&z).and(&r).map_collect(|&z, &r| polar_angle(z, r));
        let phi = Zip::from(&y).and(&x).map_collect(|&y, &x| y.atan2(x));

        Ok(SphericalGrid { rmax, points, axis, x, y, z, r, theta, phi })
    }

    pub fn len(&self) -> usize {
        self.r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }
}

/// θ = arccos(z/r), or `ORIGIN_THETA` at the origin.
pub fn polar_angle(z: f64, r: f64) -> f64 {
    if r == 0.0 {
        ORIGIN_THETA
    } else {
        // Rounding can push |z/r| a hair past 1
        (z / r).clamp(-1.0, 1.0).acos()
    }
}

/// Evenly spaced samples with both endpoints included; a single sample sits at `start`.
pub fn linspace(start: f64, end: f64, count: usize) -> Array1<f64> {
    match count {
        0 => Array1::zeros(0),
        1 => Array1::from_elem(1, start),
        _ => {
            let step = (end - start) / (count - 1) as f64;
            Array1::from_shape_fn(count, |i| {
                if i == count - 1 {
                    end
                } else {
                    start + step * i as f64
                }
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn min_max(a: &Array3<f64>) -> (f64, f64) {
        a.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    #[test]
    fn test_grid_spans_requested_range() {
        let grid = SphericalGrid::build(8.0, 7).unwrap();
        assert_eq!(grid.x.shape(), &[7, 7, 7]);
        assert_eq!(grid.len(), 343);
        for axis in [&grid.x, &grid.y, &grid.z] {
            assert_eq!(min_max(axis), (-8.0, 8.0));
        }
        assert_eq!(grid.axis.len(), 7);
        assert_eq!(grid.axis[0], -8.0);
        assert_eq!(grid.axis[6], 8.0);
    }

    #[test]
    fn test_lattice_indexing() {
        let grid = SphericalGrid::build(1.0, 3).unwrap();
        assert_eq!(grid.x[[0, 1, 2]], -1.0);
        assert_eq!(grid.y[[0, 1, 2]], 0.0);
        assert_eq!(grid.z[[0, 1, 2]], 1.0);
    }

    #[test]
    fn test_origin_theta_is_fallback() {
        let grid = SphericalGrid::build(2.0, 5).unwrap();
        assert_eq!(grid.r[[2, 2, 2]], 0.0);
        assert_eq!(grid.theta[[2, 2, 2]], ORIGIN_THETA);
        assert!(grid.theta.iter().all(|t| !t.is_nan()));
    }

    #[test]
    fn test_spherical_ranges() {
        let grid = SphericalGrid::build(3.0, 9).unwrap();
        assert!(grid.r.iter().all(|&r| r >= 0.0));
        assert!(grid.theta.iter().all(|&t| (0.0..=PI).contains(&t)));
        assert!(grid.phi.iter().all(|&p| p > -PI - 1e-15 && p <= PI));
    }

    #[test]
    fn test_spherical_values() {
        let grid = SphericalGrid::build(1.0, 3).unwrap();
        // (0, 0, 1): on the +z axis
        assert!((grid.r[[1, 1, 2]] - 1.0).abs() < 1e-15);
        assert_eq!(grid.theta[[1, 1, 2]], 0.0);
        // (0, 0, -1)
        assert!((grid.theta[[1, 1, 0]] - PI).abs() < 1e-15);
        // (0, 1, 0): theta = pi/2, phi = pi/2
        assert!((grid.theta[[1, 2, 1]] - PI / 2.0).abs() < 1e-15);
        assert!((grid.phi[[1, 2, 1]] - PI / 2.0).abs() < 1e-15);
        // (-1, 0, 0): phi = pi
        assert!((grid.phi[[0, 1, 1]] - PI).abs() < 1e-15);
    }

    #[test]
    fn test_single_point_grid() {
        let grid = SphericalGrid::build(5.0, 1).unwrap();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.x[[0, 0, 0]], -5.0);
    }

    #[test]
    fn test_degenerate_grid_rejected() {
        assert!(SphericalGrid::build(1.0, 0).is_err());
        assert!(SphericalGrid::build(0.0, 10).is_err());
        assert!(SphericalGrid::build(-2.0, 10).is_err());
        assert!(SphericalGrid::build(f64::NAN, 10).is_err());
    }

    #[test]
    fn test_linspace() {
        let v = linspace(-1.0, 1.0, 5);
        assert_eq!(v.to_vec(), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(linspace(0.0, 1.0, 0).len(), 0);
    }
}
