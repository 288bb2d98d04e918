//! Probability density post-processing: |Ψ|², normalization and contrast.

use log::{debug, warn};
use ndarray::Array3;
use num_complex::Complex64;

use crate::config::RenderSettings;
use crate::error::Result;
use crate::grid::SphericalGrid;
use crate::physics::QuantumNumbers;

/// Power applied to the normalized density to lift faint regions.
pub const CONTRAST_EXPONENT: f64 = 0.5;

/// Lower isosurface threshold, as a percentile of the displayed density.
pub const ISO_MIN_PERCENTILE: f64 = 1.0;

pub fn probability_density(psi: &Array3<Complex64>) -> Array3<f64> {
    psi.mapv(|v| v.norm_sqr())
}

/// Scales the field so its maximum is 1. A field without a positive finite
/// maximum comes back as all zeros.
pub fn normalize(density: &Array3<f64>) -> Array3<f64> {
    let max = nan_max(density.iter().copied());
    match max {
        Some(max) if max > 0.0 && max.is_finite() => density.mapv(|v| v / max),
        _ => {
            warn!("density has no positive maximum; substituting a zero field");
            Array3::zeros(density.raw_dim())
        }
    }
}

pub fn contrast(normalized: &Array3<f64>, exponent: f64) -> Array3<f64> {
    normalized.mapv(|v| v.max(0.0).powf(exponent))
}

/// Largest non-NaN value.
pub fn nan_max(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
}

/// Percentile `q` in [0, 100] with linear interpolation between order
/// statistics, ignoring NaN. `None` when no finite values remain.
pub fn percentile(values: impl IntoIterator<Item = f64>, q: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let q = q.clamp(0.0, 100.0);
    let pos = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let t = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * t)
}

/// Isosurface thresholds for the volume plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsoRange {
    pub min: f64,
    pub max: f64,
}

impl IsoRange {
    pub fn from_density(density: &Array3<f64>) -> Self {
        let min = percentile(density.iter().copied(), ISO_MIN_PERCENTILE).unwrap_or(0.0);
        let max = nan_max(density.iter().copied()).unwrap_or(0.0);
        IsoRange { min, max }
    }
}

/// Everything the plotting layer needs for one orbital.
#[derive(Debug, Clone)]
pub struct DensityVolume {
    pub quantum_numbers: QuantumNumbers,
    pub grid: SphericalGrid,
    /// Normalized, contrast-adjusted density
    pub density: Array3<f64>,
    pub iso: IsoRange,
    /// Maximum of |Ψ|² before normalization
    pub raw_max: f64,
}

impl DensityVolume {
    /// Runs the whole pipeline from scratch: grid, Ψ, |Ψ|², normalize, contrast.
    pub fn compute(qn: QuantumNumbers, settings: &RenderSettings) -> Result<Self> {
        let grid = SphericalGrid::build(settings.rmax, settings.points)?;
        let psi = settings.model.evaluate(qn, &grid);
        let raw = probability_density(&psi);
        let raw_max = nan_max(raw.iter().copied()).unwrap_or(0.0);
        let density = contrast(&normalize(&raw), CONTRAST_EXPONENT);
        let iso = IsoRange::from_density(&density);
        debug!(
            "computed {} ({qn}) on {} points, raw max {raw_max:e}, iso [{:.4}, {:.4}]",
            qn.label(),
            grid.len(),
            iso.min,
            iso.max
        );
        Ok(DensityVolume { quantum_numbers: qn, grid, density, iso, raw_max })
    }

    pub fn is_empty_field(&self) -> bool {
        self.raw_max <= 0.0
    }
}
