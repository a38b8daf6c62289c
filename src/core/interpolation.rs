//! Interpolation engine: downwind distance at a temperature of interest
//!
//! Samples are ordered by temperature, hottest first: a dispersing cloud
//! cools as it travels, so the hottest sample is nearest the source. The
//! engine relies on that ordering and does not check the curve is monotonic.
//!
//! Extrapolation policy:
//! - above the hottest sample there is no answer (upwind of the source)
//! - below the coldest sample the farthest measured distance is returned,
//!   whatever the method

use crate::core::spline::{BSpline, SplineError};
use crate::types::InterpolationMethod;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpolationError {
    #[error("at least 2 samples are required, got {0}")]
    InsufficientSamples(usize),

    #[error("{temperatures} temperatures but {distances} distances")]
    LengthMismatch {
        temperatures: usize,
        distances: usize,
    },

    #[error("samples must be finite numbers")]
    NonFiniteSample,

    #[error("target temperature must be a finite number")]
    NonFiniteTarget,

    #[error("target temperature {target} degC is above the highest sampled temperature {max} degC")]
    AboveRange { target: f64, max: f64 },

    #[error("{method} fit failed: {source}")]
    Fit {
        method: InterpolationMethod,
        #[source]
        source: SplineError,
    },

    #[error("{method} interpolant is undefined at {target} degC")]
    Undefined {
        method: InterpolationMethod,
        target: f64,
    },
}

/// Temperature/distance samples sorted by descending temperature
#[derive(Debug, Clone, PartialEq)]
struct Curve {
    temperatures: Vec<f64>,
    distances: Vec<f64>,
}

impl Curve {
    fn sorted(temperatures: &[f64], distances: &[f64]) -> Self {
        let mut order: Vec<usize> = (0..temperatures.len()).collect();
        order.sort_by(|&a, &b| temperatures[b].total_cmp(&temperatures[a]));
        Self {
            temperatures: order.iter().map(|&i| temperatures[i]).collect(),
            distances: order.iter().map(|&i| distances[i]).collect(),
        }
    }

    fn len(&self) -> usize {
        self.temperatures.len()
    }

    fn max_temperature(&self) -> f64 {
        self.temperatures[0]
    }

    fn min_temperature(&self) -> f64 {
        self.temperatures[self.len() - 1]
    }

    /// Distance of the coldest sample, i.e. the farthest measured point
    fn farthest_distance(&self) -> f64 {
        self.distances[self.len() - 1]
    }

    /// Samples in ascending temperature order
    fn ascending(&self) -> (Vec<f64>, Vec<f64>) {
        (
            self.temperatures.iter().rev().copied().collect(),
            self.distances.iter().rev().copied().collect(),
        )
    }
}

pub struct InterpolationEngine;

impl InterpolationEngine {
    /// Distance at which `target` degC is reached, or `None` when there is
    /// no valid answer. Failures are logged, never raised.
    pub fn interpolate(
        temperatures: &[f64],
        distances: &[f64],
        target: f64,
        method: InterpolationMethod,
    ) -> Option<f64> {
        match Self::try_interpolate(temperatures, distances, target, method) {
            Ok(distance) => Some(distance),
            Err(e @ (InterpolationError::Fit { .. } | InterpolationError::Undefined { .. })) => {
                error!("Interpolation failed: {}", e);
                None
            }
            Err(e) => {
                debug!("No interpolation result: {}", e);
                None
            }
        }
    }

    /// Same as [`InterpolationEngine::interpolate`], with the reason for a
    /// missing result
    pub fn try_interpolate(
        temperatures: &[f64],
        distances: &[f64],
        target: f64,
        method: InterpolationMethod,
    ) -> Result<f64, InterpolationError> {
        let samples = temperatures.len().min(distances.len());
        if samples < 2 {
            return Err(InterpolationError::InsufficientSamples(samples));
        }
        if temperatures.len() != distances.len() {
            return Err(InterpolationError::LengthMismatch {
                temperatures: temperatures.len(),
                distances: distances.len(),
            });
        }
        if temperatures.iter().chain(distances).any(|v| !v.is_finite()) {
            return Err(InterpolationError::NonFiniteSample);
        }
        if !target.is_finite() {
            return Err(InterpolationError::NonFiniteTarget);
        }

        let curve = Curve::sorted(temperatures, distances);

        if target > curve.max_temperature() {
            return Err(InterpolationError::AboveRange {
                target,
                max: curve.max_temperature(),
            });
        }
        if target < curve.min_temperature() {
            return Ok(curve.farthest_distance());
        }

        match method {
            InterpolationMethod::Linear => Ok(linear(&curve, target)),
            InterpolationMethod::Quadratic => fitted(&curve, target, method, 2),
            InterpolationMethod::Cubic => fitted(&curve, target, method, 3),
            InterpolationMethod::Nearest => Ok(nearest(&curve, target)),
        }
    }
}

/// Piecewise-linear interpolation; `target` lies within the sampled range
fn linear(curve: &Curve, target: f64) -> f64 {
    let (temps, dists) = curve.ascending();
    let n = temps.len();

    let upper = temps.partition_point(|&t| t <= target);
    if upper >= n {
        return dists[n - 1];
    }
    let lower = upper.saturating_sub(1);

    let (t0, t1) = (temps[lower], temps[upper]);
    let (d0, d1) = (dists[lower], dists[upper]);
    if t1 == t0 {
        return d0;
    }
    d0 + (target - t0) * (d1 - d0) / (t1 - t0)
}

/// Spline of the given degree through all samples, falling back to linear
/// when there are too few of them
fn fitted(
    curve: &Curve,
    target: f64,
    method: InterpolationMethod,
    degree: usize,
) -> Result<f64, InterpolationError> {
    if curve.len() < method.min_samples() {
        return Ok(linear(curve, target));
    }

    let (temps, dists) = curve.ascending();
    let spline = BSpline::interpolate(&temps, &dists, degree)
        .map_err(|source| InterpolationError::Fit { method, source })?;

    let distance = spline.evaluate(target);
    if distance.is_nan() {
        return Err(InterpolationError::Undefined { method, target });
    }
    Ok(distance)
}

/// Distance of the sample closest in temperature; ties go to the hotter one
fn nearest(curve: &Curve, target: f64) -> f64 {
    let mut best = 0;
    for (i, t) in curve.temperatures.iter().enumerate() {
        if (t - target).abs() < (curve.temperatures[best] - target).abs() {
            best = i;
        }
    }
    curve.distances[best]
}
