//! Interpolating B-splines of degree 1 to 3
//!
//! Knot placement:
//! - odd degree: "not-a-knot", interior knots at the data sites with the
//!   first and last (k - 1) / 2 interior sites dropped
//! - degree 2: interior knots at the midpoints between data sites, dropping
//!   the first and last midpoint
//!
//! with boundary knots repeated k + 1 times. The coefficients solve the
//! collocation system `sum_j c_j B_j(x_i) = y_i`.

use faer::Mat;
use thiserror::Error;

const SINGULAR_PIVOT_EPSILON: f64 = 1.0e-15;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplineError {
    #[error("degree {0} is not supported (expected 1, 2 or 3)")]
    UnsupportedDegree(usize),

    #[error("{points} points are not enough for a degree {degree} spline")]
    TooFewPoints { points: usize, degree: usize },

    #[error("x and y lengths differ ({x} vs {y})")]
    LengthMismatch { x: usize, y: usize },

    #[error("sample values must be finite")]
    NonFinite,

    #[error("x must be strictly increasing (duplicate or unordered value at index {0})")]
    NotIncreasing(usize),

    #[error("collocation matrix is singular")]
    Singular,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BSpline {
    knots: Vec<f64>,
    coefficients: Vec<f64>,
    degree: usize,
}

impl BSpline {
    /// Build the spline of the given degree passing through every (x, y)
    pub fn interpolate(x: &[f64], y: &[f64], degree: usize) -> Result<Self, SplineError> {
        if !(1..=3).contains(&degree) {
            return Err(SplineError::UnsupportedDegree(degree));
        }
        if x.len() != y.len() {
            return Err(SplineError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        if x.len() < degree + 1 {
            return Err(SplineError::TooFewPoints {
                points: x.len(),
                degree,
            });
        }
        if x.iter().chain(y).any(|v| !v.is_finite()) {
            return Err(SplineError::NonFinite);
        }
        if let Some(i) = x.windows(2).position(|w| w[1] <= w[0]) {
            return Err(SplineError::NotIncreasing(i + 1));
        }

        let knots = interpolation_knots(x, degree);
        let n = x.len();

        let mut collocation = Mat::<f64>::zeros(n, n);
        let mut basis = vec![0.0; degree + 1];
        for (i, &xi) in x.iter().enumerate() {
            let span = find_span(&knots, degree, n, xi);
            basis_functions(&knots, degree, span, xi, &mut basis);
            for (r, &b) in basis.iter().enumerate() {
                collocation[(i, span - degree + r)] = b;
            }
        }

        let coefficients = lu_solve(collocation, y)?;
        Ok(Self {
            knots,
            coefficients,
            degree,
        })
    }

    /// (lower, upper) end of the interval the spline is defined on
    pub fn domain(&self) -> (f64, f64) {
        let n = self.coefficients.len();
        (self.knots[self.degree], self.knots[n])
    }

    /// Value at `x`; NaN outside the domain
    pub fn evaluate(&self, x: f64) -> f64 {
        let (lower, upper) = self.domain();
        if x.is_nan() || x < lower || x > upper {
            return f64::NAN;
        }

        let n = self.coefficients.len();
        let span = find_span(&self.knots, self.degree, n, x);
        let mut basis = vec![0.0; self.degree + 1];
        basis_functions(&self.knots, self.degree, span, x, &mut basis);

        basis
            .iter()
            .enumerate()
            .map(|(r, b)| b * self.coefficients[span - self.degree + r])
            .sum()
    }
}

fn interpolation_knots(x: &[f64], degree: usize) -> Vec<f64> {
    let n = x.len();
    let interior: Vec<f64> = if degree % 2 == 1 {
        let skip = (degree - 1) / 2 + 1;
        x[skip..n - skip].to_vec()
    } else {
        // midpoints between sites, without the first and last one
        x.windows(2)
            .map(|w| (w[0] + w[1]) / 2.0)
            .skip(1)
            .take((n - 1).saturating_sub(2))
            .collect()
    };

    let mut knots = Vec::with_capacity(n + degree + 1);
    knots.extend(std::iter::repeat(x[0]).take(degree + 1));
    knots.extend(interior);
    knots.extend(std::iter::repeat(x[n - 1]).take(degree + 1));
    knots
}

/// Knot span index `l` with `t[l] <= x < t[l + 1]`, clamped to `degree..n`
fn find_span(knots: &[f64], degree: usize, n: usize, x: f64) -> usize {
    degree + knots[degree + 1..n].partition_point(|&t| t <= x)
}

/// Non-zero basis functions `B_{span-degree..=span}` at `x` (Cox-de Boor)
fn basis_functions(knots: &[f64], degree: usize, span: usize, x: f64, out: &mut [f64]) {
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];

    out[0] = 1.0;
    for j in 1..=degree {
        left[j] = x - knots[span + 1 - j];
        right[j] = knots[span + j] - x;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = out[r] / (right[r + 1] + left[j - r]);
            out[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        out[j] = saved;
    }
}

/// Solve `a * c = rhs` through an in-place LU factorisation with partial
/// pivoting. Multipliers are kept below the diagonal of `lu`.
fn lu_solve(mut lu: Mat<f64>, rhs: &[f64]) -> Result<Vec<f64>, SplineError> {
    let dimension = lu.nrows();
    let mut pivots: Vec<usize> = (0..dimension).collect();

    for pivot_col in 0..dimension {
        let pivot_row = select_pivot_row(&lu, pivot_col);
        if lu[(pivot_row, pivot_col)].abs() <= SINGULAR_PIVOT_EPSILON {
            return Err(SplineError::Singular);
        }
        if pivot_row != pivot_col {
            swap_rows(&mut lu, pivot_col, pivot_row);
            pivots.swap(pivot_col, pivot_row);
        }

        let pivot = lu[(pivot_col, pivot_col)];
        for row in (pivot_col + 1)..dimension {
            lu[(row, pivot_col)] /= pivot;
            let multiplier = lu[(row, pivot_col)];
            if multiplier == 0.0 {
                continue;
            }
            for col in (pivot_col + 1)..dimension {
                let updated = lu[(row, col)] - multiplier * lu[(pivot_col, col)];
                lu[(row, col)] = updated;
            }
        }
    }

    let mut forward = vec![0.0; dimension];
    for row in 0..dimension {
        let mut value = rhs[pivots[row]];
        for col in 0..row {
            value -= lu[(row, col)] * forward[col];
        }
        forward[row] = value;
    }

    let mut solution = vec![0.0; dimension];
    for row in (0..dimension).rev() {
        let mut value = forward[row];
        for col in (row + 1)..dimension {
            value -= lu[(row, col)] * solution[col];
        }
        solution[row] = value / lu[(row, row)];
    }

    if solution.iter().any(|v| !v.is_finite()) {
        return Err(SplineError::Singular);
    }
    Ok(solution)
}

fn select_pivot_row(matrix: &Mat<f64>, pivot_col: usize) -> usize {
    let mut best_row = pivot_col;
    let mut best = matrix[(pivot_col, pivot_col)].abs();
    for row in (pivot_col + 1)..matrix.nrows() {
        let candidate = matrix[(row, pivot_col)].abs();
        if candidate > best {
            best = candidate;
            best_row = row;
        }
    }
    best_row
}

fn swap_rows(matrix: &mut Mat<f64>, lhs: usize, rhs: usize) {
    for col in 0..matrix.ncols() {
        let value = matrix[(lhs, col)];
        matrix[(lhs, col)] = matrix[(rhs, col)];
        matrix[(rhs, col)] = value;
    }
}
