//! L1-penalized coordinate descent (lasso).
//!
//! Minimizes `½‖y − Xw‖² + λ‖w‖₁` one coordinate at a time, in a fixed cyclic
//! order `0..k` every sweep. Each coordinate update is exact:
//!
//! ```text
//! rho_j   = x_jᵀ r + w_j ‖x_j‖²        (residual with j's own term added back)
//! w_j_new = soft_threshold(rho_j, λ) / ‖x_j‖²
//! r      -= (w_j_new − w_j) x_j
//! ```
//!
//! A single residual vector is maintained incrementally across coordinates,
//! so a sweep costs `O(n k)` rather than recomputing `y − Xw` per coordinate.
//! The visiting order is part of the numeric contract: it decides which
//! solution is reached before `max_iter`, and it never changes between runs.

use ndarray::{Array1, ArrayView1, ArrayView2, Axis};

use super::{SolverError, SparseSolver};

/// Floor applied to squared column norms.
const MIN_NORM: f64 = 1e-12;

/// Weight changes at or below this are not applied.
const MIN_DELTA: f64 = 1e-12;

/// Parameters for [`CoordinateDescent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LassoParams {
    /// L1 penalty. `0.0` gives ordinary least squares.
    pub lambda: f64,
    /// Stop once a full sweep changes no weight by this much or more.
    pub tolerance: f64,
    /// Maximum number of sweeps.
    pub max_iter: usize,
}

impl LassoParams {
    pub const DEFAULT_LAMBDA: f64 = 0.01;
    pub const DEFAULT_TOLERANCE: f64 = 1e-5;
    pub const DEFAULT_MAX_ITER: usize = 1000;

    /// Create parameters, replacing invalid values with defaults.
    ///
    /// - negative (or NaN) `lambda` → 0.01
    /// - non-positive (or NaN) `tolerance` → 1e-5
    /// - `max_iter == 0` → 1000
    pub fn new(lambda: f64, tolerance: f64, max_iter: usize) -> Self {
        Self {
            lambda,
            tolerance,
            max_iter,
        }
        .normalized()
    }

    /// Copy of `self` with invalid values replaced by defaults.
    pub fn normalized(self) -> Self {
        Self {
            lambda: if self.lambda >= 0.0 {
                self.lambda
            } else {
                Self::DEFAULT_LAMBDA
            },
            tolerance: if self.tolerance > 0.0 {
                self.tolerance
            } else {
                Self::DEFAULT_TOLERANCE
            },
            max_iter: if self.max_iter > 0 {
                self.max_iter
            } else {
                Self::DEFAULT_MAX_ITER
            },
        }
    }
}

impl Default for LassoParams {
    fn default() -> Self {
        Self {
            lambda: Self::DEFAULT_LAMBDA,
            tolerance: Self::DEFAULT_TOLERANCE,
            max_iter: Self::DEFAULT_MAX_ITER,
        }
    }
}

/// Outcome of a coordinate descent run.
#[derive(Debug, Clone, PartialEq)]
pub struct LassoFit {
    /// One weight per predictor column.
    pub weights: Array1<f64>,
    /// Number of full sweeps performed.
    pub sweeps: usize,
    /// `false` if `max_iter` was exhausted before the tolerance was met.
    pub converged: bool,
}

/// Cyclic coordinate descent solver for the lasso.
///
/// Stateless apart from its parameters, so one instance can serve many
/// concurrent subproblems.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use surd::solver::{CoordinateDescent, LassoParams, SparseSolver};
///
/// let solver = CoordinateDescent::new(LassoParams::new(0.0, 1e-14, 10_000));
/// let x = array![[1.0], [2.0], [3.0]];
/// let y = array![2.0, 4.0, 6.0];
///
/// let w = solver.fit(x.view(), y.view()).unwrap();
/// assert!((w[0] - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoordinateDescent {
    params: LassoParams,
}

impl CoordinateDescent {
    pub fn new(params: LassoParams) -> Self {
        Self {
            params: params.normalized(),
        }
    }

    #[inline]
    pub fn params(&self) -> &LassoParams {
        &self.params
    }

    /// Run coordinate descent and report convergence alongside the weights.
    ///
    /// Weights are returned even when `max_iter` runs out first.
    pub fn solve(
        &self,
        predictors: ArrayView2<'_, f64>,
        target: ArrayView1<'_, f64>,
    ) -> Result<LassoFit, SolverError> {
        let (n_samples, n_predictors) = predictors.dim();
        if n_samples != target.len() {
            return Err(SolverError::ShapeMismatch {
                predictor_rows: n_samples,
                target_len: target.len(),
            });
        }

        let mut weights = Array1::<f64>::zeros(n_predictors);
        if n_predictors == 0 {
            return Ok(LassoFit {
                weights,
                sweeps: 0,
                converged: true,
            });
        }

        let norms: Vec<f64> = predictors
            .axis_iter(Axis(1))
            .map(|col| col.dot(&col).max(MIN_NORM))
            .collect();

        let LassoParams {
            lambda,
            tolerance,
            max_iter,
        } = self.params;

        let mut residual = target.to_owned();
        let mut sweeps = 0;
        let mut converged = false;

        while sweeps < max_iter {
            sweeps += 1;
            let mut max_delta = 0.0f64;

            for (j, column) in predictors.axis_iter(Axis(1)).enumerate() {
                let old_weight = weights[j];
                let correlation = column.dot(&residual) + old_weight * norms[j];
                let candidate = soft_threshold(correlation, lambda) / norms[j];

                let delta = candidate - old_weight;
                if delta.abs() > MIN_DELTA {
                    residual.scaled_add(-delta, &column);
                    weights[j] = candidate;
                    max_delta = max_delta.max(delta.abs());
                }
            }

            if max_delta < tolerance {
                converged = true;
                break;
            }
        }

        Ok(LassoFit {
            weights,
            sweeps,
            converged,
        })
    }
}

impl SparseSolver for CoordinateDescent {
    fn fit(
        &self,
        predictors: ArrayView2<'_, f64>,
        target: ArrayView1<'_, f64>,
    ) -> Result<Array1<f64>, SolverError> {
        self.solve(predictors, target).map(|fit| fit.weights)
    }
}

/// Soft-thresholding operator, the proximal map of `λ|·|`.
///
/// S(z, λ) = sign(z) × max(|z| - λ, 0)
#[inline]
pub fn soft_threshold(z: f64, lambda: f64) -> f64 {
    if z > lambda {
        z - lambda
    } else if z < -lambda {
        z + lambda
    } else {
        0.0
    }
}
