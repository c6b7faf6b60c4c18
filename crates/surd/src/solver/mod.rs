//! Sparse linear solvers.
//!
//! Every candidate subproblem of a discovery step is a regression of one
//! standardized variable on the others. The [`SparseSolver`] trait is the
//! capability the orchestrator needs for that; [`CoordinateDescent`] is the
//! default, L1-penalized implementation.
//!
//! # Contract
//!
//! - `predictors`: `[n_samples, k]`, `target`: `[n_samples]`
//! - returns `k` weights, aligned with the predictor columns
//!
//! The orchestrator never calls a solver with `k = 0`.
//!
//! # Concurrency
//!
//! Solvers are shared by reference across worker threads and called
//! concurrently on disjoint inputs, hence the `Send + Sync` bound. Keep any
//! scratch state local to the call.

mod coordinate_descent;

pub use coordinate_descent::{CoordinateDescent, LassoFit, LassoParams, soft_threshold};

use std::sync::Arc;

use ndarray::{Array1, ArrayView1, ArrayView2};

/// Error raised by a [`SparseSolver`].
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// Predictor rows and target length disagree.
    #[error("predictors have {predictor_rows} rows but target has {target_len} entries")]
    ShapeMismatch {
        predictor_rows: usize,
        target_len: usize,
    },

    /// The solver returned a weight vector of the wrong length.
    #[error("expected {expected} weights, solver returned {actual}")]
    WeightLength { expected: usize, actual: usize },

    /// Any other failure of a caller-supplied solver.
    #[error(transparent)]
    Failed(Box<dyn std::error::Error + Send + Sync>),
}

impl SolverError {
    /// Wrap an arbitrary error from a custom solver.
    pub fn failed(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Failed(err.into())
    }
}

/// Fits a weight vector for one predictors/target subproblem.
///
/// # Example
///
/// A custom solver that ignores the data and returns zero weights:
///
/// ```
/// use ndarray::{Array1, ArrayView1, ArrayView2};
/// use surd::solver::{SolverError, SparseSolver};
///
/// struct Zeros;
///
/// impl SparseSolver for Zeros {
///     fn fit(
///         &self,
///         predictors: ArrayView2<'_, f64>,
///         _target: ArrayView1<'_, f64>,
///     ) -> Result<Array1<f64>, SolverError> {
///         Ok(Array1::zeros(predictors.ncols()))
///     }
/// }
/// ```
pub trait SparseSolver: Send + Sync {
    /// Fit weights for `target ≈ predictors · weights`.
    fn fit(
        &self,
        predictors: ArrayView2<'_, f64>,
        target: ArrayView1<'_, f64>,
    ) -> Result<Array1<f64>, SolverError>;
}

impl<T: SparseSolver + ?Sized> SparseSolver for &T {
    fn fit(
        &self,
        predictors: ArrayView2<'_, f64>,
        target: ArrayView1<'_, f64>,
    ) -> Result<Array1<f64>, SolverError> {
        (**self).fit(predictors, target)
    }
}

impl<T: SparseSolver + ?Sized> SparseSolver for Box<T> {
    fn fit(
        &self,
        predictors: ArrayView2<'_, f64>,
        target: ArrayView1<'_, f64>,
    ) -> Result<Array1<f64>, SolverError> {
        (**self).fit(predictors, target)
    }
}

impl<T: SparseSolver + ?Sized> SparseSolver for Arc<T> {
    fn fit(
        &self,
        predictors: ArrayView2<'_, f64>,
        target: ArrayView1<'_, f64>,
    ) -> Result<Array1<f64>, SolverError> {
        (**self).fit(predictors, target)
    }
}
