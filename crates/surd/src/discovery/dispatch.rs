//! Per-step fan-out of candidate subproblems.
//!
//! For every active variable `j` one subproblem is built: regress the
//! standardized column `j` on the standardized columns of the other active
//! variables. All subproblems of a step run as tasks on the current worker
//! pool; [`dispatch_candidates`] returns only once every task has finished,
//! and always in ascending variable order, whatever order the tasks
//! completed in.
//!
//! Tasks share the standardized matrix read-only. Each one builds its own
//! predictor matrix, so no mutable state crosses task boundaries.

use std::cmp::Ordering;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, ShapeBuilder};

use crate::data::mean_squared_error;
use crate::error::DiscoveryError;
use crate::solver::{SolverError, SparseSolver};
use crate::utils::Parallelism;

use super::ActiveSet;

/// Fit of one candidate variable against the rest of the active set.
#[derive(Debug, Clone)]
pub(crate) struct CandidateFit {
    /// The target variable.
    pub variable: usize,
    /// Mean squared residual; `+∞` when there were no predictors or the
    /// solver's weights made the residuals NaN.
    pub mse: f64,
    /// Predictor variable indices, ascending.
    pub predictors: Vec<usize>,
    /// One weight per entry of `predictors`.
    pub weights: Array1<f64>,
}

impl CandidateFit {
    pub(crate) fn n_nonzero(&self) -> usize {
        self.weights.iter().filter(|&&w| w != 0.0).count()
    }
}

/// Copy the `predictors` columns of `data` into a column-contiguous matrix.
pub(crate) fn predictor_matrix(data: ArrayView2<'_, f64>, predictors: &[usize]) -> Array2<f64> {
    let mut x = Array2::<f64>::zeros((data.nrows(), predictors.len()).f());
    for (mut dst, &src) in x.axis_iter_mut(Axis(1)).zip(predictors) {
        dst.assign(&data.column(src));
    }
    x
}

/// Regress `target` on the other active variables.
pub(crate) fn fit_candidate<S>(
    solver: &S,
    data: ArrayView2<'_, f64>,
    active: &ActiveSet,
    target: usize,
) -> Result<CandidateFit, DiscoveryError>
where
    S: SparseSolver + ?Sized,
{
    let predictors = active.without(target);
    if predictors.is_empty() {
        // Never the best choice while a real candidate exists.
        return Ok(CandidateFit {
            variable: target,
            mse: f64::INFINITY,
            predictors,
            weights: Array1::zeros(0),
        });
    }

    let x = predictor_matrix(data, &predictors);
    let y: ArrayView1<'_, f64> = data.column(target);

    let weights = solver
        .fit(x.view(), y)
        .map_err(|source| DiscoveryError::Solver { target, source })?;
    if weights.len() != predictors.len() {
        return Err(DiscoveryError::Solver {
            target,
            source: SolverError::WeightLength {
                expected: predictors.len(),
                actual: weights.len(),
            },
        });
    }

    let residuals = &y - &x.dot(&weights);
    let mse = mean_squared_error(residuals.view());
    Ok(CandidateFit {
        variable: target,
        // NaN from non-finite weights ranks with the sentinel.
        mse: if mse.is_nan() { f64::INFINITY } else { mse },
        predictors,
        weights,
    })
}

/// Fit every active variable and join the results.
///
/// Runs on the pool installed by the caller; with `Parallelism::Sequential`
/// the fits run one by one on the calling thread. No task is cancelled early:
/// if any fit fails, the error of the lowest failing variable is returned
/// after all tasks have completed.
pub(crate) fn dispatch_candidates<S>(
    solver: &S,
    data: ArrayView2<'_, f64>,
    active: &ActiveSet,
    parallelism: Parallelism,
) -> Result<Vec<CandidateFit>, DiscoveryError>
where
    S: SparseSolver + ?Sized,
{
    let candidates: Vec<usize> = active.iter().collect();
    parallelism
        .maybe_par_map(candidates, |target| {
            fit_candidate(solver, data, active, target)
        })
        .into_iter()
        .collect()
}

/// Candidate with the smallest MSE; ties go to the lowest variable index.
///
/// `fits` must be in ascending variable order, as returned by
/// [`dispatch_candidates`]. A NaN MSE ranks as `+∞`, so it never beats a real candidate.
pub(crate) fn select_best(fits: &[CandidateFit]) -> Option<&CandidateFit> {
    let rank = |mse: f64| if mse.is_nan() { f64::INFINITY } else { mse };
    fits.iter().min_by(|a, b| {
        rank(a.mse)
            .partial_cmp(&rank(b.mse))
            .unwrap_or(Ordering::Equal)
    })
}
