//! The recursive selection engine.

use std::fmt;

use ndarray::ArrayView2;

use crate::data::{mean_squared_error, standardize};
use crate::error::DiscoveryError;
use crate::logger::DiscoveryLogger;
use crate::solver::{CoordinateDescent, SparseSolver};
use crate::utils::{Parallelism, run_with_threads};

use super::dispatch::{dispatch_candidates, select_best};
use super::graph::{GraphBuilder, GraphResult};
use super::{ActiveSet, SurdConfig};

/// Sparse recursive regression for causal ordering.
///
/// Each step regresses every still-unordered variable on all the others,
/// selects the one with the smallest residual MSE, and adds an edge from it
/// to every remaining variable whose weight exceeds the tolerance. The
/// selected variable then leaves the active set. With one variable left it
/// is appended directly, scored by the MSE of its own standardized column.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use surd::{Surd, SurdConfig};
///
/// let x = array![
///     [1.0, 2.1, 0.5],
///     [2.0, 3.9, 1.4],
///     [3.0, 6.2, 1.6],
///     [4.0, 7.8, 2.6],
///     [5.0, 10.1, 2.4],
/// ];
/// let surd = Surd::new(SurdConfig::builder().lambda(0.1).workers(2).build());
/// let graph = surd.fit(x.view()).unwrap();
///
/// let mut order = graph.order().to_vec();
/// order.sort_unstable();
/// assert_eq!(order, vec![0, 1, 2]);
/// ```
///
/// # Custom solvers
///
/// Any [`SparseSolver`] can replace the default coordinate descent via
/// [`with_solver`](Self::with_solver) or [`set_solver`](Self::set_solver).
/// Unlike the default, a custom solver may fail: its first error aborts the
/// whole fit, and a panic inside it propagates out of [`fit`](Self::fit).
pub struct Surd {
    config: SurdConfig,
    solver: Box<dyn SparseSolver>,
}

impl Surd {
    /// Create an engine using coordinate descent with the config's parameters.
    pub fn new(config: SurdConfig) -> Self {
        let solver = CoordinateDescent::new(config.lasso_params());
        Self {
            config,
            solver: Box::new(solver),
        }
    }

    /// Create an engine with a caller-supplied solver.
    pub fn with_solver(config: SurdConfig, solver: impl SparseSolver + 'static) -> Self {
        Self {
            config,
            solver: Box::new(solver),
        }
    }

    /// Replace the solver used for subsequent fits.
    pub fn set_solver(&mut self, solver: impl SparseSolver + 'static) {
        self.solver = Box::new(solver);
    }

    #[inline]
    pub fn config(&self) -> &SurdConfig {
        &self.config
    }

    /// Discover a causal order for `x` (`[n_samples, n_variables]`).
    ///
    /// # Errors
    ///
    /// - [`DiscoveryError::InvalidInput`] if `x` has no rows, no columns, or
    ///   non-finite entries
    /// - [`DiscoveryError::InsufficientSamples`] if `x` has a single row
    /// - [`DiscoveryError::Solver`] if a custom solver fails
    /// - [`DiscoveryError::ThreadPool`] if the worker pool cannot be built
    ///
    /// Validation happens before any work is dispatched.
    pub fn fit(&self, x: ArrayView2<'_, f64>) -> Result<GraphResult, DiscoveryError> {
        validate(x)?;
        let (n_samples, n_variables) = x.dim();

        let mut logger = DiscoveryLogger::new(self.config.verbosity());
        logger.start_discovery(n_samples, n_variables, self.config.workers());

        let standardized = standardize(x);
        let graph = run_with_threads(self.config.workers(), |parallelism| {
            self.discover(standardized.view(), parallelism, &logger)
        })??;

        logger.finish_discovery(graph.n_edges());
        Ok(graph)
    }

    /// Like [`fit`](Self::fit), for a flat row-major buffer.
    ///
    /// A buffer whose length is not `n_samples * n_variables` is rejected as
    /// [`DiscoveryError::InvalidInput`].
    pub fn fit_row_major(
        &self,
        data: &[f64],
        n_samples: usize,
        n_variables: usize,
    ) -> Result<GraphResult, DiscoveryError> {
        let x = ArrayView2::from_shape((n_samples, n_variables), data).map_err(|_| {
            DiscoveryError::invalid_input(format!(
                "buffer of length {} cannot form a {n_samples} x {n_variables} matrix",
                data.len()
            ))
        })?;
        self.fit(x)
    }

    /// Selection loop over standardized data.
    fn discover(
        &self,
        data: ArrayView2<'_, f64>,
        parallelism: Parallelism,
        logger: &DiscoveryLogger,
    ) -> Result<GraphResult, DiscoveryError> {
        let n_variables = data.ncols();
        let tolerance = self.config.tolerance();

        let mut active = ActiveSet::full(n_variables);
        let mut graph = GraphBuilder::new(n_variables);

        while let Some(last) = active.first() {
            let step = graph.step();

            if active.len() == 1 {
                let mse = mean_squared_error(data.column(last));
                graph.place(last, mse);
                active.remove(last);
                logger.log_terminal(step, last, mse);
                continue;
            }

            let fits = dispatch_candidates(self.solver.as_ref(), data, &active, parallelism)?;
            for fit in &fits {
                logger.log_candidate(step, fit.variable, fit.mse, fit.n_nonzero());
            }

            let Some(best) = select_best(&fits) else {
                unreachable!("one fit per active variable, and at least two are active");
            };

            let mut edges_added = 0;
            for (&to, &weight) in best.predictors.iter().zip(best.weights.iter()) {
                if weight.abs() > tolerance {
                    graph.add_edge(best.variable, to, weight);
                    edges_added += 1;
                }
            }
            graph.place(best.variable, best.mse);
            active.remove(best.variable);

            logger.log_selection(step, best.variable, best.mse, edges_added, active.len());
        }

        Ok(graph.finish())
    }
}

impl fmt::Debug for Surd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surd")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Surd {
    fn default() -> Self {
        Self::new(SurdConfig::default())
    }
}

fn validate(x: ArrayView2<'_, f64>) -> Result<(), DiscoveryError> {
    let (n_samples, n_variables) = x.dim();
    if n_samples == 0 || n_variables == 0 {
        return Err(DiscoveryError::invalid_input(format!(
            "empty input matrix ({n_samples} x {n_variables})"
        )));
    }
    if n_samples < 2 {
        return Err(DiscoveryError::InsufficientSamples { n_samples });
    }
    if let Some(((row, col), value)) = x.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(DiscoveryError::invalid_input(format!(
            "non-finite value {value} at row {row}, column {col}"
        )));
    }
    Ok(())
}
