//! Error types for causal discovery.

use crate::solver::SolverError;

/// Errors returned by [`Surd::fit`](crate::Surd::fit).
///
/// Input validation runs before any parallel work is dispatched, so an
/// `InvalidInput` or `InsufficientSamples` error never comes with a partial
/// graph.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The input matrix is absent, empty, malformed or holds non-finite values.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Fewer than two samples: a single observation cannot support regression.
    #[error("need at least 2 samples, got {n_samples}")]
    InsufficientSamples { n_samples: usize },

    /// The sparse solver failed on one of the candidate subproblems.
    ///
    /// The default coordinate-descent solver never produces this for validated
    /// input; it exists for caller-supplied solvers. The whole fit is aborted
    /// and no partial result is kept.
    #[error("solver failed for target variable {target}: {source}")]
    Solver {
        target: usize,
        #[source]
        source: SolverError,
    },

    /// The bounded worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl DiscoveryError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
