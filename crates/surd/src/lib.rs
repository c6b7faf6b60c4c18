//! surd: Sparse recursive regression for causal ordering discovery.
//!
//! Given observational data `[n_samples, n_variables]`, SURD estimates a
//! causal order over the variables and a sparse set of directed edges
//! consistent with it. Each step fits one L1-penalized regression per
//! remaining variable, concurrently, and commits the variable best explained
//! by the others.
//!
//! # Key Types
//!
//! - [`Surd`] - The discovery engine, `fit` / `fit_row_major`
//! - [`SurdConfig`] - Configuration builder
//! - [`GraphResult`] - Causal order, adjacency, weights and residuals
//! - [`SparseSolver`] - Pluggable regression backend, default [`CoordinateDescent`]
//!
//! # Example
//!
//! ```
//! use surd::{Surd, SurdConfig};
//! use surd::testing::data::sink;
//!
//! // x2 = x0 + x1 + small noise
//! let x = sink(300, 2, 0.01, 42);
//!
//! let graph = Surd::new(SurdConfig::default()).fit(x.view())?;
//! assert_eq!(graph.order()[0], 2);
//! assert!(graph.has_edge(2, 0) && graph.has_edge(2, 1));
//! # Ok::<(), surd::DiscoveryError>(())
//! ```

// Re-export approx traits for users who want to compare weights
pub use approx;

pub mod data;
pub mod discovery;
pub mod error;
pub mod logger;
pub mod solver;
pub mod testing;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// Discovery engine and its result
pub use discovery::{Edge, GraphResult, Surd, SurdConfig, SurdConfigBuilder};

// Errors
pub use error::DiscoveryError;
pub use solver::SolverError;

// Solvers
pub use solver::{CoordinateDescent, LassoParams, SparseSolver};

// Preprocessing
pub use data::standardize;

// Logging
pub use logger::{DiscoveryLogger, Verbosity};

// Shared utilities
pub use utils::{Parallelism, run_with_threads};
