//! Discovery configuration with builder pattern.
//!
//! [`SurdConfig`] is built once with the `bon`-generated builder. Building
//! never fails: out-of-range values are replaced by their defaults, and the
//! replacement is reported as a warning when logging is enabled. After that
//! the config is read-only and shared by reference with every worker.
//!
//! # Example
//!
//! ```
//! use surd::{SurdConfig, Verbosity};
//!
//! // All defaults
//! let config = SurdConfig::builder().build();
//! assert_eq!(config.workers(), 4);
//!
//! // Customized
//! let config = SurdConfig::builder()
//!     .lambda(0.1)
//!     .tolerance(1e-6)
//!     .max_iter(500)
//!     .workers(8)
//!     .verbosity(Verbosity::Info)
//!     .build();
//! assert_eq!(config.lambda(), 0.1);
//!
//! // Invalid values fall back to defaults
//! let config = SurdConfig::builder().lambda(-1.0).workers(0).build();
//! assert_eq!(config.lambda(), 0.01);
//! assert_eq!(config.workers(), 4);
//! ```

use bon::Builder;

use crate::logger::{DiscoveryLogger, Verbosity};
use crate::solver::LassoParams;

/// Default number of concurrently running candidate fits.
pub const DEFAULT_WORKERS: usize = 4;

/// Configuration for a [`Surd`](crate::Surd) discovery run.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct SurdConfig {
    /// L1 penalty of the default solver. Default: 0.01 (also used when `<= 0`).
    #[builder(default = LassoParams::DEFAULT_LAMBDA)]
    lambda: f64,

    /// Solver convergence threshold, also the minimum `|weight|` for an edge.
    /// Default: 1e-5.
    #[builder(default = LassoParams::DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Maximum coordinate descent sweeps per subproblem. Default: 1000.
    #[builder(default = LassoParams::DEFAULT_MAX_ITER)]
    max_iter: usize,

    /// Maximum number of candidate fits running at once. Default: 4.
    #[builder(default = DEFAULT_WORKERS)]
    workers: usize,

    /// Diagnostic output level. No effect on the result. Default: `Silent`.
    #[builder(default)]
    verbosity: Verbosity,
}

impl<S: surd_config_builder::IsComplete> SurdConfigBuilder<S> {
    /// Build the configuration, replacing invalid values with defaults:
    ///
    /// - `lambda <= 0` → 0.01
    /// - `tolerance <= 0` → 1e-5
    /// - `max_iter == 0` → 1000
    /// - `workers == 0` → 4
    pub fn build(self) -> SurdConfig {
        self.__build_internal().normalized()
    }
}

impl SurdConfig {
    fn normalized(mut self) -> Self {
        let logger = DiscoveryLogger::new(self.verbosity);

        if self.lambda.is_nan() || self.lambda <= 0.0 {
            logger.warn(&format!(
                "lambda must be > 0, got {}; using {}",
                self.lambda,
                LassoParams::DEFAULT_LAMBDA
            ));
            self.lambda = LassoParams::DEFAULT_LAMBDA;
        }
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            logger.warn(&format!(
                "tolerance must be > 0, got {}; using {}",
                self.tolerance,
                LassoParams::DEFAULT_TOLERANCE
            ));
            self.tolerance = LassoParams::DEFAULT_TOLERANCE;
        }
        if self.max_iter == 0 {
            logger.warn(&format!(
                "max_iter must be > 0; using {}",
                LassoParams::DEFAULT_MAX_ITER
            ));
            self.max_iter = LassoParams::DEFAULT_MAX_ITER;
        }
        if self.workers == 0 {
            logger.warn(&format!("workers must be > 0; using {DEFAULT_WORKERS}"));
            self.workers = DEFAULT_WORKERS;
        }
        self
    }

    #[inline]
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    #[inline]
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    #[inline]
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Parameters for the default coordinate descent solver.
    pub fn lasso_params(&self) -> LassoParams {
        LassoParams::new(self.lambda, self.tolerance, self.max_iter)
    }
}

impl Default for SurdConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
