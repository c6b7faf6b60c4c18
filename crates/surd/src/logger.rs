//! Progress logging for causal discovery runs.
//!
//! [`DiscoveryLogger`] turns the orchestrator's milestones into `tracing`
//! events, gated by the configured [`Verbosity`]. Nothing here feeds back into
//! the algorithm: a silent run and a debug run select the same order.

use std::time::Instant;

use tracing::{debug, info, warn};

/// Verbosity level for discovery output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// No output.
    #[default]
    Silent,
    /// Only warnings (e.g. replaced configuration values).
    Warning,
    /// Start/finish summaries and one line per selected variable.
    Info,
    /// Everything, including per-candidate errors of every step.
    Debug,
}

/// Logger for a single discovery run.
#[derive(Debug)]
pub struct DiscoveryLogger {
    verbosity: Verbosity,
    started: Option<Instant>,
}

impl DiscoveryLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            started: None,
        }
    }

    #[inline]
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn warn(&self, message: &str) {
        if self.verbosity >= Verbosity::Warning {
            warn!("{message}");
        }
    }

    pub fn start_discovery(&mut self, n_samples: usize, n_variables: usize, workers: usize) {
        self.started = Some(Instant::now());
        if self.verbosity >= Verbosity::Info {
            info!(n_samples, n_variables, workers, "starting causal order discovery");
        }
    }

    /// One candidate's fit within a step, logged at debug level.
    pub fn log_candidate(&self, step: usize, variable: usize, mse: f64, n_nonzero: usize) {
        if self.verbosity >= Verbosity::Debug {
            debug!(step, variable, mse, n_nonzero, "candidate fitted");
        }
    }

    pub fn log_selection(
        &self,
        step: usize,
        variable: usize,
        mse: f64,
        edges_added: usize,
        remaining: usize,
    ) {
        if self.verbosity >= Verbosity::Info {
            info!(step, variable, mse, edges_added, remaining, "selected variable");
        }
    }

    /// The last active variable, placed without a regression.
    pub fn log_terminal(&self, step: usize, variable: usize, mse: f64) {
        if self.verbosity >= Verbosity::Info {
            info!(step, variable, mse, "placed final variable");
        }
    }

    pub fn finish_discovery(&self, n_edges: usize) {
        if self.verbosity >= Verbosity::Info {
            let elapsed_ms = self
                .started
                .map(|t| t.elapsed().as_secs_f64() * 1e3)
                .unwrap_or_default();
            info!(n_edges, elapsed_ms, "causal order discovery finished");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_ordering() {
        assert!(Verbosity::Silent < Verbosity::Warning);
        assert!(Verbosity::Warning < Verbosity::Info);
        assert!(Verbosity::Info < Verbosity::Debug);
        assert_eq!(Verbosity::default(), Verbosity::Silent);
    }

    #[test]
    fn logger_lifecycle_without_subscriber() {
        let mut logger = DiscoveryLogger::new(Verbosity::Debug);
        logger.start_discovery(10, 3, 2);
        logger.log_candidate(0, 1, 0.5, 1);
        logger.log_selection(0, 1, 0.5, 1, 2);
        logger.log_terminal(2, 0, 1.0);
        logger.finish_discovery(1);
        assert_eq!(logger.verbosity(), Verbosity::Debug);
    }
}
