//! Common utilities used across the crate.
//!
//! This module provides the parallelism configuration and thread pool setup
//! used by the candidate dispatcher.

use rayon::ThreadPoolBuildError;
use rayon::prelude::*;

// =============================================================================
// Parallelism Configuration
// =============================================================================

/// Whether parallel execution is allowed.
///
/// This is a simple flag passed down to the dispatcher. When `Parallel`,
/// candidate subproblems run as `rayon` tasks inside the pool installed by
/// [`run_with_threads`]. When `Sequential`, they run one after another on the
/// calling thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parallelism {
    Sequential,
    Parallel,
}

impl Parallelism {
    /// Create from thread count semantics.
    ///
    /// - 0 = auto (parallel if rayon pool has multiple threads, sequential otherwise)
    /// - 1 = sequential
    /// - >1 = parallel
    #[inline]
    pub fn from_threads(n_threads: usize) -> Self {
        if n_threads == 1 || (n_threads == 0 && rayon::current_num_threads() == 1) {
            Parallelism::Sequential
        } else {
            Parallelism::Parallel
        }
    }

    /// Returns `true` if parallel execution is allowed.
    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, Parallelism::Parallel)
    }

    /// Map every item, in parallel when allowed.
    ///
    /// The output keeps the input order in both modes, so callers can rely on
    /// positional correspondence regardless of which task finished first.
    #[inline]
    pub fn maybe_par_map<T, B, I, F>(self, iter: I, f: F) -> Vec<B>
    where
        T: Send,
        B: Send,
        I: IntoIterator<Item = T> + IntoParallelIterator<Item = T>,
        F: Fn(T) -> B + Sync + Send,
    {
        if self.is_parallel() {
            iter.into_par_iter().map(f).collect()
        } else {
            iter.into_iter().map(f).collect()
        }
    }
}

// =============================================================================
// Thread Pool Setup
// =============================================================================

/// Run a closure with a thread pool bounded to `n_threads` workers.
///
/// Thread count semantics:
/// - `0` = auto (use all available cores)
/// - `1` = sequential (no thread pool)
/// - `n > 1` = use exactly `n` threads
///
/// The pool is local to this call, so at most `n_threads` tasks spawned from
/// inside `f` run at the same time; the rest queue for a free worker.
///
/// # Example
///
/// ```
/// use surd::run_with_threads;
///
/// let n = run_with_threads(2, |_| rayon::current_num_threads()).unwrap();
/// assert_eq!(n, 2);
/// ```
#[inline]
pub fn run_with_threads<T: Send>(
    n_threads: usize,
    f: impl FnOnce(Parallelism) -> T + Send,
) -> Result<T, ThreadPoolBuildError> {
    let parallelism = Parallelism::from_threads(n_threads);

    match parallelism {
        Parallelism::Sequential => Ok(f(Parallelism::Sequential)),
        Parallelism::Parallel => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n_threads)
                .thread_name(|i| format!("surd-worker-{i}"))
                .build()?;
            Ok(pool.install(|| f(Parallelism::Parallel)))
        }
    }
}
