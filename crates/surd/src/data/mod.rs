//! Input preparation and column statistics.
//!
//! - [`standardize`]: per-column rescaling to zero mean and unit population variance
//! - [`ColumnStats`] / [`column_stats`]: the mean and standard deviation behind it
//! - [`mean_squared_error`]: the error measure used to rank candidates
//!
//! # Layout
//!
//! Input matrices are `[n_samples, n_variables]`. The standardized copy is
//! stored column-contiguous (Fortran order) because every consumer reads it
//! one variable at a time.

mod standardize;
mod stats;

pub use standardize::{DEGENERATE_STD, standardize};
pub use stats::{ColumnStats, column_stats, mean_squared_error};
