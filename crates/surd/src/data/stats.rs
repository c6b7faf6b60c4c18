//! Column statistics and error measures.

use ndarray::{ArrayView1, ArrayView2, Axis};

use super::DEGENERATE_STD;

/// Mean and population standard deviation of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub mean: f64,
    /// Population standard deviation (divides by `n`, not `n - 1`).
    pub std_dev: f64,
}

impl ColumnStats {
    /// Compute the statistics of a single column.
    ///
    /// An empty column yields `mean = 0` and `std_dev = 0`. Finite columns
    /// always yield finite statistics: when the plain sums overflow, they are
    /// recomputed on the column scaled into `[-1, 1]`.
    pub fn of(column: ArrayView1<'_, f64>) -> Self {
        let stats = Self::direct(column);
        if stats.mean.is_finite() && stats.std_dev.is_finite() {
            return stats;
        }

        let scale = column.iter().fold(0.0f64, |m, &x| m.max(x.abs()));
        if !scale.is_finite() || scale == 0.0 {
            return stats;
        }
        let scaled = Self::direct(column.mapv(|x| x / scale).view());
        Self {
            mean: scaled.mean * scale,
            std_dev: scaled.std_dev * scale,
        }
    }

    fn direct(column: ArrayView1<'_, f64>) -> Self {
        let n = column.len();
        if n == 0 {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
            };
        }
        let n = n as f64;
        let mean = column.sum() / n;
        let variance = column.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / n;
        Self {
            mean,
            std_dev: variance.sqrt(),
        }
    }

    /// A column whose spread is below [`DEGENERATE_STD`] carries no information.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.std_dev < DEGENERATE_STD
    }
}

/// Statistics for every column of `[n_samples, n_variables]` data.
pub fn column_stats(x: ArrayView2<'_, f64>) -> Vec<ColumnStats> {
    x.axis_iter(Axis(1)).map(ColumnStats::of).collect()
}

/// Mean of squared residuals. Returns `0.0` for an empty vector.
pub fn mean_squared_error(residuals: ArrayView1<'_, f64>) -> f64 {
    if residuals.is_empty() {
        return 0.0;
    }
    residuals.dot(&residuals) / residuals.len() as f64
}
