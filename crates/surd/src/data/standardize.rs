//! Column standardization.

use ndarray::{Array2, ArrayView2, Axis, ShapeBuilder, Zip};

use super::ColumnStats;

/// Standard deviation below which a column is treated as constant.
pub const DEGENERATE_STD: f64 = 1e-12;

/// Rescale each column to zero mean and unit population variance.
///
/// Columns with a standard deviation below [`DEGENERATE_STD`] are set to zero.
/// The input is not modified; the result has the same shape and is laid out
/// column-contiguous.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use surd::data::standardize;
///
/// let x = array![[1.0, 5.0], [2.0, 5.0], [3.0, 5.0]];
/// let z = standardize(x.view());
///
/// let s = (3.0f64 / 2.0).sqrt();
/// assert!((z[[0, 0]] + s).abs() < 1e-12);
/// assert_eq!(z[[1, 0]], 0.0);
/// assert!(z.column(1).iter().all(|&v| v == 0.0));
/// ```
pub fn standardize(x: ArrayView2<'_, f64>) -> Array2<f64> {
    let (n_samples, n_variables) = x.dim();
    let mut out = Array2::<f64>::zeros((n_samples, n_variables).f());

    for (src, mut dst) in x.axis_iter(Axis(1)).zip(out.axis_iter_mut(Axis(1))) {
        let stats = ColumnStats::of(src);
        if stats.is_degenerate() {
            // Already zero.
            continue;
        }
        Zip::from(&mut dst)
            .and(&src)
            .for_each(|d, &s| *d = (s - stats.mean) / stats.std_dev);

        // `s - mean` can overflow for values near the f64 limit.
        if dst.iter().any(|v| !v.is_finite()) {
            Zip::from(&mut dst)
                .and(&src)
                .for_each(|d, &s| *d = s / stats.std_dev - stats.mean / stats.std_dev);
        }
    }

    out
}
