//! Seeded synthetic data.
//!
//! All generators return `[n_samples, n_variables]` matrices and are fully
//! determined by their seed.

use ndarray::{Array2, Axis};
use rand::prelude::*;
use rand_distr::StandardNormal;

/// Independent standard normal variables.
pub fn random_normal_matrix(n_samples: usize, n_variables: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn((n_samples, n_variables), |_| rng.sample(StandardNormal))
}

/// Same values as [`random_normal_matrix`], flattened row-major.
pub fn random_normal_row_major(n_samples: usize, n_variables: usize, seed: u64) -> Vec<f64> {
    random_normal_matrix(n_samples, n_variables, seed)
        .iter()
        .copied()
        .collect()
}

/// A chain `x0 → x1 → … → x{p-1}`.
///
/// `x0` is standard normal; every later variable is `coef` times its
/// predecessor plus `noise` times fresh standard normal noise.
pub fn linear_chain(
    n_samples: usize,
    n_variables: usize,
    coef: f64,
    noise: f64,
    seed: u64,
) -> Array2<f64> {
    let mut x = random_normal_matrix(n_samples, n_variables, seed);
    for j in 1..n_variables {
        let (done, mut rest) = x.view_mut().split_at(Axis(1), j);
        let prev = done.column(j - 1);
        rest.column_mut(0)
            .zip_mut_with(&prev, |v, &p| *v = coef * p + noise * *v);
    }
    x
}

/// `n_causes` independent causes and one sink column that sums them.
///
/// The sink is the last column: `x[p-1] = Σ x[i] + noise · ε`.
pub fn sink(n_samples: usize, n_causes: usize, noise: f64, seed: u64) -> Array2<f64> {
    let mut x = random_normal_matrix(n_samples, n_causes + 1, seed);
    for mut row in x.rows_mut() {
        let total: f64 = row.iter().take(n_causes).sum();
        row[n_causes] = total + noise * row[n_causes];
    }
    x
}
