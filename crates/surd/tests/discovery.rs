//! End-to-end discovery tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use approx::assert_abs_diff_eq;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, array};
use rstest::rstest;

use surd::testing::assert_well_formed;
use surd::testing::data::{linear_chain, random_normal_matrix, random_normal_row_major, sink};
use surd::{DiscoveryError, SolverError, SparseSolver, Surd, SurdConfig, Verbosity};

// =============================================================================
// Test Solvers
// =============================================================================

/// Returns zero weights and counts its calls.
#[derive(Default)]
struct CountingZeros {
    calls: AtomicUsize,
}

impl SparseSolver for CountingZeros {
    fn fit(
        &self,
        predictors: ArrayView2<'_, f64>,
        _target: ArrayView1<'_, f64>,
    ) -> Result<Array1<f64>, SolverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Array1::zeros(predictors.ncols()))
    }
}

/// Always fails.
struct Failing;

impl SparseSolver for Failing {
    fn fit(
        &self,
        _predictors: ArrayView2<'_, f64>,
        _target: ArrayView1<'_, f64>,
    ) -> Result<Array1<f64>, SolverError> {
        Err(SolverError::failed("backend unavailable"))
    }
}

/// Returns one weight too many.
struct OffByOne;

impl SparseSolver for OffByOne {
    fn fit(
        &self,
        predictors: ArrayView2<'_, f64>,
        _target: ArrayView1<'_, f64>,
    ) -> Result<Array1<f64>, SolverError> {
        Ok(Array1::zeros(predictors.ncols() + 1))
    }
}

/// Infinite weights for any non-constant target, zeros otherwise.
struct InfiniteUnlessConstant;

impl SparseSolver for InfiniteUnlessConstant {
    fn fit(
        &self,
        predictors: ArrayView2<'_, f64>,
        target: ArrayView1<'_, f64>,
    ) -> Result<Array1<f64>, SolverError> {
        let fill = if target.iter().all(|&v| v == 0.0) {
            0.0
        } else {
            f64::INFINITY
        };
        Ok(Array1::from_elem(predictors.ncols(), fill))
    }
}

struct Panicking;

impl SparseSolver for Panicking {
    fn fit(
        &self,
        _predictors: ArrayView2<'_, f64>,
        _target: ArrayView1<'_, f64>,
    ) -> Result<Array1<f64>, SolverError> {
        panic!("solver exploded");
    }
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn two_variables_proportional() {
    // y = 2x: both candidates fit perfectly and tie; lowest index wins.
    let x = array![[1.0, 2.0], [2.0, 4.0], [3.0, 6.0], [4.0, 8.0], [5.0, 10.0]];
    let graph = Surd::default().fit(x.view()).unwrap();

    assert_eq!(graph.order(), &[0, 1]);
    assert!(graph.has_edge(0, 1));
    assert!(!graph.has_edge(1, 0));
    assert!(graph.weight(0, 1) > 0.9);
    assert!(graph.residuals()[0] < 1e-3);
    assert_abs_diff_eq!(graph.residuals()[1], 1.0, epsilon = 1e-12);
}

#[test]
fn sink_is_selected_first() {
    let x = sink(500, 2, 0.01, 17);
    let graph = Surd::default().fit(x.view()).unwrap();

    assert_well_formed(&graph, 3, 1e-5);
    assert_eq!(graph.order()[0], 2);
    assert!(graph.residuals()[0] < 1e-3);
    assert!(graph.has_edge(2, 0));
    assert!(graph.has_edge(2, 1));
    assert!(graph.weight(2, 0) > 0.5);
    assert!(graph.weight(2, 1) > 0.5);
}

#[test]
fn constant_columns_keep_index_order() {
    let x = Array2::from_elem((6, 4), 3.5);
    let graph = Surd::default().fit(x.view()).unwrap();

    assert_eq!(graph.order(), &[0, 1, 2, 3]);
    assert_eq!(graph.n_edges(), 0);
    assert!(graph.residuals().iter().all(|&r| r == 0.0));
}

#[test]
fn scaled_copies_tie_in_index_order() {
    // Power-of-two scalings standardize to bitwise-identical columns.
    let x = Array2::from_shape_fn((8, 3), |(i, j)| {
        let base = [0.3, -1.2, 2.5, 0.9, -0.4, 1.7, -2.2, 0.1][i];
        base * f64::from(1u32 << j)
    });
    let graph = Surd::default().fit(x.view()).unwrap();

    assert_eq!(graph.order(), &[0, 1, 2]);
    assert!(graph.has_edge(0, 1) || graph.has_edge(0, 2));
}

#[test]
fn huge_finite_values_give_finite_residuals() {
    let x = array![[1.5e308, 1.0], [1.6e308, 2.0], [1.7e308, 4.0]];
    let graph = Surd::default().fit(x.view()).unwrap();

    assert_well_formed(&graph, 2, 1e-5);
    assert!(graph.residuals().iter().all(|r| r.is_finite()));
}

#[test]
fn single_variable() {
    let x = array![[1.0], [4.0], [2.0]];
    let graph = Surd::default().fit(x.view()).unwrap();

    assert_eq!(graph.order(), &[0]);
    assert_eq!(graph.adjacency().dim(), (1, 1));
    assert_eq!(graph.n_edges(), 0);
}

#[test]
fn large_lambda_removes_all_edges() {
    let x = linear_chain(50, 4, 0.8, 0.5, 3);
    let config = SurdConfig::builder().lambda(1e3).build();
    let graph = Surd::new(config).fit(x.view()).unwrap();

    assert_well_formed(&graph, 4, 1e-5);
    assert_eq!(graph.n_edges(), 0);
}

#[test]
fn chain_graph_is_well_formed() {
    let x = linear_chain(200, 5, 0.9, 0.3, 11);
    let graph = Surd::default().fit(x.view()).unwrap();

    assert_well_formed(&graph, 5, 1e-5);
    assert!(graph.n_edges() > 0);
}

// =============================================================================
// Determinism
// =============================================================================

#[rstest]
#[case(1)]
#[case(2)]
#[case(4)]
#[case(8)]
fn result_is_independent_of_workers(#[case] workers: usize) {
    let x = random_normal_matrix(60, 6, 99);
    let reference = Surd::new(SurdConfig::builder().workers(1).build())
        .fit(x.view())
        .unwrap();
    let graph = Surd::new(SurdConfig::builder().workers(workers).build())
        .fit(x.view())
        .unwrap();

    assert_eq!(graph.order(), reference.order());
    assert_eq!(graph.adjacency(), reference.adjacency());
    for (a, b) in graph.weights().iter().zip(reference.weights()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
    for (a, b) in graph.residuals().iter().zip(reference.residuals()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn repeated_fits_are_identical() {
    let x = linear_chain(80, 4, -0.7, 0.4, 5);
    let surd = Surd::default();
    assert_eq!(surd.fit(x.view()).unwrap(), surd.fit(x.view()).unwrap());
}

#[test]
fn verbosity_does_not_change_result() {
    let x = random_normal_matrix(40, 4, 8);
    let silent = Surd::default().fit(x.view()).unwrap();
    let debug = Surd::new(SurdConfig::builder().verbosity(Verbosity::Debug).build())
        .fit(x.view())
        .unwrap();
    assert_eq!(silent, debug);
}

#[test]
fn row_major_matches_view() {
    let flat = random_normal_row_major(30, 4, 21);
    let x = random_normal_matrix(30, 4, 21);
    let surd = Surd::default();
    assert_eq!(
        surd.fit_row_major(&flat, 30, 4).unwrap(),
        surd.fit(x.view()).unwrap()
    );
}

#[test]
fn input_is_not_modified() {
    let x = random_normal_matrix(20, 3, 2);
    let before = x.clone();
    Surd::default().fit(x.view()).unwrap();
    assert_eq!(x, before);
}

// =============================================================================
// Validation
// =============================================================================

#[rstest]
#[case(0, 3)]
#[case(5, 0)]
#[case(0, 0)]
fn empty_input_is_rejected(#[case] n_samples: usize, #[case] n_variables: usize) {
    let x = Array2::<f64>::zeros((n_samples, n_variables));
    let err = Surd::default().fit(x.view()).unwrap_err();
    assert!(matches!(err, DiscoveryError::InvalidInput { .. }), "{err}");
}

#[test]
fn single_sample_is_rejected() {
    let x = array![[1.0, 2.0, 3.0]];
    let err = Surd::default().fit(x.view()).unwrap_err();
    assert!(matches!(err, DiscoveryError::InsufficientSamples { n_samples: 1 }));
}

#[rstest]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
#[case(f64::NEG_INFINITY)]
fn non_finite_input_is_rejected(#[case] value: f64) {
    let mut x = random_normal_matrix(10, 3, 1);
    x[[4, 2]] = value;
    let err = Surd::default().fit(x.view()).unwrap_err();
    assert!(matches!(err, DiscoveryError::InvalidInput { .. }));
}

#[test]
fn malformed_buffer_is_rejected() {
    let flat = vec![0.5; 11];
    let err = Surd::default().fit_row_major(&flat, 4, 3).unwrap_err();
    assert!(matches!(err, DiscoveryError::InvalidInput { .. }));
}

#[test]
fn validation_precedes_solver_calls() {
    let solver = std::sync::Arc::new(CountingZeros::default());
    let surd = Surd::with_solver(SurdConfig::default(), solver.clone());
    let x = array![[1.0, f64::NAN], [2.0, 3.0]];

    assert!(surd.fit(x.view()).is_err());
    assert_eq!(solver.calls.load(Ordering::SeqCst), 0);
}

// =============================================================================
// Custom Solvers
// =============================================================================

#[test]
fn custom_solver_is_used_for_every_subproblem() {
    let solver = std::sync::Arc::new(CountingZeros::default());
    let surd = Surd::with_solver(SurdConfig::default(), solver.clone());
    let x = random_normal_matrix(25, 4, 6);

    let graph = surd.fit(x.view()).unwrap();

    // 4 + 3 + 2 subproblems; the last variable needs none.
    assert_eq!(solver.calls.load(Ordering::SeqCst), 9);
    assert_well_formed(&graph, 4, 1e-5);
    assert_eq!(graph.n_edges(), 0);
}

#[test]
fn set_solver_replaces_default() {
    let mut surd = Surd::default();
    surd.set_solver(Failing);
    let x = random_normal_matrix(10, 3, 4);
    assert!(surd.fit(x.view()).is_err());
}

#[test]
fn solver_failure_aborts_fit() {
    let surd = Surd::with_solver(SurdConfig::builder().workers(3).build(), Failing);
    let x = random_normal_matrix(10, 3, 4);

    match surd.fit(x.view()).unwrap_err() {
        DiscoveryError::Solver { target, source } => {
            assert_eq!(target, 0);
            assert!(source.to_string().contains("backend unavailable"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn wrong_weight_count_is_rejected() {
    let surd = Surd::with_solver(SurdConfig::default(), OffByOne);
    let x = random_normal_matrix(10, 3, 4);

    let err = surd.fit(x.view()).unwrap_err();
    assert!(matches!(
        err,
        DiscoveryError::Solver {
            target: 0,
            source: SolverError::WeightLength {
                expected: 2,
                actual: 3
            }
        }
    ));
}

#[test]
fn nan_residuals_never_win_selection() {
    // Column 1 is constant, so it standardizes to zeros and fits exactly.
    // The other targets meet a zero predictor column: 0 × ∞ = NaN.
    let x = array![[1.0, 5.0, 0.0], [2.0, 5.0, 1.0], [3.0, 5.0, 0.5]];
    let surd = Surd::with_solver(SurdConfig::default(), InfiniteUnlessConstant);

    let graph = surd.fit(x.view()).unwrap();

    assert_eq!(graph.order()[0], 1);
    assert_eq!(graph.residuals()[0], 0.0);
    assert!(graph.residuals().iter().all(|r| !r.is_nan()));
}

#[test]
#[should_panic]
fn solver_panic_propagates() {
    let surd = Surd::with_solver(SurdConfig::builder().workers(2).build(), Panicking);
    let x = random_normal_matrix(10, 3, 4);
    let _ = surd.fit(x.view());
}
