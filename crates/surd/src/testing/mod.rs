//! Test and benchmark helpers.
//!
//! Seeded data generators with known causal structure, plus structural checks
//! on a [`GraphResult`](crate::GraphResult).

pub mod data;

use crate::GraphResult;

/// `true` if `order` holds every index of `0..n_variables` exactly once.
pub fn is_permutation(order: &[usize], n_variables: usize) -> bool {
    if order.len() != n_variables {
        return false;
    }
    let mut seen = vec![false; n_variables];
    order.iter().all(|&v| v < n_variables && !std::mem::replace(&mut seen[v], true))
}

/// `true` if every edge points from an earlier to a later position in the order.
pub fn edges_follow_order(graph: &GraphResult) -> bool {
    let p = graph.n_variables();
    let mut position = vec![0; p];
    for (pos, &v) in graph.order().iter().enumerate() {
        position[v] = pos;
    }
    graph
        .adjacency()
        .indexed_iter()
        .all(|((from, to), &edge)| !edge || position[from] < position[to])
}

/// Assert the structural guarantees of any discovery result.
///
/// # Panics
///
/// With a descriptive message if one does not hold.
pub fn assert_well_formed(graph: &GraphResult, n_variables: usize, tolerance: f64) {
    assert!(
        is_permutation(graph.order(), n_variables),
        "order {:?} is not a permutation of 0..{n_variables}",
        graph.order()
    );
    assert_eq!(graph.adjacency().dim(), (n_variables, n_variables));
    assert_eq!(graph.weights().dim(), (n_variables, n_variables));
    assert_eq!(graph.residuals().len(), n_variables);
    assert!(edges_follow_order(graph), "edge against causal order");

    for (i, &r) in graph.residuals().iter().enumerate() {
        assert!(r.is_finite() && r >= 0.0, "residual {r} at step {i}");
    }
    for ((from, to), &w) in graph.weights().indexed_iter() {
        if graph.has_edge(from, to) {
            assert!(w.abs() > tolerance, "edge {from} -> {to} with weight {w}");
        } else {
            assert_eq!(w, 0.0, "weight {w} on missing edge {from} -> {to}");
        }
    }
}
