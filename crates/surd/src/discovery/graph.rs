//! Discovered causal graph and its step-by-step accumulation.

use ndarray::Array2;

/// A directed edge `from → to` with its fitted weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

/// Result of a discovery run.
///
/// - `order`: permutation of `0..p`, in the order variables were selected
/// - `adjacency[[i, j]]`: `i` was selected before `j` and its weight as a
///   predictor of `j` exceeded the tolerance in magnitude
/// - `weights[[i, j]]`: that signed weight, zero where there is no edge
/// - `residuals[step]`: MSE of the variable selected at `step` (indexed by
///   step, not by variable)
///
/// Edges only point from earlier to later positions in `order`, so the graph
/// is acyclic by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphResult {
    order: Vec<usize>,
    adjacency: Array2<bool>,
    weights: Array2<f64>,
    residuals: Vec<f64>,
}

impl GraphResult {
    #[inline]
    pub fn n_variables(&self) -> usize {
        self.order.len()
    }

    /// Variables in selection order.
    #[inline]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// `[p, p]` edge indicator, `adjacency[[from, to]]`.
    #[inline]
    pub fn adjacency(&self) -> &Array2<bool> {
        &self.adjacency
    }

    /// `[p, p]` edge weights, `weights[[from, to]]`.
    #[inline]
    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    /// Residual MSE per selection step.
    #[inline]
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Position of `variable` in the causal order.
    pub fn position(&self, variable: usize) -> Option<usize> {
        self.order.iter().position(|&v| v == variable)
    }

    #[inline]
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.adjacency[[from, to]]
    }

    /// Weight of `from → to`, `0.0` without an edge.
    #[inline]
    pub fn weight(&self, from: usize, to: usize) -> f64 {
        self.weights[[from, to]]
    }

    /// All edges, sources in causal order, targets in causal order within a source.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.order.iter().enumerate().flat_map(move |(pos, &from)| {
            self.order[pos + 1..]
                .iter()
                .filter(move |&&to| self.adjacency[[from, to]])
                .map(move |&to| Edge {
                    from,
                    to,
                    weight: self.weights[[from, to]],
                })
        })
    }

    pub fn n_edges(&self) -> usize {
        self.adjacency.iter().filter(|&&e| e).count()
    }

    /// Variables with an edge into `variable`, ascending.
    pub fn parents(&self, variable: usize) -> Vec<usize> {
        self.adjacency
            .column(variable)
            .iter()
            .enumerate()
            .filter_map(|(i, &e)| e.then_some(i))
            .collect()
    }

    /// Variables `variable` has an edge into, ascending.
    pub fn children(&self, variable: usize) -> Vec<usize> {
        self.adjacency
            .row(variable)
            .iter()
            .enumerate()
            .filter_map(|(j, &e)| e.then_some(j))
            .collect()
    }
}

/// Mutable bookkeeping for a run in progress; frozen into a [`GraphResult`].
#[derive(Debug)]
pub(crate) struct GraphBuilder {
    order: Vec<usize>,
    adjacency: Array2<bool>,
    weights: Array2<f64>,
    residuals: Vec<f64>,
}

impl GraphBuilder {
    pub(crate) fn new(n_variables: usize) -> Self {
        Self {
            order: Vec::with_capacity(n_variables),
            adjacency: Array2::from_elem((n_variables, n_variables), false),
            weights: Array2::zeros((n_variables, n_variables)),
            residuals: Vec::with_capacity(n_variables),
        }
    }

    /// Index of the next selection step.
    #[inline]
    pub(crate) fn step(&self) -> usize {
        self.order.len()
    }

    /// Append `variable` to the order with the MSE recorded at this step.
    pub(crate) fn place(&mut self, variable: usize, mse: f64) {
        debug_assert!(!self.order.contains(&variable), "variable {variable} placed twice");
        self.order.push(variable);
        self.residuals.push(mse);
    }

    pub(crate) fn add_edge(&mut self, from: usize, to: usize, weight: f64) {
        self.adjacency[[from, to]] = true;
        self.weights[[from, to]] = weight;
    }

    pub(crate) fn finish(self) -> GraphResult {
        debug_assert_eq!(self.order.len(), self.adjacency.nrows());
        GraphResult {
            order: self.order,
            adjacency: self.adjacency,
            weights: self.weights,
            residuals: self.residuals,
        }
    }
}
