//! The set of variables not yet placed in the causal order.

use fixedbitset::FixedBitSet;

/// Variables still waiting to be ordered.
///
/// Starts full and loses exactly one index per discovery step. Iteration is
/// always in ascending index order, which fixes the predictor column order of
/// every subproblem and the tie-break order of candidate selection.
#[derive(Debug, Clone)]
pub struct ActiveSet {
    bits: FixedBitSet,
    len: usize,
}

impl ActiveSet {
    /// All of `0..n_variables` active.
    pub fn full(n_variables: usize) -> Self {
        let mut bits = FixedBitSet::with_capacity(n_variables);
        bits.insert_range(..);
        Self {
            bits,
            len: n_variables,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn contains(&self, variable: usize) -> bool {
        self.bits.contains(variable)
    }

    /// Active indices, ascending.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.ones()
    }

    /// Lowest active index.
    pub fn first(&self) -> Option<usize> {
        self.bits.ones().next()
    }

    /// Active indices other than `variable`, ascending.
    pub fn without(&self, variable: usize) -> Vec<usize> {
        self.iter().filter(|&v| v != variable).collect()
    }

    /// Remove `variable`. Returns `false` if it was not active.
    ///
    /// Removed indices are never re-admitted.
    pub fn remove(&mut self, variable: usize) -> bool {
        if !self.contains(variable) {
            return false;
        }
        self.bits.set(variable, false);
        self.len -= 1;
        true
    }
}
