//! Solved state utilities.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use engine_core::StateIndex;

/// Converged utility estimate for every enumerated state.
#[derive(Debug, Clone)]
pub struct Utilities<S> {
    index: Arc<StateIndex<S>>,
    values: Vec<f64>,
}

impl<S> Utilities<S>
where
    S: Clone + Eq + Hash + Debug,
{
    pub(crate) fn new(index: Arc<StateIndex<S>>, values: Vec<f64>) -> Self {
        debug_assert_eq!(index.len(), values.len());
        Self { index, values }
    }

    /// Utility of `state`, or `None` if it was never enumerated.
    pub fn get(&self, state: &S) -> Option<f64> {
        self.index.index_of(state).map(|i| self.values[i])
    }

    /// Utilities in state index order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, f64)> {
        self.index.states().iter().zip(self.values.iter().copied())
    }

    /// Largest absolute difference against another utility table over the
    /// same states.
    pub fn max_difference(&self, other: &Utilities<S>) -> f64 {
        self.iter()
            .map(|(state, u)| match other.get(state) {
                Some(v) => (u - v).abs(),
                None => f64::INFINITY,
            })
            .fold(0.0, f64::max)
    }
}
