//! Dense state indexing.
//!
//! Solvers keep utilities and policies in flat arrays. [`StateIndex`] is the
//! bijection between a model's enumerated states and `0..len`, preserving
//! the enumeration order.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use thiserror::Error;

/// Errors building a [`StateIndex`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndexError {
    #[error("State {state} is enumerated more than once")]
    DuplicateState { state: String },
}

/// Bijection between states and dense indices.
#[derive(Debug, Clone)]
pub struct StateIndex<S> {
    states: Vec<S>,
    lookup: HashMap<S, usize>,
}

impl<S> StateIndex<S>
where
    S: Clone + Eq + Hash + Debug,
{
    /// Index `states` in the given order.
    pub fn new(states: &[S]) -> Result<Self, IndexError> {
        let mut lookup = HashMap::with_capacity(states.len());
        for (i, state) in states.iter().enumerate() {
            if lookup.insert(state.clone(), i).is_some() {
                return Err(IndexError::DuplicateState {
                    state: format!("{:?}", state),
                });
            }
        }
        Ok(Self {
            states: states.to_vec(),
            lookup,
        })
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Dense index of `state`, if it was enumerated.
    pub fn index_of(&self, state: &S) -> Option<usize> {
        self.lookup.get(state).copied()
    }

    /// State at dense index `i`.
    ///
    /// # Panics
    /// Panics if `i >= len()`.
    pub fn state(&self, i: usize) -> &S {
        &self.states[i]
    }

    pub fn contains(&self, state: &S) -> bool {
        self.lookup.contains_key(state)
    }

    /// States in index order.
    pub fn states(&self) -> &[S] {
        &self.states
    }
}
