//! Greedy policies over a solved model.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use engine_core::StateIndex;

/// Total mapping from every enumerated state to one action.
///
/// Shares its [`StateIndex`] with the [`Utilities`](crate::Utilities) it was
/// extracted from, so lookups cost one hash probe.
#[derive(Debug, Clone)]
pub struct Policy<S, A> {
    index: Arc<StateIndex<S>>,
    actions: Vec<A>,
    choices: Vec<usize>,
}

impl<S, A> Policy<S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + Debug,
{
    pub(crate) fn new(index: Arc<StateIndex<S>>, actions: Vec<A>, choices: Vec<usize>) -> Self {
        debug_assert_eq!(index.len(), choices.len());
        Self {
            index,
            actions,
            choices,
        }
    }

    /// Action for `state`, or `None` if the state was never enumerated.
    pub fn get(&self, state: &S) -> Option<&A> {
        self.action_index(state).map(|a| &self.actions[a])
    }

    /// Position of the chosen action in the model's declared action order.
    pub fn action_index(&self, state: &S) -> Option<usize> {
        self.index.index_of(state).map(|i| self.choices[i])
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &A)> {
        self.index
            .states()
            .iter()
            .zip(self.choices.iter().map(|&a| &self.actions[a]))
    }

    /// Number of states mapped to each action, in declared action order.
    pub fn action_histogram(&self) -> Vec<(&A, usize)> {
        let mut counts = vec![0usize; self.actions.len()];
        for &a in &self.choices {
            counts[a] += 1;
        }
        self.actions.iter().zip(counts).collect()
    }
}

impl<S, A> PartialEq for Policy<S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.index.states() == other.index.states()
            && self.actions == other.actions
            && self.choices == other.choices
    }
}
