//! Compiled transition tables.
//!
//! The transition function is queried exactly once per (state, action) pair
//! when a model is compiled. Sweeps then run over flat index-addressed rows
//! and never touch the original state or action values.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use engine_core::{Mdp, StateIndex};
use tracing::debug;

use crate::error::SolveError;

/// One (state, action) row of the compiled model.
#[derive(Debug, Clone)]
struct Row {
    reward: f64,
    terminal: bool,
    successors: Vec<(usize, f64)>,
}

impl Row {
    /// Expected one-step value of this row under `utilities`.
    #[inline]
    fn value(&self, utilities: &[f64], discount: f64) -> f64 {
        if self.terminal {
            return self.reward;
        }
        self.successors
            .iter()
            .map(|&(next, p)| p * (self.reward + discount * utilities[next]))
            .sum()
    }
}

/// A finite MDP flattened into dense rows, validated at construction.
#[derive(Debug, Clone)]
pub struct CompiledModel<S, A> {
    index: Arc<StateIndex<S>>,
    actions: Vec<A>,
    /// State-major: row for (s, a) lives at `s * actions.len() + a`.
    rows: Vec<Row>,
}

impl<S, A> CompiledModel<S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + Debug,
{
    /// Enumerate and validate every transition of `model`.
    ///
    /// Rejects empty state or action sets, duplicate states, malformed
    /// distributions and successors outside the enumerated state set.
    pub fn compile<M>(model: &M, probability_tolerance: f64) -> Result<Self, SolveError>
    where
        M: Mdp<State = S, Action = A> + ?Sized,
    {
        if model.states().is_empty() {
            return Err(SolveError::EmptyModel("states"));
        }
        if model.actions().is_empty() {
            return Err(SolveError::EmptyModel("actions"));
        }

        let index = StateIndex::new(model.states())?;
        let actions = model.actions().to_vec();
        let mut rows = Vec::with_capacity(index.len() * actions.len());
        let mut edges = 0usize;

        for state in index.states() {
            for action in &actions {
                let transition = model.transition(action, state);
                transition.check(probability_tolerance).map_err(|defect| {
                    SolveError::MalformedTransition {
                        state: format!("{:?}", state),
                        action: format!("{:?}", action),
                        defect,
                    }
                })?;

                let successors = if transition.terminal {
                    Vec::new()
                } else {
                    transition
                        .outcomes()
                        .map(|(next, p)| match index.index_of(next) {
                            Some(i) => Ok((i, p)),
                            None => Err(SolveError::UnknownSuccessor {
                                state: format!("{:?}", state),
                                action: format!("{:?}", action),
                                successor: format!("{:?}", next),
                            }),
                        })
                        .collect::<Result<Vec<_>, _>>()?
                };
                edges += successors.len();

                rows.push(Row {
                    reward: transition.reward,
                    terminal: transition.terminal,
                    successors,
                });
            }
        }

        debug!(
            states = index.len(),
            actions = actions.len(),
            edges,
            "Compiled transition model"
        );

        Ok(Self {
            index: Arc::new(index),
            actions,
            rows,
        })
    }

    pub fn num_states(&self) -> usize {
        self.index.len()
    }

    pub fn num_actions(&self) -> usize {
        self.actions.len()
    }

    /// Shared state index, also held by utilities and policies built from
    /// this model.
    pub fn index(&self) -> &Arc<StateIndex<S>> {
        &self.index
    }

    pub fn actions(&self) -> &[A] {
        &self.actions
    }

    /// Q-value of taking action `a` in state `s`.
    #[inline]
    pub fn q_value(&self, s: usize, a: usize, utilities: &[f64], discount: f64) -> f64 {
        self.rows[s * self.actions.len() + a].value(utilities, discount)
    }

    /// Q-values of every action in state `s`, in declared action order.
    pub fn action_values(&self, s: usize, utilities: &[f64], discount: f64) -> Vec<f64> {
        (0..self.actions.len())
            .map(|a| self.q_value(s, a, utilities, discount))
            .collect()
    }

    /// Best action index and its Q-value. Ties go to the earliest action.
    pub fn greedy(&self, s: usize, utilities: &[f64], discount: f64) -> (usize, f64) {
        let mut best_action = 0;
        let mut best_value = f64::NEG_INFINITY;
        for a in 0..self.actions.len() {
            let q = self.q_value(s, a, utilities, discount);
            if q > best_value {
                best_value = q;
                best_action = a;
            }
        }
        (best_action, best_value)
    }

    /// Bellman backup: the best Q-value in state `s`.
    #[inline]
    pub fn backup(&self, s: usize, utilities: &[f64], discount: f64) -> f64 {
        self.greedy(s, utilities, discount).1
    }
}
