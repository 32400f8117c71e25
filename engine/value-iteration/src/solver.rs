//! One-shot solve: compile, sweep, extract.

use std::fmt::Debug;
use std::hash::Hash;
use std::time::{Duration, Instant};

use engine_core::Mdp;
use tracing::info;

use crate::config::SolverConfig;
use crate::error::SolveError;
use crate::extract::extract_policy;
use crate::model::CompiledModel;
use crate::policy::Policy;
use crate::sweep::{value_iteration, SweepStats};
use crate::utilities::Utilities;

/// Everything a solve produces.
#[derive(Debug, Clone)]
pub struct Solution<S, A> {
    model: CompiledModel<S, A>,
    utilities: Utilities<S>,
    policy: Policy<S, A>,
    stats: SweepStats,
    discount: f64,
    elapsed: Duration,
}

/// Solve `model` exactly and extract its greedy policy.
pub fn solve<M>(
    model: &M,
    config: &SolverConfig,
) -> Result<Solution<M::State, M::Action>, SolveError>
where
    M: Mdp + ?Sized,
{
    config.validate()?;
    let start = Instant::now();

    let compiled = CompiledModel::compile(model, config.probability_tolerance)?;
    let (utilities, stats) = value_iteration(&compiled, config)?;
    let policy = extract_policy(&compiled, &utilities, config.discount);
    let elapsed = start.elapsed();

    info!(
        states = compiled.num_states(),
        actions = compiled.num_actions(),
        sweeps = stats.sweeps,
        final_delta = stats.final_delta,
        elapsed_ms = elapsed.as_millis() as u64,
        "Solved"
    );

    Ok(Solution {
        model: compiled,
        utilities,
        policy,
        stats,
        discount: config.discount,
        elapsed,
    })
}

impl<S, A> Solution<S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + Debug,
{
    pub fn utilities(&self) -> &Utilities<S> {
        &self.utilities
    }

    pub fn policy(&self) -> &Policy<S, A> {
        &self.policy
    }

    pub fn stats(&self) -> &SweepStats {
        &self.stats
    }

    pub fn model(&self) -> &CompiledModel<S, A> {
        &self.model
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// Compile, sweep and extract time together.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Q-value of every action in `state` under the converged utilities,
    /// in declared action order.
    pub fn action_values(&self, state: &S) -> Option<Vec<(A, f64)>> {
        let s = self.model.index().index_of(state)?;
        let q = self
            .model
            .action_values(s, self.utilities.values(), self.discount);
        Some(self.model.actions().iter().cloned().zip(q).collect())
    }
}
