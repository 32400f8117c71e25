//! Value iteration sweeps.

use std::fmt::Debug;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::{SolverConfig, SweepMode};
use crate::error::SolveError;
use crate::model::CompiledModel;
use crate::utilities::Utilities;

/// Statistics from one value iteration run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepStats {
    /// Sweeps performed, including the one that converged.
    pub sweeps: u32,
    /// Largest per-state change in the final sweep.
    pub final_delta: f64,
    /// Per-sweep largest change, in sweep order.
    pub deltas: Vec<f64>,
    /// Wall time spent sweeping.
    pub elapsed: Duration,
}

/// Iterate Bellman backups from all-zero utilities until the largest
/// per-state change in a sweep falls below `config.threshold`.
///
/// Fails with [`SolveError::NotConverged`] once `config.max_sweeps` sweeps
/// have run without converging, and with [`SolveError::Diverged`] as soon as
/// any utility becomes non-finite.
pub fn value_iteration<S, A>(
    model: &CompiledModel<S, A>,
    config: &SolverConfig,
) -> Result<(Utilities<S>, SweepStats), SolveError>
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + Debug,
{
    config.validate()?;

    let start = Instant::now();
    let n = model.num_states();
    let mut values = vec![0.0; n];
    let mut scratch = match config.sweep_mode {
        SweepMode::InPlace => Vec::new(),
        SweepMode::Synchronous => vec![0.0; n],
    };
    let mut deltas = Vec::new();

    for sweep in 1..=config.max_sweeps {
        let delta = match config.sweep_mode {
            SweepMode::InPlace => sweep_in_place(model, &mut values, config.discount),
            SweepMode::Synchronous => {
                let delta = sweep_synchronous(model, &values, &mut scratch, config.discount);
                std::mem::swap(&mut values, &mut scratch);
                delta
            }
        };

        if !delta.is_finite() || values.iter().any(|u| !u.is_finite()) {
            warn!(sweep, "Utilities diverged");
            return Err(SolveError::Diverged { sweep });
        }

        deltas.push(delta);
        debug!(sweep, delta, "Sweep complete");

        if delta < config.threshold {
            let stats = SweepStats {
                sweeps: sweep,
                final_delta: delta,
                deltas,
                elapsed: start.elapsed(),
            };
            debug!(
                sweeps = stats.sweeps,
                final_delta = stats.final_delta,
                elapsed_ms = stats.elapsed.as_millis() as u64,
                mode = %config.sweep_mode,
                "Value iteration converged"
            );
            return Ok((Utilities::new(model.index().clone(), values), stats));
        }
    }

    let delta = deltas.last().copied().unwrap_or(f64::INFINITY);
    warn!(
        sweeps = config.max_sweeps,
        delta,
        threshold = config.threshold,
        "Value iteration hit the sweep cap"
    );
    Err(SolveError::NotConverged {
        sweeps: config.max_sweeps,
        delta,
        threshold: config.threshold,
    })
}

/// Gauss-Seidel sweep: later states see earlier states' new values.
fn sweep_in_place<S, A>(model: &CompiledModel<S, A>, values: &mut [f64], discount: f64) -> f64
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + Debug,
{
    let mut delta = 0.0f64;
    for s in 0..values.len() {
        let updated = model.backup(s, values, discount);
        delta = delta.max((updated - values[s]).abs());
        values[s] = updated;
    }
    delta
}

/// Jacobi sweep: every backup reads `current`, results land in `next`.
fn sweep_synchronous<S, A>(
    model: &CompiledModel<S, A>,
    current: &[f64],
    next: &mut [f64],
    discount: f64,
) -> f64
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + Debug,
{
    let mut delta = 0.0f64;
    for (s, slot) in next.iter_mut().enumerate() {
        *slot = model.backup(s, current, discount);
        delta = delta.max((*slot - current[s]).abs());
    }
    delta
}
