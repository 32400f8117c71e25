//! Error types for solving.

use engine_core::{IndexError, TransitionDefect};
use thiserror::Error;

/// Errors that can occur while compiling or solving a model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("Invalid solver config: {0}")]
    InvalidConfig(String),

    #[error("Model has no {0}")]
    EmptyModel(&'static str),

    #[error("Invalid state set: {0}")]
    StateSet(#[from] IndexError),

    #[error("Malformed transition for {action} in state {state}: {defect}")]
    MalformedTransition {
        state: String,
        action: String,
        defect: TransitionDefect,
    },

    #[error("{action} in state {state} leads to unenumerated state {successor}")]
    UnknownSuccessor {
        state: String,
        action: String,
        successor: String,
    },

    #[error("No convergence after {sweeps} sweeps: delta {delta} >= threshold {threshold}")]
    NotConverged {
        sweeps: u32,
        delta: f64,
        threshold: f64,
    },

    #[error("Utilities became non-finite at sweep {sweep}")]
    Diverged { sweep: u32 },
}

impl SolveError {
    /// True when the model was valid but the sweep cap ran out.
    pub fn is_convergence_failure(&self) -> bool {
        matches!(
            self,
            SolveError::NotConverged { .. } | SolveError::Diverged { .. }
        )
    }
}
