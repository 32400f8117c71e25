//! Exact value iteration for finite MDPs
//!
//! Models implementing [`engine_core::Mdp`] are compiled once into dense,
//! validated transition rows and swept until the largest per-state change
//! drops below the configured threshold. The converged utilities then yield
//! a greedy policy with deterministic tie-breaking.
//!
//! # Example
//!
//! ```ignore
//! use value_iteration::{solve, SolverConfig};
//!
//! let solution = solve(&game, &SolverConfig::default())?;
//! let action = solution.policy().get(&state);
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod policy;
pub mod solver;
pub mod sweep;
pub mod utilities;

pub use config::{SolverConfig, SweepMode};
pub use error::SolveError;
pub use extract::extract_policy;
pub use model::CompiledModel;
pub use policy::Policy;
pub use solver::{solve, Solution};
pub use sweep::{value_iteration, SweepStats};
pub use utilities::Utilities;
