//! Core traits and types for dicemdp
//!
//! This crate provides the model-side abstractions shared by the solver,
//! the games and the actor:
//! - `Mdp`: Read-only view of a finite MDP (states, actions, transitions)
//! - `Game`: Playable surface on top of an `Mdp` (reset, roll, score)
//! - `Transition`: One-step outcome distribution with contract checks
//! - `StateIndex`: Dense state <-> index bijection for array storage

pub mod index;
pub mod metadata;
pub mod transition;
pub mod typed;

// Re-export main types for convenience
pub use index::{IndexError, StateIndex};
pub use metadata::GameMetadata;
pub use transition::{Transition, TransitionDefect};
pub use typed::{Game, GameError, Mdp, RollOutcome};
