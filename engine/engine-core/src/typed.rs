//! Typed model and game traits
//!
//! [`Mdp`] is the read-only view a solver needs: enumerable states,
//! enumerable actions and a transition function. [`Game`] adds the playable
//! surface an episode runner needs on top of it.

use std::fmt::Debug;
use std::hash::Hash;

use crate::metadata::GameMetadata;
use crate::transition::Transition;

/// A finite Markov decision process
///
/// Implementations must keep `states()` and `actions()` stable for the
/// lifetime of the value: solvers index into them and the order of
/// `actions()` decides which action wins a tie.
///
/// # Example
///
/// ```rust
/// use engine_core::{Mdp, Transition};
///
/// /// Flip a coin for 1 point per flip, or cash out.
/// struct CoinFlip {
///     states: Vec<u8>,
///     actions: Vec<&'static str>,
/// }
///
/// impl Mdp for CoinFlip {
///     type State = u8;
///     type Action = &'static str;
///
///     fn states(&self) -> &[u8] {
///         &self.states
///     }
///
///     fn actions(&self) -> &[&'static str] {
///         &self.actions
///     }
///
///     fn transition(&self, action: &&'static str, state: &u8) -> Transition<u8> {
///         match *action {
///             "stop" => Transition::terminal(*state as f64),
///             _ => Transition::stochastic(vec![0, 1], vec![0.5, 0.5], 1.0),
///         }
///     }
/// }
///
/// let game = CoinFlip { states: vec![0, 1], actions: vec!["stop", "flip"] };
/// assert!(game.transition(&"stop", &1).terminal);
/// ```
pub trait Mdp {
    /// Game state - immutable value with value-based equality and hashing
    type State: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    /// Action - immutable value with value-based equality and hashing
    type Action: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    /// Every state the game can be observed in
    fn states(&self) -> &[Self::State];

    /// Every action, in tie-break priority order
    fn actions(&self) -> &[Self::Action];

    /// Distribution over successors for taking `action` in `state`
    fn transition(&self, action: &Self::Action, state: &Self::State) -> Transition<Self::State>;
}

/// Result of applying an action to a live game
#[derive(Debug, Clone, PartialEq)]
pub struct RollOutcome<S> {
    /// Face values produced by this roll (empty when the game stopped)
    pub rolled: Vec<u8>,
    /// State after the roll
    pub state: S,
    /// Whether the episode has ended
    pub game_over: bool,
}

/// A playable game backed by its own random source
///
/// The random source is supplied when the game is constructed, so two games
/// built with the same seed play identical episodes.
pub trait Game: Mdp + Debug {
    /// Display metadata for logs and reports
    fn metadata(&self) -> GameMetadata;

    /// Start a fresh episode and return its initial state
    fn reset(&mut self) -> Self::State;

    /// Apply an action to the current episode
    fn roll(&mut self, action: &Self::Action) -> Result<RollOutcome<Self::State>, GameError>;

    /// Current score; final once a roll reported `game_over`
    fn score(&self) -> f64;

    /// The action that ends an episode immediately
    fn stop_action(&self) -> Self::Action;
}

/// Error type for game operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("Action {action} is not in the action set")]
    InvalidAction { action: String },
    #[error("Game is over, reset before rolling again")]
    GameOver,
    #[error("Invalid game configuration: {0}")]
    InvalidConfig(String),
}
