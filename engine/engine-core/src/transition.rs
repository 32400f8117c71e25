//! One-step transition descriptions.
//!
//! A [`Transition`] is what a model reports for a single (action, state)
//! pair: either a terminal payoff, or a reward plus a probability
//! distribution over successor states.

use thiserror::Error;

/// Outcome distribution of taking an action in a state.
///
/// When `terminal` is set, `reward` is the whole payoff and the successor
/// lists are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S> {
    /// Possible successor states
    pub next_states: Vec<S>,
    /// Probability of each successor, index-aligned with `next_states`
    pub probabilities: Vec<f64>,
    /// Immediate reward for taking the action
    pub reward: f64,
    /// Whether the action ends the episode
    pub terminal: bool,
}

/// Ways a non-terminal transition can violate its contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransitionDefect {
    #[error("{successors} successors but {probabilities} probabilities")]
    LengthMismatch {
        successors: usize,
        probabilities: usize,
    },

    #[error("non-terminal transition has no successors")]
    NoSuccessors,

    #[error("probability {value} is negative or not finite")]
    InvalidProbability { value: f64 },

    #[error("probabilities sum to {sum}, expected 1")]
    BadMass { sum: f64 },
}

impl<S> Transition<S> {
    /// A terminal transition paying `reward`.
    pub fn terminal(reward: f64) -> Self {
        Self {
            next_states: Vec::new(),
            probabilities: Vec::new(),
            reward,
            terminal: true,
        }
    }

    /// A non-terminal transition over several successors.
    pub fn stochastic(next_states: Vec<S>, probabilities: Vec<f64>, reward: f64) -> Self {
        Self {
            next_states,
            probabilities,
            reward,
            terminal: false,
        }
    }

    /// A non-terminal transition with a single certain successor.
    pub fn deterministic(next_state: S, reward: f64) -> Self {
        Self::stochastic(vec![next_state], vec![1.0], reward)
    }

    /// Total probability mass over successors.
    pub fn probability_mass(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Iterate over (successor, probability) pairs.
    pub fn outcomes(&self) -> impl Iterator<Item = (&S, f64)> {
        self.next_states
            .iter()
            .zip(self.probabilities.iter().copied())
    }

    /// Check the distribution contract of a non-terminal transition.
    ///
    /// Terminal transitions always pass. `tolerance` bounds how far the
    /// probability mass may drift from 1.
    pub fn check(&self, tolerance: f64) -> Result<(), TransitionDefect> {
        if self.terminal {
            return Ok(());
        }
        if self.next_states.len() != self.probabilities.len() {
            return Err(TransitionDefect::LengthMismatch {
                successors: self.next_states.len(),
                probabilities: self.probabilities.len(),
            });
        }
        if self.next_states.is_empty() {
            return Err(TransitionDefect::NoSuccessors);
        }
        if let Some(&value) = self
            .probabilities
            .iter()
            .find(|p| !p.is_finite() || **p < 0.0)
        {
            return Err(TransitionDefect::InvalidProbability { value });
        }
        let sum = self.probability_mass();
        if (sum - 1.0).abs() > tolerance {
            return Err(TransitionDefect::BadMass { sum });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_ignores_successors() {
        let mut t: Transition<u8> = Transition::terminal(5.0);
        t.probabilities = vec![0.3];
        assert!(t.terminal);
        assert_eq!(t.check(1e-9), Ok(()));
    }

    #[test]
    fn test_deterministic() {
        let t = Transition::deterministic(3u8, -1.0);
        assert_eq!(t.next_states, vec![3]);
        assert_eq!(t.probabilities, vec![1.0]);
        assert!(!t.terminal);
        assert!(t.check(1e-12).is_ok());
    }

    #[test]
    fn test_outcomes_zip() {
        let t = Transition::stochastic(vec!['a', 'b'], vec![0.25, 0.75], 0.0);
        let pairs: Vec<_> = t.outcomes().collect();
        assert_eq!(pairs, vec![(&'a', 0.25), (&'b', 0.75)]);
    }

    #[test]
    fn test_length_mismatch() {
        let t = Transition::stochastic(vec![1u8, 2], vec![1.0], 0.0);
        assert_eq!(
            t.check(1e-9),
            Err(TransitionDefect::LengthMismatch {
                successors: 2,
                probabilities: 1
            })
        );
    }

    #[test]
    fn test_no_successors() {
        let t: Transition<u8> = Transition::stochastic(vec![], vec![], 0.0);
        assert_eq!(t.check(1e-9), Err(TransitionDefect::NoSuccessors));
    }

    #[test]
    fn test_negative_probability() {
        let t = Transition::stochastic(vec![1u8, 2], vec![1.5, -0.5], 0.0);
        assert!(matches!(
            t.check(1e-9),
            Err(TransitionDefect::InvalidProbability { .. })
        ));
    }

    #[test]
    fn test_bad_mass() {
        let t = Transition::stochastic(vec![1u8, 2], vec![0.5, 0.4], 0.0);
        match t.check(1e-6) {
            Err(TransitionDefect::BadMass { sum }) => assert!((sum - 0.9).abs() < 1e-12),
            other => panic!("expected BadMass, got {:?}", other),
        }
    }

    #[test]
    fn test_mass_within_tolerance() {
        let third = 1.0 / 3.0;
        let t = Transition::stochastic(vec![1u8, 2, 3], vec![third, third, third], 0.0);
        assert!(t.check(1e-9).is_ok());
    }
}
