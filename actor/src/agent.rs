//! Agents that choose an action for a game state

use std::collections::HashMap;

use engine_core::{Game, Mdp};
use games_dice::{DiceGame, Reroll};
use thiserror::Error;
use tracing::info;
use value_iteration::{solve, Policy, Solution, SolveError, SolverConfig};

/// Errors raised while building or consulting an agent
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{agent} has no action for state {state}")]
    UnknownState { agent: String, state: String },

    #[error("Failed to solve game: {0}")]
    Solve(#[from] SolveError),
}

/// Something that picks an action for every state it is shown
pub trait Agent<G: Game>: Send + Sync {
    /// Short name used in logs and reports
    fn name(&self) -> &str;

    /// Choose the action to take in `state`
    fn play(&self, state: &G::State) -> Result<G::Action, AgentError>;
}

/// Stops immediately, whatever the dice show
#[derive(Debug, Clone)]
pub struct AlwaysStopAgent<G: Game> {
    stop: G::Action,
}

impl<G: Game> AlwaysStopAgent<G> {
    pub fn new(game: &G) -> Self {
        Self {
            stop: game.stop_action(),
        }
    }
}

impl<G: Game> Agent<G> for AlwaysStopAgent<G> {
    fn name(&self) -> &str {
        "always-stop"
    }

    fn play(&self, _state: &G::State) -> Result<G::Action, AgentError> {
        Ok(self.stop.clone())
    }
}

/// Table of hand-picked actions with a fallback for every other state
#[derive(Debug, Clone)]
pub struct FixedRuleAgent<G: Game> {
    name: String,
    rules: HashMap<G::State, G::Action>,
    fallback: G::Action,
}

impl<G: Game> FixedRuleAgent<G> {
    pub fn new(name: impl Into<String>, fallback: G::Action) -> Self {
        Self {
            name: name.into(),
            rules: HashMap::new(),
            fallback,
        }
    }

    /// Builder pattern: add one rule
    pub fn with_rule(mut self, state: G::State, action: G::Action) -> Self {
        self.rules.insert(state, action);
        self
    }

    pub fn num_rules(&self) -> usize {
        self.rules.len()
    }
}

impl FixedRuleAgent<DiceGame> {
    /// Stop only on hands that already have the best possible final score,
    /// otherwise re-roll every die.
    pub fn perfectionist(game: &DiceGame) -> Self {
        let best = game.best_final_score();
        game.states()
            .iter()
            .filter(|state| game.final_score(state) == best)
            .fold(
                Self::new("perfectionist", Reroll::all(game.config().dice)),
                |agent, state| agent.with_rule(state.clone(), Reroll::stop()),
            )
    }
}

impl<G: Game> Agent<G> for FixedRuleAgent<G> {
    fn name(&self) -> &str {
        &self.name
    }

    fn play(&self, state: &G::State) -> Result<G::Action, AgentError> {
        Ok(self
            .rules
            .get(state)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone()))
    }
}

/// Plays the greedy policy of an exactly solved game
///
/// The whole solve happens in [`OptimalPolicyAgent::new`]; `play` is a
/// table lookup and never re-solves.
#[derive(Debug)]
pub struct OptimalPolicyAgent<G: Game> {
    solution: Solution<G::State, G::Action>,
}

impl<G: Game> OptimalPolicyAgent<G> {
    pub fn new(game: &G, config: &SolverConfig) -> Result<Self, AgentError> {
        let solution = solve(game, config)?;
        info!(
            env_id = %game.metadata().env_id,
            states = solution.policy().len(),
            sweeps = solution.stats().sweeps,
            "Optimal policy ready"
        );
        Ok(Self { solution })
    }

    pub fn policy(&self) -> &Policy<G::State, G::Action> {
        self.solution.policy()
    }

    pub fn solution(&self) -> &Solution<G::State, G::Action> {
        &self.solution
    }
}

impl<G: Game> Agent<G> for OptimalPolicyAgent<G> {
    fn name(&self) -> &str {
        "optimal"
    }

    fn play(&self, state: &G::State) -> Result<G::Action, AgentError> {
        self.solution
            .policy()
            .get(state)
            .cloned()
            .ok_or_else(|| AgentError::UnknownState {
                agent: "optimal".to_string(),
                state: format!("{:?}", state),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_dice::{Dice, DiceConfig};

    fn game() -> DiceGame {
        DiceGame::with_seed(DiceConfig::default(), 5).unwrap()
    }

    #[test]
    fn test_always_stop() {
        let game = game();
        let agent = AlwaysStopAgent::new(&game);
        for state in game.states() {
            assert_eq!(Agent::<DiceGame>::play(&agent, state).unwrap(), Reroll::stop());
        }
        assert_eq!(Agent::<DiceGame>::name(&agent), "always-stop");
    }

    #[test]
    fn test_perfectionist_rules() {
        let game = game();
        let agent = FixedRuleAgent::perfectionist(&game);
        assert_eq!(agent.num_rules(), 2);
        assert_eq!(
            agent.play(&Dice::new(vec![1, 1, 1])).unwrap(),
            Reroll::stop()
        );
        assert_eq!(
            agent.play(&Dice::new(vec![1, 6, 1])).unwrap(),
            Reroll::stop()
        );
        assert_eq!(
            agent.play(&Dice::new(vec![2, 3, 4])).unwrap(),
            Reroll::all(3)
        );
        assert_eq!(agent.name(), "perfectionist");
    }

    #[test]
    fn test_fixed_rule_fallback() {
        let agent = FixedRuleAgent::<DiceGame>::new("hold-sixes", Reroll::stop())
            .with_rule(Dice::new(vec![1, 2, 6]), Reroll::new(vec![0, 1]));
        assert_eq!(
            agent.play(&Dice::new(vec![1, 2, 6])).unwrap(),
            Reroll::new(vec![0, 1])
        );
        assert_eq!(
            agent.play(&Dice::new(vec![3, 3, 3])).unwrap(),
            Reroll::stop()
        );
    }

    #[test]
    fn test_optimal_agent_plays_policy() {
        let game = game();
        let agent = OptimalPolicyAgent::new(&game, &SolverConfig::default()).unwrap();
        for state in game.states() {
            assert_eq!(
                agent.play(state).unwrap(),
                agent.policy().get(state).unwrap().clone()
            );
        }
        assert_eq!(
            agent.play(&Dice::new(vec![1, 1, 1])).unwrap(),
            Reroll::stop()
        );
    }

    #[test]
    fn test_optimal_agent_unknown_state() {
        let agent = OptimalPolicyAgent::new(&game(), &SolverConfig::default()).unwrap();
        // Two dice never appear in a three-dice game
        let err = agent.play(&Dice::new(vec![1, 1])).unwrap_err();
        assert!(matches!(err, AgentError::UnknownState { .. }));
        assert!(err.to_string().contains("[1, 1]"));
    }

    #[test]
    fn test_optimal_agent_reports_solve_errors() {
        let config = SolverConfig::default().with_max_sweeps(1);
        let err = OptimalPolicyAgent::new(&game(), &config).unwrap_err();
        assert!(matches!(
            err,
            AgentError::Solve(SolveError::NotConverged { sweeps: 1, .. })
        ));
    }

    #[test]
    fn test_agents_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OptimalPolicyAgent<DiceGame>>();
        assert_send_sync::<FixedRuleAgent<DiceGame>>();
        assert_send_sync::<AlwaysStopAgent<DiceGame>>();
    }
}
