//! Episode runner and batch evaluation

use std::time::{Duration, Instant};

use engine_core::{Game, GameError};
use thiserror::Error;
use tracing::{debug, info, trace};
use value_iteration::SolverConfig;

use crate::agent::{Agent, AgentError, OptimalPolicyAgent};
use crate::stats::{BatchReport, BatchStats};

/// Errors that abort an episode or a batch
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("Game rejected the agent's move: {0}")]
    Game(#[from] GameError),

    #[error("Episode did not finish within {limit} actions")]
    ActionLimit { limit: u32 },

    #[error("Invalid harness config: {0}")]
    InvalidConfig(String),
}

/// Batch settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub episodes: u32,
    /// Abort an episode that takes more actions than this
    pub max_actions_per_episode: u32,
    /// Log progress every N episodes (0 = only the summary)
    pub log_interval: u32,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            max_actions_per_episode: 1000,
            log_interval: 0,
        }
    }
}

impl HarnessConfig {
    pub fn with_episodes(mut self, episodes: u32) -> Self {
        self.episodes = episodes;
        self
    }

    pub fn with_max_actions(mut self, max_actions: u32) -> Self {
        self.max_actions_per_episode = max_actions;
        self
    }

    pub fn with_log_interval(mut self, log_interval: u32) -> Self {
        self.log_interval = log_interval;
        self
    }

    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.episodes == 0 {
            return Err(HarnessError::InvalidConfig(
                "episodes must be greater than 0".to_string(),
            ));
        }
        if self.max_actions_per_episode == 0 {
            return Err(HarnessError::InvalidConfig(
                "max_actions_per_episode must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of one finished episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeOutcome {
    pub score: f64,
    pub actions: u32,
}

/// Play one game from a fresh reset until it reports game over.
pub fn run_episode<G, A>(
    agent: &A,
    game: &mut G,
    max_actions: u32,
) -> Result<EpisodeOutcome, HarnessError>
where
    G: Game,
    A: Agent<G> + ?Sized,
{
    let mut state = game.reset();
    let mut actions = 0u32;

    loop {
        if actions >= max_actions {
            return Err(HarnessError::ActionLimit { limit: max_actions });
        }
        let action = agent.play(&state)?;
        actions += 1;

        let outcome = game.roll(&action)?;
        trace!(
            action = ?action,
            rolled = ?outcome.rolled,
            state = ?outcome.state,
            "Rolled"
        );
        state = outcome.state;
        if outcome.game_over {
            break;
        }
    }

    Ok(EpisodeOutcome {
        score: game.score(),
        actions,
    })
}

/// Play `config.episodes` episodes with one agent on one game.
pub fn play_batch<G, A>(
    agent: &A,
    game: &mut G,
    config: &HarnessConfig,
) -> Result<BatchStats, HarnessError>
where
    G: Game,
    A: Agent<G> + ?Sized,
{
    config.validate()?;
    let mut stats = BatchStats::new();

    for episode in 1..=config.episodes {
        let outcome = run_episode(agent, game, config.max_actions_per_episode)?;
        stats.record(&outcome);

        if config.log_interval > 0 && episode % config.log_interval == 0 {
            info!(
                agent = agent.name(),
                episode,
                mean_score = stats.mean_score(),
                mean_actions = stats.mean_actions(),
                "Progress"
            );
        }
    }

    Ok(stats)
}

/// A finished batch together with the agent that played it
#[derive(Debug)]
pub struct BatchRun<G: Game> {
    pub report: BatchReport,
    pub agent: OptimalPolicyAgent<G>,
}

/// Build a game and an optimal agent once, then play every episode with them.
///
/// Construction (including the solve) and play are timed separately.
pub fn run_batch<G, F>(
    make_game: F,
    solver: &SolverConfig,
    config: &HarnessConfig,
) -> Result<BatchRun<G>, HarnessError>
where
    G: Game,
    F: FnOnce() -> Result<G, GameError>,
{
    config.validate()?;

    let start = Instant::now();
    let mut game = make_game()?;
    let agent = OptimalPolicyAgent::new(&game, solver)?;
    let solve_time = start.elapsed();

    let start = Instant::now();
    let stats = play_batch(&agent, &mut game, config)?;
    let play_time = start.elapsed();

    let report = stats.report(
        agent.name(),
        &game.metadata().env_id,
        solve_time,
        play_time,
        Some(agent.solution().stats().sweeps),
    );
    info!(
        episodes = report.episodes,
        mean_score = report.mean_score,
        mean_actions = report.mean_actions,
        total_seconds = report.total_seconds,
        "Batch complete"
    );

    Ok(BatchRun { report, agent })
}

/// Play the same batch with several agents, each on a freshly built game.
///
/// `make_game` should seed identically on every call so every agent sees
/// the same dice stream until their choices diverge.
pub fn compare_agents<G, F>(
    make_game: F,
    agents: &[&dyn Agent<G>],
    config: &HarnessConfig,
) -> Result<Vec<BatchReport>, HarnessError>
where
    G: Game,
    F: Fn() -> Result<G, GameError>,
{
    config.validate()?;

    agents
        .iter()
        .map(|agent| -> Result<BatchReport, HarnessError> {
            let mut game = make_game()?;
            let start = Instant::now();
            let stats = play_batch(*agent, &mut game, config)?;
            let play_time = start.elapsed();
            debug!(
                agent = agent.name(),
                episodes = stats.episodes(),
                "Baseline batch complete"
            );
            Ok(stats.report(
                agent.name(),
                &game.metadata().env_id,
                Duration::ZERO,
                play_time,
                None,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AlwaysStopAgent, FixedRuleAgent};
    use games_dice::{DiceConfig, DiceGame, Reroll};

    const SEED: u64 = 20_240_601;

    fn make_game(seed: u64) -> impl Fn() -> Result<DiceGame, GameError> {
        move || DiceGame::with_seed(DiceConfig::default(), seed)
    }

    fn solver() -> SolverConfig {
        SolverConfig::default()
            .with_discount(0.99)
            .with_threshold(0.01)
    }

    #[test]
    fn test_always_stop_takes_one_action() {
        let mut game = make_game(SEED)().unwrap();
        let agent = AlwaysStopAgent::new(&game);
        for _ in 0..20 {
            let outcome = run_episode(&agent, &mut game, 10).unwrap();
            assert_eq!(outcome.actions, 1);
            assert!(outcome.score >= 3.0 && outcome.score <= 18.0);
        }
    }

    #[test]
    fn test_action_limit_aborts_runaway_episode() {
        // Never stops
        let agent = FixedRuleAgent::<DiceGame>::new("reroll-forever", Reroll::all(3));
        let mut game = make_game(SEED)().unwrap();
        let err = run_episode(&agent, &mut game, 25).unwrap_err();
        assert!(matches!(err, HarnessError::ActionLimit { limit: 25 }));
    }

    #[test]
    fn test_invalid_action_surfaces_game_error() {
        let agent = FixedRuleAgent::<DiceGame>::new("bad", Reroll::new(vec![7]));
        let mut game = make_game(SEED)().unwrap();
        let err = run_episode(&agent, &mut game, 10).unwrap_err();
        assert!(matches!(
            err,
            HarnessError::Game(GameError::InvalidAction { .. })
        ));
    }

    #[test]
    fn test_unknown_state_surfaces_agent_error() {
        // Policy solved for two dice, played on three
        let small = DiceGame::with_seed(DiceConfig::default().with_dice(2), 0).unwrap();
        let agent = OptimalPolicyAgent::new(&small, &solver()).unwrap();
        let mut game = make_game(SEED)().unwrap();
        let err = run_episode(&agent, &mut game, 10).unwrap_err();
        assert!(matches!(
            err,
            HarnessError::Agent(AgentError::UnknownState { .. })
        ));
    }

    #[test]
    fn test_zero_episodes_rejected() {
        let config = HarnessConfig::default().with_episodes(0);
        let err = run_batch(make_game(SEED), &solver(), &config).unwrap_err();
        assert!(matches!(err, HarnessError::InvalidConfig(_)));
    }

    #[test]
    fn test_end_to_end_three_dice() {
        let config = HarnessConfig::default().with_episodes(1000);
        let run = run_batch(make_game(SEED), &solver(), &config).unwrap();
        let report = &run.report;

        assert_eq!(report.episodes, 1000);
        assert_eq!(report.agent, "optimal");
        assert_eq!(report.env_id, "dice");
        assert!(report.mean_score >= 13.0, "mean score {}", report.mean_score);
        assert!(
            report.mean_actions <= 3.5,
            "mean actions {}",
            report.mean_actions
        );
        assert!(report.mean_actions >= 1.0);
        assert!(report.max_score <= 18.0);
        assert!(report.total_seconds >= report.play_seconds);
        assert!(report.sweeps.unwrap() >= 2);
    }

    #[test]
    fn test_policy_reuse_is_invariant() {
        let short = run_batch(
            make_game(SEED),
            &solver(),
            &HarnessConfig::default().with_episodes(10),
        )
        .unwrap();
        let long = run_batch(
            make_game(SEED + 1),
            &solver(),
            &HarnessConfig::default().with_episodes(1000),
        )
        .unwrap();

        assert_eq!(short.agent.policy(), long.agent.policy());
        assert!((short.report.mean_score - long.report.mean_score).abs() < 4.0);
    }

    #[test]
    fn test_same_seed_same_report() {
        let config = HarnessConfig::default().with_episodes(200);
        let a = run_batch(make_game(SEED), &solver(), &config).unwrap();
        let b = run_batch(make_game(SEED), &solver(), &config).unwrap();
        assert_eq!(a.report.mean_score, b.report.mean_score);
        assert_eq!(a.report.mean_actions, b.report.mean_actions);
    }

    #[test]
    fn test_compare_agents() {
        let game = make_game(SEED)().unwrap();
        let optimal = OptimalPolicyAgent::new(&game, &solver()).unwrap();
        let perfectionist = FixedRuleAgent::perfectionist(&game);
        let always_stop = AlwaysStopAgent::new(&game);

        let config = HarnessConfig::default().with_episodes(500);
        let agents: [&dyn Agent<DiceGame>; 3] = [&optimal, &perfectionist, &always_stop];
        let reports = compare_agents(make_game(SEED), &agents, &config).unwrap();

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].agent, "optimal");
        assert_eq!(reports[1].agent, "perfectionist");
        assert_eq!(reports[2].agent, "always-stop");
        assert_eq!(reports[2].mean_actions, 1.0);
        assert!(reports[0].mean_score > reports[2].mean_score);
        assert!(reports[0].mean_score > reports[1].mean_score);
        assert!(reports.iter().all(|r| r.sweeps.is_none()));
    }

    #[test]
    fn test_perfectionist_episode_ends_on_best_hand() {
        let mut game = make_game(SEED)().unwrap();
        let agent = FixedRuleAgent::perfectionist(&game);
        let outcome = run_episode(&agent, &mut game, 100_000).unwrap();
        // Banked 18 minus one point per re-roll
        assert_eq!(outcome.score, 18.0 - (outcome.actions - 1) as f64);
    }
}
