//! Batch statistics and the printable report.
//!
//! Only two numbers are kept per episode: the final score and the number of
//! actions it took. Everything else in a [`BatchReport`] is timing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::harness::EpisodeOutcome;

/// Running aggregate over completed episodes.
#[derive(Debug, Clone, Default)]
pub struct BatchStats {
    episodes: u32,
    total_actions: u64,
    /// Welford running mean of the score
    mean_score: f64,
    /// Welford sum of squared deviations
    m2: f64,
    min_score: Option<f64>,
    max_score: Option<f64>,
}

impl BatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed episode.
    pub fn record(&mut self, outcome: &EpisodeOutcome) {
        self.episodes += 1;
        self.total_actions += outcome.actions as u64;

        let delta = outcome.score - self.mean_score;
        self.mean_score += delta / self.episodes as f64;
        self.m2 += delta * (outcome.score - self.mean_score);

        self.min_score = Some(self.min_score.map_or(outcome.score, |m| m.min(outcome.score)));
        self.max_score = Some(self.max_score.map_or(outcome.score, |m| m.max(outcome.score)));
    }

    pub fn episodes(&self) -> u32 {
        self.episodes
    }

    pub fn mean_score(&self) -> f64 {
        self.mean_score
    }

    /// Population standard deviation of the score.
    pub fn score_std(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            (self.m2 / self.episodes as f64).sqrt()
        }
    }

    pub fn mean_actions(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_actions as f64 / self.episodes as f64
        }
    }

    /// Freeze the aggregate into a report.
    pub fn report(
        &self,
        agent: &str,
        env_id: &str,
        solve_time: Duration,
        play_time: Duration,
        sweeps: Option<u32>,
    ) -> BatchReport {
        BatchReport {
            agent: agent.to_string(),
            env_id: env_id.to_string(),
            episodes: self.episodes,
            mean_score: self.mean_score,
            score_std: self.score_std(),
            min_score: self.min_score.unwrap_or(0.0),
            max_score: self.max_score.unwrap_or(0.0),
            mean_actions: self.mean_actions(),
            solve_seconds: solve_time.as_secs_f64(),
            play_seconds: play_time.as_secs_f64(),
            total_seconds: (solve_time + play_time).as_secs_f64(),
            sweeps,
        }
    }
}

/// Serializable summary of one batch of episodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchReport {
    pub agent: String,
    pub env_id: String,
    pub episodes: u32,
    pub mean_score: f64,
    pub score_std: f64,
    pub min_score: f64,
    pub max_score: f64,
    pub mean_actions: f64,
    /// Time spent building the game and the agent (including any solve)
    pub solve_seconds: f64,
    /// Time spent playing episodes
    pub play_seconds: f64,
    pub total_seconds: f64,
    /// Value iteration sweeps, for agents that solve
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweeps: Option<u32>,
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average amount of actions: {}", self.mean_actions)?;
        writeln!(f, "Average score: {}", self.mean_score)?;
        write!(f, "Total time: {:.4} seconds", self.total_seconds)
    }
}
