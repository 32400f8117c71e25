//! Configuration for the dicemdp actor
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use games_dice::DiceConfig;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use value_iteration::{SolverConfig, SweepMode};

use crate::harness::HarnessConfig;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_episodes() -> u32 {
    CENTRAL_CONFIG.harness.episodes
}

fn default_max_actions() -> u32 {
    CENTRAL_CONFIG.harness.max_actions_per_episode
}

fn default_log_interval() -> u32 {
    CENTRAL_CONFIG.harness.log_interval
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_discount() -> f64 {
    CENTRAL_CONFIG.solver.discount
}

fn default_threshold() -> f64 {
    CENTRAL_CONFIG.solver.threshold
}

fn default_max_sweeps() -> u32 {
    CENTRAL_CONFIG.solver.max_sweeps
}

fn default_probability_tolerance() -> f64 {
    CENTRAL_CONFIG.solver.probability_tolerance
}

fn default_sweep_mode() -> String {
    CENTRAL_CONFIG.solver.sweep_mode.clone()
}

fn default_dice() -> u8 {
    CENTRAL_CONFIG.game.dice
}

fn default_sides() -> u8 {
    CENTRAL_CONFIG.game.sides
}

fn default_penalty() -> f64 {
    CENTRAL_CONFIG.game.penalty
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "dicemdp-actor")]
#[command(about = "Solve the dice re-roll game exactly and play it")]
#[command(
    long_about = "Solves the dice game by value iteration, then plays a batch of
episodes with the optimal policy and reports average actions, average score
and elapsed time.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Number of episodes to play
    #[arg(short = 'n', long, default_value_t = default_episodes())]
    pub episodes: u32,

    /// Discount factor, in (0, 1]
    #[arg(short = 'g', long, default_value_t = default_discount())]
    pub discount: f64,

    /// Stop sweeping once the largest utility change drops below this
    #[arg(long, default_value_t = default_threshold())]
    pub threshold: f64,

    /// Give up after this many sweeps
    #[arg(long, default_value_t = default_max_sweeps())]
    pub max_sweeps: u32,

    /// Allowed drift of a transition's probability mass from 1
    #[arg(long, default_value_t = default_probability_tolerance())]
    pub probability_tolerance: f64,

    /// Sweep update order (in_place or synchronous)
    #[arg(long, default_value_t = default_sweep_mode())]
    pub sweep_mode: String,

    /// Number of dice
    #[arg(long, default_value_t = default_dice())]
    pub dice: u8,

    /// Faces per die
    #[arg(long, default_value_t = default_sides())]
    pub sides: u8,

    /// Points lost per re-roll
    #[arg(long, default_value_t = default_penalty())]
    pub penalty: f64,

    /// RNG seed (falls back to [game].seed, then OS entropy)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Abort an episode after this many actions
    #[arg(long, default_value_t = default_max_actions())]
    pub max_actions: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Log progress every N episodes (0 to disable)
    #[arg(long, default_value_t = default_log_interval())]
    pub log_interval: u32,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Also play the always-stop and perfectionist baselines
    #[arg(long)]
    pub baselines: bool,

    /// Print every state's utility, chosen action and action values
    #[arg(long)]
    pub explain: bool,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.episodes == 0 {
            return Err(anyhow!("episodes must be greater than 0"));
        }

        if self.max_actions == 0 {
            return Err(anyhow!("max_actions must be greater than 0"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        self.solver_config()?;
        self.dice_config().validate()?;

        Ok(())
    }

    pub fn solver_config(&self) -> Result<SolverConfig> {
        let sweep_mode: SweepMode = self.sweep_mode.parse().map_err(|e: String| anyhow!(e))?;
        let config = SolverConfig {
            discount: self.discount,
            threshold: self.threshold,
            max_sweeps: self.max_sweeps,
            probability_tolerance: self.probability_tolerance,
            sweep_mode,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn dice_config(&self) -> DiceConfig {
        DiceConfig::default()
            .with_dice(self.dice)
            .with_sides(self.sides)
            .with_penalty(self.penalty)
    }

    pub fn harness_config(&self) -> HarnessConfig {
        HarnessConfig::default()
            .with_episodes(self.episodes)
            .with_max_actions(self.max_actions)
            .with_log_interval(self.log_interval)
    }

    /// Seed from the command line, else from config.toml / DICEMDP_GAME_SEED
    pub fn configured_seed(&self) -> Option<u64> {
        self.seed.or(CENTRAL_CONFIG.game.seed)
    }
}
