//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_discount() -> f64 {
    defaults::discount()
}
fn d_threshold() -> f64 {
    defaults::threshold()
}
fn d_max_sweeps() -> u32 {
    defaults::max_sweeps()
}
fn d_probability_tolerance() -> f64 {
    defaults::probability_tolerance()
}
fn d_sweep_mode() -> String {
    defaults::sweep_mode().into()
}
fn d_dice() -> u8 {
    defaults::dice()
}
fn d_sides() -> u8 {
    defaults::sides()
}
fn d_penalty() -> f64 {
    defaults::penalty()
}
fn d_episodes() -> u32 {
    defaults::episodes()
}
fn d_max_actions() -> u32 {
    defaults::max_actions_per_episode()
}
fn d_log_interval() -> u32 {
    defaults::log_interval()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub solver: SolverSection,
    #[serde(default)]
    pub game: GameSection,
    #[serde(default)]
    pub harness: HarnessSection,
}

/// Settings shared by every component
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Value iteration parameters
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SolverSection {
    #[serde(default = "d_discount")]
    pub discount: f64,
    #[serde(default = "d_threshold")]
    pub threshold: f64,
    #[serde(default = "d_max_sweeps")]
    pub max_sweeps: u32,
    #[serde(default = "d_probability_tolerance")]
    pub probability_tolerance: f64,
    /// "in_place" or "synchronous"
    #[serde(default = "d_sweep_mode")]
    pub sweep_mode: String,
}

impl Default for SolverSection {
    fn default() -> Self {
        Self {
            discount: defaults::discount(),
            threshold: defaults::threshold(),
            max_sweeps: defaults::max_sweeps(),
            probability_tolerance: defaults::probability_tolerance(),
            sweep_mode: defaults::sweep_mode().into(),
        }
    }
}

/// Dice game shape and RNG seed
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GameSection {
    #[serde(default = "d_dice")]
    pub dice: u8,
    #[serde(default = "d_sides")]
    pub sides: u8,
    #[serde(default = "d_penalty")]
    pub penalty: f64,
    /// Fixed RNG seed (None = seed from OS entropy)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            dice: defaults::dice(),
            sides: defaults::sides(),
            penalty: defaults::penalty(),
            seed: None,
        }
    }
}

/// Episode batch settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HarnessSection {
    #[serde(default = "d_episodes")]
    pub episodes: u32,
    #[serde(default = "d_max_actions")]
    pub max_actions_per_episode: u32,
    /// Log progress every N episodes (0 = only the summary)
    #[serde(default = "d_log_interval")]
    pub log_interval: u32,
}

impl Default for HarnessSection {
    fn default() -> Self {
        Self {
            episodes: defaults::episodes(),
            max_actions_per_episode: defaults::max_actions_per_episode(),
            log_interval: defaults::log_interval(),
        }
    }
}
