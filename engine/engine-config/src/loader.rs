//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_VAR: &str = "DICEMDP_CONFIG";

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by DICEMDP_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from {}: {}", CONFIG_PATH_VAR, path.display());
            return load_from_path(&path);
        }
        warn!(
            "{}={} not found, searching defaults",
            CONFIG_PATH_VAR,
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, f64, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
    // Optional parseable field (Option<u64>, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, optional_parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = Some(v);
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: DICEMDP_<SECTION>_<KEY>.
/// Values that fail to parse are ignored.
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "DICEMDP_COMMON_LOG_LEVEL");

    // Solver
    env_override!(config, solver.discount, "DICEMDP_SOLVER_DISCOUNT", parse);
    env_override!(config, solver.threshold, "DICEMDP_SOLVER_THRESHOLD", parse);
    env_override!(
        config,
        solver.max_sweeps,
        "DICEMDP_SOLVER_MAX_SWEEPS",
        parse
    );
    env_override!(
        config,
        solver.probability_tolerance,
        "DICEMDP_SOLVER_PROBABILITY_TOLERANCE",
        parse
    );
    env_override!(config, solver.sweep_mode, "DICEMDP_SOLVER_SWEEP_MODE");

    // Game
    env_override!(config, game.dice, "DICEMDP_GAME_DICE", parse);
    env_override!(config, game.sides, "DICEMDP_GAME_SIDES", parse);
    env_override!(config, game.penalty, "DICEMDP_GAME_PENALTY", parse);
    env_override!(config, game.seed, "DICEMDP_GAME_SEED", optional_parse);

    // Harness
    env_override!(config, harness.episodes, "DICEMDP_HARNESS_EPISODES", parse);
    env_override!(
        config,
        harness.max_actions_per_episode,
        "DICEMDP_HARNESS_MAX_ACTIONS_PER_EPISODE",
        parse
    );
    env_override!(
        config,
        harness.log_interval,
        "DICEMDP_HARNESS_LOG_INTERVAL",
        parse
    );

    config
}
