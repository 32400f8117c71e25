//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic shared
//! by the solver, the harness and the `dicemdp` binary.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Command-line flags (applied by the binary)
//! 2. Environment variables (`DICEMDP_<SECTION>_<KEY>`)
//! 3. config.toml file
//! 4. Built-in defaults (config.defaults.toml)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! DICEMDP_<SECTION>_<KEY>=value
//!
//! Examples:
//!     DICEMDP_COMMON_LOG_LEVEL=debug
//!     DICEMDP_SOLVER_DISCOUNT=0.95
//!     DICEMDP_SOLVER_SWEEP_MODE=synchronous
//!     DICEMDP_GAME_SEED=42
//!     DICEMDP_HARNESS_EPISODES=10000
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, CONFIG_PATH_VAR, CONFIG_SEARCH_PATHS,
};
pub use structs::*;
