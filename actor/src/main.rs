//! dicemdp actor - solves the dice re-roll game and plays it
//!
//! A one-shot process that:
//! 1. Builds the dice game from config.toml, env vars and CLI flags
//! 2. Solves it exactly by value iteration (once)
//! 3. Plays a batch of episodes with the resulting policy
//! 4. Prints average actions, average score and total time to stdout
//!
//! Logs go to stderr so stdout only carries the report.

use anyhow::{Context, Result};
use clap::Parser;
use games_dice::{DiceConfig, DiceGame};
use tracing::{error, info};

mod agent;
mod config;
mod harness;
mod stats;

use crate::agent::{Agent, AlwaysStopAgent, FixedRuleAgent, OptimalPolicyAgent};
use crate::config::Config;
use crate::harness::{compare_agents, run_batch};
use crate::stats::BatchReport;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

/// Print every state's utility, chosen action and the value of each action.
fn explain(agent: &OptimalPolicyAgent<DiceGame>) {
    let solution = agent.solution();
    for (state, action) in agent.policy().iter() {
        let utility = solution.utilities().get(state).unwrap_or(f64::NAN);
        println!("{}  U = {:.4}  -> {}", state, utility, action);
        for (candidate, q) in solution.action_values(state).unwrap_or_default() {
            println!("    {:<16} {:.4}", candidate.to_string(), q);
        }
    }
}

fn print_reports(reports: &[BatchReport], json: bool) -> Result<()> {
    if json {
        let out = if reports.len() == 1 {
            serde_json::to_string_pretty(&reports[0])
        } else {
            serde_json::to_string_pretty(reports)
        }
        .context("Failed to serialize report")?;
        println!("{}", out);
        return Ok(());
    }

    for (i, report) in reports.iter().enumerate() {
        if reports.len() > 1 {
            if i > 0 {
                println!();
            }
            println!("[{}]", report.agent);
        }
        println!("{}", report);
    }
    Ok(())
}

fn run(config: &Config) -> Result<()> {
    let solver = config.solver_config()?;
    let dice = config.dice_config();
    let harness = config.harness_config();

    // Baselines need every game seeded identically, so draw one up front
    let seed = match config.configured_seed() {
        Some(seed) => seed,
        None => {
            let seed = rand::random();
            info!(seed, "No seed configured, drew one from OS entropy");
            seed
        }
    };
    let make_game = |dice: DiceConfig| move || DiceGame::with_seed(dice.clone(), seed);

    info!(
        episodes = harness.episodes,
        discount = solver.discount,
        threshold = solver.threshold,
        sweep_mode = %solver.sweep_mode,
        dice = dice.dice,
        sides = dice.sides,
        seed,
        "Starting batch"
    );

    let run = run_batch(make_game(dice.clone()), &solver, &harness)
        .context("Optimal agent batch failed")?;

    // Keep stdout parseable under --json
    if config.explain && !config.json {
        explain(&run.agent);
        println!();
    }

    let mut reports = vec![run.report.clone()];
    if config.baselines {
        let game = make_game(dice.clone())()?;
        let perfectionist = FixedRuleAgent::perfectionist(&game);
        info!(rules = perfectionist.num_rules(), "Perfectionist baseline ready");
        let always_stop = AlwaysStopAgent::new(&game);
        let baselines: [&dyn Agent<DiceGame>; 2] = [&perfectionist, &always_stop];
        reports.extend(
            compare_agents(make_game(dice), &baselines, &harness)
                .context("Baseline batch failed")?,
        );
    }

    print_reports(&reports, config.json)
}

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    match run(&config) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("dicemdp failed: {:#}", e);
            Err(e)
        }
    }
}
