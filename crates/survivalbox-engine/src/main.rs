//! Headless runner for the SurvivalBox simulation.
//!
//! Stands in for an RL harness: it builds a simulation from configuration
//! and plays the configured number of episodes with a uniformly random
//! policy, logging a summary of each.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `survivalbox-config.yaml` (or the path given
//!    as the first argument)
//! 2. Initialize structured logging (tracing)
//! 3. Build the simulation (validates the configuration, generates the map)
//! 4. Run the episodes, resetting between them
//! 5. Log the totals

mod episode;
mod error;
mod policy;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use survivalbox_core::{Simulation, SimulationConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::episode::run_episode;
use crate::error::EngineError;
use crate::policy::RandomPolicy;

/// Default configuration file, relative to the working directory.
const CONFIG_FILE: &str = "survivalbox-config.yaml";

fn main() -> anyhow::Result<()> {
    // 1. Load configuration.
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from);
    let config = load_config(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    // 2. Initialize structured logging; RUST_LOG wins over the file.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();
    info!(
        width = config.world.width,
        height = config.world.height,
        seed = config.world.seed,
        agents = config.agents.count,
        sheep = config.npcs.sheep,
        wolves = config.npcs.wolves,
        fires = config.npcs.fires,
        "Configuration loaded"
    );

    // 3. Build the simulation.
    let episodes = config.engine.episodes;
    let max_ticks = config.engine.max_ticks;
    let policy_seed = config.world.seed.wrapping_add(1);
    let mut simulation = Simulation::new(config).map_err(EngineError::from)?;
    let mut policy = RandomPolicy::new(policy_seed);
    let stats = simulation.terrain_stats();
    info!(
        water = stats.water,
        dirt = stats.dirt,
        grass = stats.grass,
        border = simulation.clipping_border(),
        "Simulation ready"
    );

    // 4. Run the episodes.
    let mut summaries = Vec::new();
    for episode in 0..episodes {
        if episode > 0 {
            simulation.reset(false).map_err(EngineError::from)?;
        }
        summaries.push(run_episode(&mut simulation, &mut policy, episode, max_ticks)?);
    }

    // 5. Log the totals.
    let total_ticks: u64 = summaries.iter().map(|s| s.ticks).sum();
    let wipeouts = summaries.iter().filter(|s| s.all_dead).count();
    let best = summaries
        .iter()
        .flat_map(|s| s.scores.iter().copied())
        .fold(f64::NEG_INFINITY, f64::max);
    info!(
        episodes,
        total_ticks,
        wipeouts,
        best_score = best,
        sheep_caught = summaries.iter().map(|s| s.sheep_caught).sum::<u64>(),
        wolves_caught = summaries.iter().map(|s| s.wolves_caught).sum::<u64>(),
        "survivalbox-engine finished"
    );
    Ok(())
}

/// Load the configuration file, falling back to defaults when it is absent.
fn load_config(path: &Path) -> Result<SimulationConfig, EngineError> {
    if path.exists() {
        Ok(SimulationConfig::from_file(path)?)
    } else {
        Ok(SimulationConfig::default())
    }
}
