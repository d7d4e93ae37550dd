//! Episode execution and summaries.

use survivalbox_core::Simulation;
use survivalbox_types::{EntityStats, WolfStats};
use tracing::{debug, info};

use crate::error::EngineError;
use crate::policy::RandomPolicy;

/// Outcome of one episode.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary {
    /// Ticks run.
    pub ticks: u64,
    /// Final score of every agent.
    pub scores: Vec<f64>,
    /// Whether every survivor died before the tick limit.
    pub all_dead: bool,
    /// Sheep caught by wolves.
    pub sheep_caught: u64,
    /// Wolves caught by survivors.
    pub wolves_caught: u64,
}

/// Run one episode of at most `max_ticks` ticks from the current state.
pub fn run_episode(
    simulation: &mut Simulation,
    policy: &mut RandomPolicy,
    episode: u32,
    max_ticks: u64,
) -> Result<EpisodeSummary, EngineError> {
    let agents = simulation.scores().len();
    let mut all_dead = simulation.is_over();
    while !all_dead && simulation.ticks() < max_ticks {
        let actions = policy.actions(simulation.available_actions(), agents)?;
        let outcome = simulation.step(&actions)?;
        all_dead = outcome.terminal;
    }

    let wolves: Vec<WolfStats> = simulation
        .entity_stats()
        .into_iter()
        .filter_map(|(_, stats)| match stats {
            EntityStats::Wolf(w) => Some(w),
            _ => None,
        })
        .collect();
    for (id, stats) in simulation.entity_stats() {
        debug!(episode, entity = %id, stats = ?stats, "entity statistics");
    }

    let summary = EpisodeSummary {
        ticks: simulation.ticks(),
        scores: simulation.scores(),
        all_dead,
        sheep_caught: wolves.iter().map(|w| w.caught_sheep).sum(),
        wolves_caught: wolves.iter().map(|w| w.caught_by_survivor).sum(),
    };
    info!(
        episode,
        ticks = summary.ticks,
        scores = ?summary.scores,
        all_dead,
        sheep_caught = summary.sheep_caught,
        wolves_caught = summary.wolves_caught,
        "episode finished"
    );
    Ok(summary)
}
