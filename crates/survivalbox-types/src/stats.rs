//! Per-kind statistics records.
//!
//! These are read by HUD layers and exported alongside episode summaries.
//! Counters are plain `u64`; energy and reward figures are `f64` because
//! the energy model works in quarter points.

use serde::{Deserialize, Serialize};

/// Survivor movement and collision counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurvivorBasics {
    /// Ticks survived.
    pub steps_alive: u64,
    /// Ticks that ended with a footprint cell on water.
    pub steps_water: u64,
    /// Ticks that ended with a footprint cell on land.
    pub steps_land: u64,
    /// Rolled-back moves.
    pub collisions: u64,
}

/// Survivor role counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurvivorSpecialisation {
    /// Ticks spent as the guard of a lit fire.
    pub steps_as_fireguard: u64,
    /// Ticks spent as the shepherd of a sheep.
    pub steps_as_shepherd: u64,
    /// Sheep moves this survivor blocked.
    pub blocked_sheep: u64,
    /// Wolf attacks taken.
    pub hits_from_wolf: u64,
    /// Wolves caught.
    pub caught_wolf: u64,
    /// Energy redistributed to the team from caught wolves.
    pub energy_from_wolf: f64,
    /// Grass tiles eaten.
    pub collected_food: u64,
}

/// Survivor reward breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurvivorRewards {
    /// Reward earned guarding fires.
    pub reward_from_fire: f64,
    /// Reward earned shepherding sheep.
    pub reward_from_sheep: f64,
    /// Reward earned catching wolves.
    pub reward_from_wolf: f64,
    /// Reward earned eating grass.
    pub reward_from_food: f64,
    /// Mirror of the survivor's cumulative score.
    pub reward_total: f64,
}

/// Full statistics record of a survivor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurvivorStats {
    /// Movement and collision counters.
    pub basics: SurvivorBasics,
    /// Role counters.
    pub specialisation: SurvivorSpecialisation,
    /// Reward breakdown.
    pub rewards: SurvivorRewards,
}

/// Statistics record of a sheep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheepStats {
    /// Ticks on which the sheep was allowed to pick a move.
    pub steps_total: u64,
    /// Ticks spent at slow pace.
    pub steps_slow: u64,
    /// Ticks spent at fast pace.
    pub steps_fast: u64,
    /// Rolled-back moves.
    pub collisions: u64,
    /// Grass tiles eaten.
    pub collected_food: u64,
    /// Times caught by a wolf.
    pub caught_by_wolf: u64,
    /// Ticks that ended with a shepherd.
    pub steps_with_shepherd: u64,
    /// Ticks that ended without a shepherd.
    pub steps_without_shepherd: u64,
    /// Times a new shepherd claimed the sheep.
    pub shepherd_switches: u64,
}

/// Statistics record of a wolf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WolfStats {
    /// Ticks on which the wolf was allowed to pick a move.
    pub steps_total: u64,
    /// Ticks spent at slow pace.
    pub steps_slow: u64,
    /// Ticks spent at fast pace.
    pub steps_fast: u64,
    /// Rolled-back moves.
    pub collisions: u64,
    /// Moves chosen by the pursuit heuristic.
    pub steps_hunting: u64,
    /// Sheep caught.
    pub caught_sheep: u64,
    /// Times caught by a survivor.
    pub caught_by_survivor: u64,
    /// Attacks landed on survivors.
    pub attacked_survivor: u64,
}

/// Statistics record of a fireplace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireStats {
    /// Ticks the fire burned.
    pub steps_fire_on: u64,
    /// Ticks the fire was out.
    pub steps_fire_off: u64,
    /// Times the fire changed between lit and out.
    pub fire_switches: u64,
}

/// Statistics of any entity, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityStats {
    /// Survivor record.
    Survivor(SurvivorStats),
    /// Sheep record.
    Sheep(SheepStats),
    /// Wolf record.
    Wolf(WolfStats),
    /// Fireplace record.
    Fireplace(FireStats),
}
