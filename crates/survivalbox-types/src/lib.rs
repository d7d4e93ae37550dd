//! Shared type definitions for the SurvivalBox simulation.
//!
//! This crate is the single source of truth for the vocabulary used across
//! the workspace: identifiers, grid geometry, terrain and action enums, and
//! statistics records.
//!
//! # Modules
//!
//! - [`ids`] -- Typed identifiers for agents and entities
//! - [`enums`] -- Orientation, terrain, action and entity-kind enums
//! - [`geometry`] -- Grid cells, oriented positions, pixel rectangles
//! - [`stats`] -- Per-kind statistics records

pub mod enums;
pub mod geometry;
pub mod ids;
pub mod stats;

// Re-export all public types at crate root for convenience.
pub use enums::{AgentAction, EntityKind, NpcAction, Orientation, TileType};
pub use geometry::{GridCell, GridPosition, PixelRect};
pub use ids::{AgentId, EntityId};
pub use stats::{
    EntityStats, FireStats, SheepStats, SurvivorBasics, SurvivorRewards, SurvivorSpecialisation,
    SurvivorStats, WolfStats,
};
