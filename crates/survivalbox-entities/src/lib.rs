//! Entity model for the SurvivalBox simulation.
//!
//! An entity is a grid [`Body`] (anchor, orientation, footprint, one step
//! of undo) plus kind-specific state. This crate also owns the static
//! game rules the entities move by: orientation-indexed movement tables,
//! view rectangles, NPC action selection and the tuning constants.
//!
//! # Modules
//!
//! - [`body`] -- Footprints, movement with rollback, facing markers.
//! - [`movement`] -- Orientation-indexed movement delta tables.
//! - [`viewport`] -- Orientation-aware view rectangles.
//! - [`behavior`] -- Movement cadence, wander rolls and greedy pursuit.
//! - [`entity`] -- [`Entity`] and the per-kind [`Role`] payloads.
//! - [`rules`] -- Energy, damage, speed and footprint constants.

pub mod behavior;
pub mod body;
pub mod entity;
pub mod movement;
pub mod rules;
pub mod viewport;

// Re-export primary types at crate root.
pub use behavior::{Pace, select_hunt_move, select_recovery_move, select_wander_move};
pub use body::{Body, Footprint, marker_rect};
pub use entity::{Entity, Fireplace, Role, Sheep, Survivor, Wolf};
pub use movement::{agent_delta, npc_delta};
pub use viewport::ViewPort;
