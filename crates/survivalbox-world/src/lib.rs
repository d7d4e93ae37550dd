//! Terrain, tiles and spawn placement for the SurvivalBox simulation.
//!
//! This crate owns the static side of the world: a multi-octave noise
//! field is classified into a bordered tile grid, tiles carry food that
//! survivors and sheep eat, and entities are spawned on free ground.
//!
//! # Modules
//!
//! - [`noise`] -- Multi-octave value noise normalized to `[0, 1]`.
//! - [`terrain`] -- Height classification and terrain statistics.
//! - [`tile`] -- Per-tile food depletion and reset.
//! - [`tile_map`] -- Raw tile-type grids and the live [`TileMap`].
//! - [`placement`] -- Bounded random search for free spawn positions.
//! - [`snapshot`] -- JSON-serializable map snapshots.
//! - [`error`] -- Error types for world operations.

pub mod error;
pub mod noise;
pub mod placement;
pub mod snapshot;
pub mod terrain;
pub mod tile;
pub mod tile_map;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use noise::HeightField;
pub use placement::{MAX_PLACEMENT_ATTEMPTS, free_random_position};
pub use snapshot::{MapMeta, MapSnapshot};
pub use terrain::TerrainStats;
pub use tile::{FOOD_BITE, GRASS_FOOD_VALUE, Tile, clamp_i32};
pub use tile_map::{RawMap, TileMap};
