//! Map snapshots.
//!
//! A [`MapSnapshot`] is everything needed to rebuild a map without drawing
//! new noise: the height field, the generated tile grid, the current tile
//! grid, the resource names of every code, the terrain statistics and the
//! map metadata. It round-trips through JSON.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use survivalbox_types::TileType;
use tracing::info;

use crate::error::WorldError;
use crate::noise::{self, HeightField};
use crate::terrain::{self, TerrainStats};
use crate::tile_map::{RawMap, TileMap};

/// Parameters of a freshly generated map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapMeta {
    /// Width in cells.
    pub width: u32,
    /// Height in cells.
    pub height: u32,
    /// Heights at or below this fraction are water.
    pub water_percentage: f64,
    /// Edge length of a tile in pixels.
    pub tile_size: u32,
}

/// A serializable, self-verifying map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    /// Map parameters.
    pub meta: MapMeta,
    /// Noise the map was classified from.
    pub height_field: HeightField,
    /// Tile grid as generated.
    pub raw_map: RawMap,
    /// Tile grid at the time of the snapshot.
    pub tile_types: RawMap,
    /// Resource name of every tile code.
    pub resource_names: BTreeMap<u8, String>,
    /// Terrain statistics of the generated grid.
    pub stats: TerrainStats,
}

impl MapSnapshot {
    /// Generate a new map from noise.
    pub fn generate<R: Rng + ?Sized>(
        meta: MapMeta,
        octaves: u32,
        rng: &mut R,
    ) -> Result<Self, WorldError> {
        if meta.width < 3 || meta.height < 3 {
            return Err(WorldError::InvalidDimensions {
                width: meta.width,
                height: meta.height,
            });
        }
        let height_field = noise::calculate(meta.width, meta.height, octaves, rng);
        let (raw_map, stats) = terrain::classify(&height_field, meta.water_percentage)?;
        info!(
            width = meta.width,
            height = meta.height,
            water_percentage = meta.water_percentage,
            octaves,
            "map generated"
        );
        Ok(Self {
            meta,
            height_field,
            tile_types: raw_map.clone(),
            raw_map,
            resource_names: resource_names(),
            stats,
        })
    }

    /// Wrap a hand-built tile grid.
    ///
    /// The height field is flat, so regenerating from this snapshot is not
    /// possible; restoring it is. The grid must carry a full border ring.
    pub fn from_raw_map(
        raw_map: RawMap,
        water_percentage: f64,
        tile_size: u32,
    ) -> Result<Self, WorldError> {
        let (width, height) = (raw_map.width(), raw_map.height());
        if width < 3 || height < 3 {
            return Err(WorldError::InvalidDimensions { width, height });
        }
        let stats = TerrainStats::count(&raw_map);
        stats.verify()?;
        let snapshot = Self {
            meta: MapMeta {
                width,
                height,
                water_percentage,
                tile_size,
            },
            height_field: HeightField::flat(width, height),
            tile_types: raw_map.clone(),
            raw_map,
            resource_names: resource_names(),
            stats,
        };
        snapshot.restore()?;
        Ok(snapshot)
    }

    /// Record the current tile types of a live map.
    pub fn capture(&mut self, tiles: &TileMap) {
        self.tile_types = tiles.current_types();
    }

    /// Rebuild the live tile map after checking the snapshot is consistent.
    ///
    /// Tiles come back with the generated types and food values, so a
    /// restored map always starts a fresh episode.
    ///
    /// `raw_map` is authoritative. The height field only has to match the
    /// map dimensions; its values are not re-classified, since hand-built
    /// maps carry a flat field that does not describe their tiles.
    pub fn restore(&self) -> Result<TileMap, WorldError> {
        let (width, height) = (self.meta.width, self.meta.height);
        for (name, grid) in [("raw_map", &self.raw_map), ("tile_types", &self.tile_types)] {
            if grid.width() != width || grid.height() != height {
                return Err(WorldError::SnapshotMismatch {
                    reason: format!(
                        "{name} is {}x{}, metadata says {width}x{height}",
                        grid.width(),
                        grid.height()
                    ),
                });
            }
        }
        if self.height_field.width() != width || self.height_field.height() != height {
            return Err(WorldError::SnapshotMismatch {
                reason: format!(
                    "height field is {}x{}, metadata says {width}x{height}",
                    self.height_field.width(),
                    self.height_field.height()
                ),
            });
        }

        let recount = TerrainStats::count(&self.raw_map);
        recount.verify()?;
        if recount != self.stats {
            return Err(WorldError::SnapshotMismatch {
                reason: format!("stored stats {:?} differ from recount {recount:?}", self.stats),
            });
        }

        for (cell, tile_type) in self.raw_map.iter() {
            if self.raw_map.is_edge(cell) != tile_type.is_border() {
                return Err(WorldError::SnapshotMismatch {
                    reason: format!("border ring broken at ({}, {})", cell.x, cell.y),
                });
            }
        }

        Ok(TileMap::from_raw(&self.raw_map))
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, WorldError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self, WorldError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Resource names keyed by tile code.
pub fn resource_names() -> BTreeMap<u8, String> {
    TileType::ALL
        .iter()
        .map(|t| (t.code(), t.resource_name().to_owned()))
        .collect()
}
