//! Terrain classification.
//!
//! A height field becomes a tile grid in one pass: the outer ring is
//! always [`TileType::Border`]; interior heights at or below the water
//! percentage are water, heights above [`DIRT_THRESHOLD`] are dirt, and
//! everything in between is grass.

use serde::{Deserialize, Serialize};
use survivalbox_types::{GridCell, TileType};
use tracing::info;

use crate::error::WorldError;
use crate::noise::HeightField;
use crate::tile_map::RawMap;

/// Heights strictly above this are dirt.
pub const DIRT_THRESHOLD: f64 = 0.7;

/// Interior terrain counts of a generated map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainStats {
    /// Interior water cells.
    pub water: u64,
    /// Interior land cells (anything that is neither water nor border).
    pub land: u64,
    /// Interior dirt cells.
    pub dirt: u64,
    /// Interior grass cells.
    pub grass: u64,
    /// `land + water`.
    pub total: u64,
    /// Interior cell count `(width - 2) * (height - 2)`.
    pub check: u64,
}

impl TerrainStats {
    /// Count the interior of a raw map.
    pub fn count(raw: &RawMap) -> Self {
        let mut stats = Self::default();
        for (cell, tile_type) in raw.iter() {
            if raw.is_edge(cell) {
                continue;
            }
            match tile_type {
                TileType::Border => {}
                TileType::Water => stats.water = stats.water.saturating_add(1),
                TileType::Dirt => {
                    stats.dirt = stats.dirt.saturating_add(1);
                    stats.land = stats.land.saturating_add(1);
                }
                TileType::Grass => {
                    stats.grass = stats.grass.saturating_add(1);
                    stats.land = stats.land.saturating_add(1);
                }
                TileType::Mud | TileType::GrowingGrass | TileType::GrowingTrees => {
                    stats.land = stats.land.saturating_add(1);
                }
            }
        }
        stats.total = stats.land.saturating_add(stats.water);
        stats.check = u64::from(raw.width().saturating_sub(2))
            .saturating_mul(u64::from(raw.height().saturating_sub(2)));
        stats
    }

    /// Fail unless every interior cell was classified as land or water.
    pub const fn verify(&self) -> Result<(), WorldError> {
        if self.total == self.check {
            Ok(())
        } else {
            Err(WorldError::TerrainCheckMismatch {
                total: self.total,
                check: self.check,
            })
        }
    }
}

/// Classify a single interior height.
pub fn classify_height(height: f64, water_percentage: f64) -> TileType {
    if height <= water_percentage {
        TileType::Water
    } else if height > DIRT_THRESHOLD {
        TileType::Dirt
    } else {
        TileType::Grass
    }
}

/// Turn a height field into a tile grid and its verified statistics.
pub fn classify(
    field: &HeightField,
    water_percentage: f64,
) -> Result<(RawMap, TerrainStats), WorldError> {
    let (width, height) = (field.width(), field.height());
    if width < 3 || height < 3 {
        return Err(WorldError::InvalidDimensions { width, height });
    }

    let mut raw = RawMap::filled(width, height, TileType::Border);
    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let value = field.get(x, y).unwrap_or(0.0);
            let cell = GridCell::new(
                i32::try_from(x).unwrap_or(i32::MAX),
                i32::try_from(y).unwrap_or(i32::MAX),
            );
            raw.set(cell, classify_height(value, water_percentage));
        }
    }

    let stats = TerrainStats::count(&raw);
    stats.verify()?;
    info!(
        width,
        height,
        water = stats.water,
        land = stats.land,
        dirt = stats.dirt,
        grass = stats.grass,
        total = stats.total,
        check = stats.check,
        "terrain classified"
    );
    Ok((raw, stats))
}
