//! Dense tile grids.
//!
//! [`RawMap`] is the plain tile-type grid a map is generated as and
//! serialized as. [`TileMap`] wraps it with per-tile food state and is
//! what the simulation mutates.

use serde::{Deserialize, Serialize};
use survivalbox_types::{GridCell, TileType};

use crate::tile::Tile;

/// Row-major index of `cell` in a `width x height` grid.
fn cell_index(width: u32, height: u32, cell: GridCell) -> Option<usize> {
    let x = u32::try_from(cell.x).ok()?;
    let y = u32::try_from(cell.y).ok()?;
    if x >= width || y >= height {
        return None;
    }
    Some(
        (y as usize)
            .saturating_mul(width as usize)
            .saturating_add(x as usize),
    )
}

/// Cells of a `width x height` grid in row-major order.
fn grid_cells(width: u32, height: u32) -> impl Iterator<Item = GridCell> {
    let w = i32::try_from(width).unwrap_or(i32::MAX);
    let h = i32::try_from(height).unwrap_or(i32::MAX);
    (0..h).flat_map(move |y| (0..w).map(move |x| GridCell::new(x, y)))
}

// ---------------------------------------------------------------------------
// RawMap
// ---------------------------------------------------------------------------

/// A plain grid of tile types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMap {
    width: u32,
    height: u32,
    cells: Vec<TileType>,
}

impl RawMap {
    /// A grid filled with one tile type.
    pub fn filled(width: u32, height: u32, tile_type: TileType) -> Self {
        Self {
            width,
            height,
            cells: vec![tile_type; (width as usize).saturating_mul(height as usize)],
        }
    }

    /// Width in cells.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Tile type at `cell`, or `None` outside the grid.
    pub fn get(&self, cell: GridCell) -> Option<TileType> {
        cell_index(self.width, self.height, cell).and_then(|i| self.cells.get(i).copied())
    }

    /// Overwrite the tile type at `cell`. Returns `false` outside the grid.
    pub fn set(&mut self, cell: GridCell, tile_type: TileType) -> bool {
        match cell_index(self.width, self.height, cell).and_then(|i| self.cells.get_mut(i)) {
            Some(slot) => {
                *slot = tile_type;
                true
            }
            None => false,
        }
    }

    /// Whether `cell` is on the outer ring of the grid.
    pub fn is_edge(&self, cell: GridCell) -> bool {
        let max_x = i32::try_from(self.width).unwrap_or(i32::MAX).saturating_sub(1);
        let max_y = i32::try_from(self.height).unwrap_or(i32::MAX).saturating_sub(1);
        cell.x == 0 || cell.y == 0 || cell.x == max_x || cell.y == max_y
    }

    /// Iterate `(cell, type)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCell, TileType)> + '_ {
        grid_cells(self.width, self.height).zip(self.cells.iter().copied())
    }

    /// Numeric codes, one row per `y`.
    pub fn codes(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width.max(1) as usize)
            .map(|row| row.iter().map(|t| t.code()).collect())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// TileMap
// ---------------------------------------------------------------------------

/// The live tile grid of a simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Instantiate tiles for every cell of a raw map.
    pub fn from_raw(raw: &RawMap) -> Self {
        let tiles = raw.iter().map(|(cell, t)| Tile::new(cell, t)).collect();
        Self {
            width: raw.width(),
            height: raw.height(),
            tiles,
        }
    }

    /// Width in cells.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Whether `cell` lies on the map.
    pub fn contains(&self, cell: GridCell) -> bool {
        cell_index(self.width, self.height, cell).is_some()
    }

    /// The tile at `cell`.
    pub fn tile(&self, cell: GridCell) -> Option<&Tile> {
        cell_index(self.width, self.height, cell).and_then(|i| self.tiles.get(i))
    }

    /// The tile at `cell`, mutably.
    pub fn tile_mut(&mut self, cell: GridCell) -> Option<&mut Tile> {
        cell_index(self.width, self.height, cell).and_then(|i| self.tiles.get_mut(i))
    }

    /// Current type at `cell`. Cells off the map read as [`TileType::Border`].
    pub fn tile_type(&self, cell: GridCell) -> TileType {
        self.tile(cell).map_or(TileType::Border, Tile::tile_type)
    }

    /// Take a bite from the tile at `cell`; `true` when grass was eaten up.
    pub fn bite(&mut self, cell: GridCell) -> bool {
        self.tile_mut(cell).is_some_and(Tile::update)
    }

    /// Restore every tile to its generated type and food value.
    pub fn reset(&mut self) {
        for tile in &mut self.tiles {
            tile.reset();
        }
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Snapshot of the current tile types.
    pub fn current_types(&self) -> RawMap {
        RawMap {
            width: self.width,
            height: self.height,
            cells: self.tiles.iter().map(Tile::tile_type).collect(),
        }
    }

    /// Number of tiles currently of `tile_type`.
    pub fn count(&self, tile_type: TileType) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.tile_type() == tile_type)
            .count()
    }
}
