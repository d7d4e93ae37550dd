//! Tile lifecycle: food depletion and reset.

use serde::{Deserialize, Serialize};
use survivalbox_types::{GridCell, PixelRect, TileType};

/// Food value a fresh grass tile holds.
pub const GRASS_FOOD_VALUE: u32 = 100;

/// Food removed from a tile each time something stands on it.
pub const FOOD_BITE: u32 = 100;

/// A single map tile with its mutable food state.
///
/// The type and food value the tile was generated with are kept so that an
/// episode reset can restore them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    cell: GridCell,
    tile_type: TileType,
    food_value: u32,
    original_type: TileType,
    original_food: u32,
}

impl Tile {
    /// Create a tile; grass starts with [`GRASS_FOOD_VALUE`], everything
    /// else with no food.
    pub const fn new(cell: GridCell, tile_type: TileType) -> Self {
        let food_value = initial_food(tile_type);
        Self {
            cell,
            tile_type,
            food_value,
            original_type: tile_type,
            original_food: food_value,
        }
    }

    /// Grid cell of the tile.
    pub const fn cell(&self) -> GridCell {
        self.cell
    }

    /// Current type.
    pub const fn tile_type(&self) -> TileType {
        self.tile_type
    }

    /// Remaining food.
    pub const fn food_value(&self) -> u32 {
        self.food_value
    }

    /// Type the tile had when the map was generated.
    pub const fn original_type(&self) -> TileType {
        self.original_type
    }

    /// Take one bite from the tile.
    ///
    /// Returns `true` exactly when this bite exhausted a grass tile, which
    /// turns it into mud. The caller credits whoever stood on it.
    pub const fn update(&mut self) -> bool {
        self.food_value = self.food_value.saturating_sub(FOOD_BITE);
        if self.food_value == 0 && matches!(self.tile_type, TileType::Grass) {
            self.tile_type = TileType::Mud;
            return true;
        }
        false
    }

    /// Restore the generated type and food value.
    pub const fn reset(&mut self) {
        self.tile_type = self.original_type;
        self.food_value = self.original_food;
    }

    /// Pixel rectangle of the tile for a given tile size and border offset.
    pub fn pixel_rect(&self, tile_size: u32, offset: i32) -> PixelRect {
        let size = clamp_i32(tile_size);
        PixelRect::new(
            self.cell.x.saturating_mul(size).saturating_add(offset),
            self.cell.y.saturating_mul(size).saturating_add(offset),
            size,
            size,
        )
    }
}

const fn initial_food(tile_type: TileType) -> u32 {
    match tile_type {
        TileType::Grass => GRASS_FOOD_VALUE,
        _ => 0,
    }
}

/// Convert a `u32` to `i32`, saturating at `i32::MAX`.
pub fn clamp_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grass_turns_to_mud_after_one_bite() {
        let mut tile = Tile::new(GridCell::new(1, 1), TileType::Grass);
        assert_eq!(tile.food_value(), GRASS_FOOD_VALUE);
        assert!(tile.update());
        assert_eq!(tile.tile_type(), TileType::Mud);
        assert_eq!(tile.food_value(), 0);
        // Mud never credits again.
        assert!(!tile.update());
        assert_eq!(tile.tile_type(), TileType::Mud);
    }

    #[test]
    fn barren_tiles_never_credit() {
        for tile_type in [TileType::Water, TileType::Dirt, TileType::Border] {
            let mut tile = Tile::new(GridCell::new(0, 0), tile_type);
            assert!(!tile.update());
            assert_eq!(tile.tile_type(), tile_type);
        }
    }

    #[test]
    fn reset_restores_type_and_food() {
        let mut tile = Tile::new(GridCell::new(2, 3), TileType::Grass);
        assert!(tile.update());
        tile.reset();
        assert_eq!(tile.tile_type(), TileType::Grass);
        assert_eq!(tile.food_value(), GRASS_FOOD_VALUE);
        assert!(tile.update());
    }

    #[test]
    fn pixel_rect_applies_offset() {
        let tile = Tile::new(GridCell::new(2, 3), TileType::Dirt);
        assert_eq!(tile.pixel_rect(8, 72), PixelRect::new(88, 96, 8, 8));
    }
}
