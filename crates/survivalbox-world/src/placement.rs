//! Random spawn placement.
//!
//! Candidates are drawn uniformly from `[1, size - min_space)` on each axis
//! and accepted when the `min_space x min_space` square anchored there
//! touches neither a forbidden tile, the border, nor an occupied cell.
//! Search is bounded by [`MAX_PLACEMENT_ATTEMPTS`].

use std::collections::BTreeSet;

use rand::Rng;
use survivalbox_types::{GridCell, GridPosition, Orientation, TileType};
use tracing::{debug, warn};

use crate::error::WorldError;
use crate::tile_map::TileMap;

/// Upper bound on candidates drawn per placement.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

/// Find a free, up-facing position for a square footprint.
///
/// `occupied` holds every cell currently covered by another entity.
pub fn free_random_position<R: Rng + ?Sized>(
    map: &TileMap,
    occupied: &BTreeSet<GridCell>,
    forbidden: &[TileType],
    min_space: u32,
    rng: &mut R,
) -> Result<GridPosition, WorldError> {
    let (width, height) = (map.width(), map.height());
    let max_x = i32::try_from(width.saturating_sub(min_space)).unwrap_or(i32::MAX);
    let max_y = i32::try_from(height.saturating_sub(min_space)).unwrap_or(i32::MAX);
    let side = i32::try_from(min_space).unwrap_or(i32::MAX);
    if max_x <= 1 || max_y <= 1 || side == i32::MAX {
        return Err(WorldError::MapTooSmall {
            width,
            height,
            min_space,
        });
    }

    for attempt in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = GridPosition::new(
            rng.random_range(1..max_x),
            rng.random_range(1..max_y),
            Orientation::Up,
        );
        let square = candidate.footprint(side, side);

        let blocked_terrain = square.iter().any(|&cell| {
            let tile_type = map.tile_type(cell);
            tile_type.is_border() || forbidden.contains(&tile_type)
        });
        if blocked_terrain {
            continue;
        }
        if square.iter().any(|cell| occupied.contains(cell)) {
            continue;
        }

        debug!(x = candidate.x, y = candidate.y, attempt, min_space, "placed footprint");
        return Ok(candidate);
    }

    warn!(
        width,
        height,
        min_space,
        attempts = MAX_PLACEMENT_ATTEMPTS,
        "placement search exhausted"
    );
    Err(WorldError::PlacementExhausted {
        attempts: MAX_PLACEMENT_ATTEMPTS,
        footprint: min_space,
        forbidden: forbidden.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile_map::RawMap;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn bordered(width: u32, height: u32, interior: TileType) -> TileMap {
        let mut raw = RawMap::filled(width, height, interior);
        let cells: Vec<GridCell> = raw.iter().map(|(c, _)| c).collect();
        for cell in cells {
            if raw.is_edge(cell) {
                raw.set(cell, TileType::Border);
            }
        }
        TileMap::from_raw(&raw)
    }

    #[test]
    fn placement_avoids_border_and_forbidden() {
        let mut raw = RawMap::filled(12, 12, TileType::Grass);
        let cells: Vec<GridCell> = raw.iter().map(|(c, _)| c).collect();
        for cell in cells {
            if raw.is_edge(cell) {
                raw.set(cell, TileType::Border);
            } else if cell.x < 6 {
                raw.set(cell, TileType::Water);
            }
        }
        let map = TileMap::from_raw(&raw);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let pos = free_random_position(&map, &BTreeSet::new(), &[TileType::Water], 2, &mut rng);
            assert!(pos.is_ok());
            let Some(pos) = pos.ok() else { return };
            assert_eq!(pos.orientation, Orientation::Up);
            for cell in pos.footprint(2, 2) {
                let t = map.tile_type(cell);
                assert_eq!(t, TileType::Grass);
            }
        }
    }

    #[test]
    fn placement_avoids_occupied_cells() {
        let map = bordered(6, 6, TileType::Grass);
        // Everything but (3, 3) is taken.
        let occupied: BTreeSet<GridCell> = (1..5)
            .flat_map(|y| (1..5).map(move |x| GridCell::new(x, y)))
            .filter(|c| *c != GridCell::new(3, 3))
            .collect();
        let mut rng = StdRng::seed_from_u64(9);
        let pos = free_random_position(&map, &occupied, &[], 1, &mut rng);
        assert_eq!(pos.ok().map(GridPosition::cell), Some(GridCell::new(3, 3)));
    }

    #[test]
    fn saturated_map_is_reported() {
        let map = bordered(6, 6, TileType::Grass);
        let occupied: BTreeSet<GridCell> = (0..6)
            .flat_map(|y| (0..6).map(move |x| GridCell::new(x, y)))
            .collect();
        let mut rng = StdRng::seed_from_u64(1);
        let result = free_random_position(&map, &occupied, &[], 1, &mut rng);
        assert!(matches!(
            result,
            Err(WorldError::PlacementExhausted {
                attempts: MAX_PLACEMENT_ATTEMPTS,
                footprint: 1,
                ..
            })
        ));
    }

    #[test]
    fn all_forbidden_terrain_is_reported() {
        let map = bordered(8, 8, TileType::Water);
        let mut rng = StdRng::seed_from_u64(2);
        let result = free_random_position(&map, &BTreeSet::new(), &[TileType::Water], 1, &mut rng);
        assert!(matches!(result, Err(WorldError::PlacementExhausted { .. })));
    }

    #[test]
    fn footprint_larger_than_map_is_rejected() {
        let map = bordered(5, 5, TileType::Grass);
        let mut rng = StdRng::seed_from_u64(2);
        let result = free_random_position(&map, &BTreeSet::new(), &[], 4, &mut rng);
        assert!(matches!(
            result,
            Err(WorldError::MapTooSmall { min_space: 4, .. })
        ));
    }
}
