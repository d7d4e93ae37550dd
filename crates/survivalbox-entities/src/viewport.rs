//! Orientation-aware view rectangles.

use serde::{Deserialize, Serialize};
use survivalbox_types::{GridPosition, Orientation, PixelRect};

/// How many cells an entity sees to each side of its footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewPort {
    /// Cells to the left.
    pub left: i32,
    /// Cells to the right.
    pub right: i32,
    /// Cells in front.
    pub front: i32,
    /// Cells behind.
    pub back: i32,
}

/// Area in which a sheep registers a shepherd.
pub const SHEEP_VIEWPORT: ViewPort = ViewPort::new(5, 5, 5, 4);
/// Area in which a wolf spots sheep.
pub const WOLF_VIEWPORT: ViewPort = ViewPort::new(8, 8, 8, 8);
/// Area in which a fireplace registers a guard.
pub const FIRE_VIEWPORT: ViewPort = ViewPort::new(3, 3, 3, 3);

impl ViewPort {
    /// Create a viewport from its four extents.
    pub const fn new(left: i32, right: i32, front: i32, back: i32) -> Self {
        Self {
            left,
            right,
            front,
            back,
        }
    }

    /// Largest of the four extents.
    pub fn max_extent(&self) -> i32 {
        self.left.max(self.right).max(self.front).max(self.back)
    }

    /// Unrotated `(width, height)` in cells for a 1x1 footprint.
    pub const fn grid_dimensions(&self) -> (i32, i32) {
        (
            self.left.saturating_add(self.right).saturating_add(1),
            self.front.saturating_add(self.back).saturating_add(1),
        )
    }

    /// The view rectangle of an entity anchored at `position` with a
    /// `size_x x size_y` footprint, scaled by `tile_size` and shifted by
    /// `offset` pixels.
    pub const fn rect(
        &self,
        position: GridPosition,
        tile_size: i32,
        offset: i32,
        size_x: i32,
        size_y: i32,
    ) -> PixelRect {
        let across = self.left.saturating_add(self.right).saturating_add(size_x);
        let along = self.front.saturating_add(self.back).saturating_add(size_y);
        let (left_cells, top_cells, width_cells, height_cells) = match position.orientation {
            Orientation::Up => (
                position.x.saturating_sub(self.left),
                position.y.saturating_sub(self.front),
                across,
                along,
            ),
            Orientation::Down => (
                position.x.saturating_sub(self.left),
                position.y.saturating_sub(self.back),
                across,
                along,
            ),
            Orientation::Right => (
                position.x.saturating_sub(self.back),
                position.y.saturating_sub(self.left),
                along,
                across,
            ),
            Orientation::Left => (
                position.x.saturating_sub(self.front),
                position.y.saturating_sub(self.right),
                along,
                across,
            ),
        };
        PixelRect::new(
            left_cells.saturating_mul(tile_size).saturating_add(offset),
            top_cells.saturating_mul(tile_size).saturating_add(offset),
            width_cells.saturating_mul(tile_size),
            height_cells.saturating_mul(tile_size),
        )
    }

    /// The view rectangle in grid cells.
    pub const fn grid_rect(&self, position: GridPosition, size_x: i32, size_y: i32) -> PixelRect {
        self.rect(position, 1, 0, size_x, size_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survivalbox_types::GridCell;

    const AGENT_VIEW: ViewPort = ViewPort::new(5, 5, 10, 2);

    #[test]
    fn up_and_down_extend_front_and_back() {
        let up = AGENT_VIEW.grid_rect(GridPosition::new(20, 20, Orientation::Up), 1, 1);
        assert_eq!(up, PixelRect::new(15, 10, 11, 13));
        let down = AGENT_VIEW.grid_rect(GridPosition::new(20, 20, Orientation::Down), 1, 1);
        assert_eq!(down, PixelRect::new(15, 18, 11, 13));
    }

    #[test]
    fn sideways_swaps_dimensions() {
        let right = AGENT_VIEW.grid_rect(GridPosition::new(20, 20, Orientation::Right), 1, 1);
        assert_eq!(right, PixelRect::new(18, 15, 13, 11));
        let left = AGENT_VIEW.grid_rect(GridPosition::new(20, 20, Orientation::Left), 1, 1);
        assert_eq!(left, PixelRect::new(10, 15, 13, 11));
    }

    #[test]
    fn anchor_is_always_inside() {
        for orientation in Orientation::ALL {
            let pos = GridPosition::new(7, 9, orientation);
            let rect = AGENT_VIEW.grid_rect(pos, 1, 1);
            assert!(rect.contains_cell(pos.cell()), "{orientation:?}");
        }
    }

    #[test]
    fn scaled_rect_applies_tile_size_and_offset() {
        let rect = AGENT_VIEW.rect(GridPosition::new(20, 20, Orientation::Up), 8, 72, 1, 1);
        assert_eq!(rect, PixelRect::new(15 * 8 + 72, 10 * 8 + 72, 88, 104));
    }

    #[test]
    fn fire_area_covers_footprint_and_ring() {
        let rect = FIRE_VIEWPORT.grid_rect(GridPosition::new(10, 10, Orientation::Up), 4, 4);
        assert_eq!(rect, PixelRect::new(7, 7, 10, 10));
        assert!(rect.contains_cell(GridCell::new(16, 16)));
        assert!(!rect.contains_cell(GridCell::new(17, 16)));
    }

    #[test]
    fn extents() {
        assert_eq!(AGENT_VIEW.max_extent(), 10);
        assert_eq!(AGENT_VIEW.grid_dimensions(), (11, 13));
    }
}
