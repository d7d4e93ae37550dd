//! Grid bodies: anchor, footprint and one step of undo.

use serde::{Deserialize, Serialize};
use survivalbox_types::{GridCell, GridPosition, Orientation, PixelRect};

/// Footprint of an entity facing up, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    /// Cells across.
    pub width: i32,
    /// Cells along.
    pub height: i32,
}

impl Footprint {
    /// Create a footprint.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// The longer side, used as the spawn square.
    pub const fn max_side(self) -> i32 {
        if self.width > self.height {
            self.width
        } else {
            self.height
        }
    }
}

/// The physical presence of an entity on the grid.
///
/// `cells` is always the footprint of `position`; `move_by` keeps the
/// previous pose so a colliding move can be rolled back with `set_back`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    footprint: Footprint,
    position: GridPosition,
    previous_position: GridPosition,
    cells: Vec<GridCell>,
    previous_cells: Vec<GridCell>,
}

impl Body {
    /// Create a body at `position`.
    pub fn new(footprint: Footprint, position: GridPosition) -> Self {
        let cells = position.footprint(footprint.width, footprint.height);
        Self {
            footprint,
            position,
            previous_position: position,
            previous_cells: cells.clone(),
            cells,
        }
    }

    /// Current anchor and facing.
    pub const fn position(&self) -> GridPosition {
        self.position
    }

    /// Anchor cell.
    pub const fn anchor(&self) -> GridCell {
        self.position.cell()
    }

    /// Pose before the last move.
    pub const fn previous_position(&self) -> GridPosition {
        self.previous_position
    }

    /// Current facing.
    pub const fn orientation(&self) -> Orientation {
        self.position.orientation
    }

    /// Footprint dimensions.
    pub const fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// Cells currently covered.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Cells covered before the last move.
    pub fn previous_cells(&self) -> &[GridCell] {
        &self.previous_cells
    }

    /// Whether the body covers `cell`.
    pub fn covers(&self, cell: GridCell) -> bool {
        self.cells.contains(&cell)
    }

    /// Apply a movement delta, remembering the current pose.
    pub fn move_by(&mut self, delta: [i32; 3]) {
        self.previous_position = self.position;
        self.previous_cells.clone_from(&self.cells);
        self.position = self.position.offset(delta);
        self.cells = self
            .position
            .footprint(self.footprint.width, self.footprint.height);
    }

    /// Undo the last move.
    pub fn set_back(&mut self) {
        self.position = self.previous_position;
        self.cells.clone_from(&self.previous_cells);
    }

    /// Teleport to `position`, forgetting the previous pose.
    pub fn place(&mut self, position: GridPosition) {
        *self = Self::new(self.footprint, position);
    }

    /// Previous cells no longer covered.
    pub fn vacated_cells(&self) -> Vec<GridCell> {
        self.previous_cells
            .iter()
            .filter(|c| !self.cells.contains(c))
            .copied()
            .collect()
    }
}

/// The cell directly in front of an entity, as a pixel rectangle.
///
/// Renderers draw facing markers into it.
pub const fn marker_rect(
    position: GridPosition,
    footprint: Footprint,
    tile_size: i32,
    offset: i32,
) -> PixelRect {
    let (x, y) = match position.orientation {
        Orientation::Up => (position.x, position.y.saturating_sub(1)),
        Orientation::Down => (position.x, position.y.saturating_add(footprint.height)),
        Orientation::Left => (position.x.saturating_sub(1), position.y),
        Orientation::Right => (position.x.saturating_add(footprint.height), position.y),
    };
    PixelRect::new(
        x.saturating_mul(tile_size).saturating_add(offset),
        y.saturating_mul(tile_size).saturating_add(offset),
        tile_size,
        tile_size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEEP: Footprint = Footprint::new(1, 2);

    #[test]
    fn move_and_set_back() {
        let mut body = Body::new(SHEEP, GridPosition::new(4, 4, Orientation::Up));
        body.move_by([0, -1, 0]);
        assert_eq!(body.cells(), &[GridCell::new(4, 3), GridCell::new(4, 4)]);
        assert_eq!(body.vacated_cells(), vec![GridCell::new(4, 5)]);

        body.set_back();
        assert_eq!(body.position(), GridPosition::new(4, 4, Orientation::Up));
        assert_eq!(body.cells(), &[GridCell::new(4, 4), GridCell::new(4, 5)]);
        assert!(body.vacated_cells().is_empty());
    }

    #[test]
    fn turning_swaps_footprint() {
        let mut body = Body::new(SHEEP, GridPosition::new(4, 4, Orientation::Up));
        body.move_by([0, 0, 1]);
        assert_eq!(body.orientation(), Orientation::Right);
        assert!(body.covers(GridCell::new(5, 4)));
        assert!(!body.covers(GridCell::new(4, 5)));
    }

    #[test]
    fn place_forgets_history() {
        let mut body = Body::new(SHEEP, GridPosition::new(4, 4, Orientation::Up));
        body.move_by([0, 1, 0]);
        body.place(GridPosition::new(9, 9, Orientation::Up));
        assert_eq!(body.previous_position(), body.position());
        assert_eq!(body.previous_cells(), body.cells());
    }

    #[test]
    fn marker_sits_in_front() {
        let up = marker_rect(GridPosition::new(3, 3, Orientation::Up), SHEEP, 8, 0);
        assert_eq!(up, PixelRect::new(24, 16, 8, 8));
        let down = marker_rect(GridPosition::new(3, 3, Orientation::Down), SHEEP, 8, 0);
        assert_eq!(down, PixelRect::new(24, 40, 8, 8));
        let right = marker_rect(GridPosition::new(3, 3, Orientation::Right), SHEEP, 8, 0);
        assert_eq!(right, PixelRect::new(40, 24, 8, 8));
        let left = marker_rect(GridPosition::new(3, 3, Orientation::Left), SHEEP, 8, 4);
        assert_eq!(left, PixelRect::new(20, 28, 8, 8));
    }

    #[test]
    fn max_side() {
        assert_eq!(SHEEP.max_side(), 2);
        assert_eq!(Footprint::new(4, 4).max_side(), 4);
    }
}
