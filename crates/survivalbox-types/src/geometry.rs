//! Grid and pixel geometry primitives.
//!
//! All simulation coordinates are integers. `x` grows to the right and `y`
//! grows downwards, so [`Orientation::Up`] moves towards row 0.

use serde::{Deserialize, Serialize};

use crate::enums::Orientation;

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridCell {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl GridCell {
    /// Create a cell from its column and row.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An entity anchor: a grid cell plus a facing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    /// Column of the anchor cell.
    pub x: i32,
    /// Row of the anchor cell.
    pub y: i32,
    /// Facing direction.
    pub orientation: Orientation,
}

impl GridPosition {
    /// Create a position.
    pub const fn new(x: i32, y: i32, orientation: Orientation) -> Self {
        Self { x, y, orientation }
    }

    /// The anchor cell, without orientation.
    pub const fn cell(self) -> GridCell {
        GridCell::new(self.x, self.y)
    }

    /// Apply a movement delta `(dx, dy, quarter_turns)`.
    ///
    /// The orientation component wraps modulo 4.
    pub const fn offset(self, delta: [i32; 3]) -> Self {
        let [dx, dy, turns] = delta;
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            orientation: self.orientation.rotated(turns),
        }
    }

    /// Cells covered by a `width` x `height` footprint anchored here.
    ///
    /// Vertical-facing positions cover `(x + w, y + h)`; horizontal-facing
    /// ones swap the axes and cover `(x + h, y + w)`.
    pub fn footprint(self, width: i32, height: i32) -> Vec<GridCell> {
        let vertical = self.orientation.is_vertical();
        let mut cells = Vec::new();
        for w in 0..width {
            for h in 0..height {
                let (dx, dy) = if vertical { (w, h) } else { (h, w) };
                cells.push(GridCell::new(
                    self.x.saturating_add(dx),
                    self.y.saturating_add(dy),
                ));
            }
        }
        cells
    }
}

/// An axis-aligned rectangle in pixel (or, with a tile size of 1, grid)
/// coordinates. The right and bottom edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    /// Left edge (inclusive).
    pub left: i32,
    /// Top edge (inclusive).
    pub top: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl PixelRect {
    /// Create a rectangle.
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    pub const fn right(&self) -> i32 {
        self.left.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    pub const fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }

    /// Whether the point lies inside the rectangle.
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    /// Whether the grid cell lies inside a rectangle expressed at one
    /// pixel per cell.
    pub const fn contains_cell(&self, cell: GridCell) -> bool {
        self.contains_point(cell.x, cell.y)
    }

    /// Translate the rectangle.
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self {
            left: self.left.saturating_add(dx),
            top: self.top.saturating_add(dy),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_wraps_orientation() {
        let pos = GridPosition::new(3, 4, Orientation::Left);
        let moved = pos.offset([1, -1, 1]);
        assert_eq!(moved, GridPosition::new(4, 3, Orientation::Up));
    }

    #[test]
    fn footprint_swaps_axes_when_horizontal() {
        let up = GridPosition::new(2, 2, Orientation::Up).footprint(1, 2);
        assert_eq!(up, vec![GridCell::new(2, 2), GridCell::new(2, 3)]);

        let right = GridPosition::new(2, 2, Orientation::Right).footprint(1, 2);
        assert_eq!(right, vec![GridCell::new(2, 2), GridCell::new(3, 2)]);

        let fire = GridPosition::new(0, 0, Orientation::Up).footprint(4, 4);
        assert_eq!(fire.len(), 16);
    }

    #[test]
    fn rect_edges_are_exclusive() {
        let rect = PixelRect::new(2, 3, 4, 5);
        assert!(rect.contains_point(2, 3));
        assert!(rect.contains_point(5, 7));
        assert!(!rect.contains_point(6, 7));
        assert!(!rect.contains_point(5, 8));
        assert!(!rect.contains_point(1, 3));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let rect = PixelRect::new(0, 0, 0, 0);
        assert!(!rect.contains_cell(GridCell::new(0, 0)));
    }
}
