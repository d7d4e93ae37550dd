//! Per-agent visual observations.
//!
//! The world is rasterized onto a surface that is larger than the map by a
//! clipping border on every side, so that a viewport at the map edge never
//! leaves the surface. An observation is the agent's view rectangle cut
//! out of that surface and rotated so the agent's facing points up.
//!
//! Pixels are RGB, row-major, three bytes each.

use survivalbox_entities::{Entity, Role};
use survivalbox_types::{AgentId, GridCell, Orientation, PixelRect, TileType};
use survivalbox_world::{TileMap, clamp_i32};

/// An RGB color.
pub type Rgb = [u8; 3];

/// Color of everything outside the map.
pub const BACKGROUND: Rgb = [0, 0, 0];
/// The observing survivor.
pub const SELF_COLOR: Rgb = [220, 40, 40];
/// Other living survivors.
pub const ALLY_COLOR: Rgb = [40, 80, 220];
/// Sheep.
pub const SHEEP_COLOR: Rgb = [245, 245, 245];
/// Wolves.
pub const WOLF_COLOR: Rgb = [120, 120, 130];
/// A burning fireplace.
pub const FIRE_LIT_COLOR: Rgb = [255, 160, 0];
/// A cold fireplace.
pub const FIRE_OUT_COLOR: Rgb = [110, 50, 20];
/// Facing marker drawn in front of survivors.
pub const MARKER_COLOR: Rgb = [255, 220, 0];

/// Color of a tile type.
pub const fn tile_color(tile_type: TileType) -> Rgb {
    match tile_type {
        TileType::Border => [40, 40, 40],
        TileType::Water => [30, 90, 200],
        TileType::Dirt => [150, 110, 70],
        TileType::Grass => [60, 170, 60],
        TileType::Mud => [100, 70, 40],
        TileType::GrowingGrass => [120, 200, 90],
        TileType::GrowingTrees => [20, 110, 40],
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// An RGB pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Frame {
    /// A frame filled with [`BACKGROUND`].
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width.saturating_mul(height).saturating_mul(3)],
        }
    }

    /// Width in pixels.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Raw bytes, `height x width x 3`.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the frame, keeping the raw bytes.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) * 3)
    }

    /// Color at `(x, y)`, if inside the frame.
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        let offset = self.offset(x, y)?;
        let px = self.pixels.get(offset..offset + 3)?;
        Some([*px.first()?, *px.get(1)?, *px.get(2)?])
    }

    /// Set the color at `(x, y)`. Outside points are ignored.
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        let Some(offset) = self.offset(x, y) else {
            return;
        };
        if let Some(px) = self.pixels.get_mut(offset..offset + 3) {
            px.copy_from_slice(&color);
        }
    }

    /// Fill a rectangle, clipped to the frame.
    pub fn fill_rect(&mut self, rect: PixelRect, color: Rgb) {
        let (x0, x1) = (clip(rect.left, self.width), clip(rect.right(), self.width));
        let (y0, y1) = (clip(rect.top, self.height), clip(rect.bottom(), self.height));
        for y in y0..y1 {
            for x in x0..x1 {
                self.set(x, y, color);
            }
        }
    }

    /// Copy out `rect`; parts outside the frame come back as [`BACKGROUND`].
    pub fn crop(&self, rect: PixelRect) -> Self {
        let width = usize::try_from(rect.width).unwrap_or(0);
        let height = usize::try_from(rect.height).unwrap_or(0);
        let mut out = Self::new(width, height);
        for (y, src_y) in (rect.top..rect.bottom()).enumerate() {
            let Ok(src_y) = usize::try_from(src_y) else {
                continue;
            };
            for (x, src_x) in (rect.left..rect.right()).enumerate() {
                let color = usize::try_from(src_x)
                    .ok()
                    .and_then(|src_x| self.get(src_x, src_y));
                if let Some(color) = color {
                    out.set(x, y, color);
                }
            }
        }
        out
    }

    /// Rotate a quarter turn counter-clockwise.
    pub fn rotate_left(&self) -> Self {
        let mut out = Self::new(self.height, self.width);
        for ny in 0..out.height {
            for nx in 0..out.width {
                let x = self.width - 1 - ny;
                if let Some(color) = self.get(x, nx) {
                    out.set(nx, ny, color);
                }
            }
        }
        out
    }

    /// Rotate so that `orientation` points up.
    pub fn upright(self, orientation: Orientation) -> Self {
        let turns = orientation.index().rem_euclid(4);
        (0..turns).fold(self, |frame, _| frame.rotate_left())
    }
}

/// Clamp a signed pixel coordinate into `0..=limit`.
fn clip(value: i32, limit: usize) -> usize {
    usize::try_from(value.max(0)).unwrap_or(0).min(limit)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Rasterize the whole world as seen by `viewer`.
///
/// The surface is `width * tile_size + 2 * border` pixels wide (and
/// likewise high) with tile `(0, 0)` drawn at `(border, border)`.
pub fn render(
    tiles: &TileMap,
    entities: &[Entity],
    viewer: AgentId,
    tile_size: u32,
    border: i32,
) -> Frame {
    let ts = clamp_i32(tile_size);
    let span = |cells: u32| {
        let pixels = i64::from(cells) * i64::from(tile_size) + 2 * i64::from(border.max(0));
        usize::try_from(pixels).unwrap_or(0)
    };
    let mut frame = Frame::new(span(tiles.width()), span(tiles.height()));

    for tile in tiles.tiles() {
        frame.fill_rect(tile.pixel_rect(tile_size, border), tile_color(tile.tile_type()));
    }

    for entity in entities.iter().filter(|e| e.is_alive()) {
        let color = match &entity.role {
            Role::Survivor(s) if s.agent == viewer => SELF_COLOR,
            Role::Survivor(_) => ALLY_COLOR,
            Role::Sheep(_) => SHEEP_COLOR,
            Role::Wolf(_) => WOLF_COLOR,
            Role::Fireplace(f) if f.lit => FIRE_LIT_COLOR,
            Role::Fireplace(_) => FIRE_OUT_COLOR,
        };
        for &cell in entity.body.cells() {
            frame.fill_rect(cell_rect(cell, ts, border), color);
        }
    }

    // Facing markers: the inner half of the cell in front of each survivor.
    for entity in entities.iter().filter(|e| e.is_alive()) {
        if entity.as_survivor().is_none() {
            continue;
        }
        let marker = entity.marker(ts, border);
        let inset = ts / 4;
        let inner = PixelRect::new(
            marker.left + inset,
            marker.top + inset,
            (marker.width - 2 * inset).max(1),
            (marker.height - 2 * inset).max(1),
        );
        frame.fill_rect(inner, MARKER_COLOR);
    }
    frame
}

const fn cell_rect(cell: GridCell, tile_size: i32, border: i32) -> PixelRect {
    PixelRect::new(
        cell.x.saturating_mul(tile_size).saturating_add(border),
        cell.y.saturating_mul(tile_size).saturating_add(border),
        tile_size,
        tile_size,
    )
}

/// The observation of the survivor `agent`, or `None` if no such survivor
/// exists.
///
/// Dead survivors still observe: they see the world from where they fell.
pub fn observe(
    tiles: &TileMap,
    entities: &[Entity],
    agent: AgentId,
    tile_size: u32,
    border: i32,
) -> Option<Frame> {
    let viewer = entities
        .iter()
        .find(|e| e.as_survivor().is_some_and(|s| s.agent == agent))?;
    let surface = render(tiles, entities, agent, tile_size, border);
    let rect = viewer.view_rect(clamp_i32(tile_size), border);
    Some(surface.crop(rect).upright(viewer.body.orientation()))
}
