//! Enumeration types for the SurvivalBox simulation.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

/// The facing direction of an entity on the grid.
///
/// The discriminants are the canonical orientation indices used by every
/// orientation-indexed table (movement deltas, viewport rotation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Facing towards decreasing `y`.
    Up = 0,
    /// Facing towards increasing `x`.
    Right = 1,
    /// Facing towards increasing `y`.
    Down = 2,
    /// Facing towards decreasing `x`.
    Left = 3,
}

impl Orientation {
    /// All orientations in index order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Build an orientation from any integer, wrapping modulo 4.
    pub const fn from_index(index: i32) -> Self {
        match index.rem_euclid(4) {
            0 => Self::Up,
            1 => Self::Right,
            2 => Self::Down,
            _ => Self::Left,
        }
    }

    /// Return the orientation index (0..=3).
    pub const fn index(self) -> i32 {
        self as i32
    }

    /// Rotate clockwise by `quarter_turns` (negative turns rotate
    /// counter-clockwise).
    pub const fn rotated(self, quarter_turns: i32) -> Self {
        Self::from_index(self.index() + quarter_turns)
    }

    /// Whether the entity faces along the `y` axis.
    ///
    /// Vertical-facing entities occupy their footprint unrotated;
    /// horizontal-facing ones have width and height swapped.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

/// The terrain type of a single grid tile.
///
/// `GrowingGrass` and `GrowingTrees` are part of the tile vocabulary (maps
/// and renderers know them) but nothing in the simulation produces them:
/// grass only ever turns into mud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileType {
    /// End-of-world border ring. Impassable.
    Border = 0,
    /// Passable water, more expensive to traverse.
    Water = 1,
    /// Barren high ground.
    Dirt = 2,
    /// Edible grass holding a food value.
    Grass = 3,
    /// Grass that has been eaten.
    Mud = 4,
    /// Regrowing grass.
    GrowingGrass = 5,
    /// Regrowing trees.
    GrowingTrees = 6,
}

impl TileType {
    /// All tile types in code order.
    pub const ALL: [Self; 7] = [
        Self::Border,
        Self::Water,
        Self::Dirt,
        Self::Grass,
        Self::Mud,
        Self::GrowingGrass,
        Self::GrowingTrees,
    ];

    /// Numeric code used in raw map grids.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode a numeric raw-map code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Border),
            1 => Some(Self::Water),
            2 => Some(Self::Dirt),
            3 => Some(Self::Grass),
            4 => Some(Self::Mud),
            5 => Some(Self::GrowingGrass),
            6 => Some(Self::GrowingTrees),
            _ => None,
        }
    }

    /// Resource name as it appears in map snapshots.
    pub const fn resource_name(self) -> &'static str {
        match self {
            Self::Border => "EOW",
            Self::Water => "WATER",
            Self::Dirt => "DIRT",
            Self::Grass => "GRASS",
            Self::Mud => "MUD",
            Self::GrowingGrass => "GRASS_GROWING",
            Self::GrowingTrees => "TREES_GROWING",
        }
    }

    /// Whether the tile is part of the end-of-world border.
    pub const fn is_border(self) -> bool {
        matches!(self, Self::Border)
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// An action a survivor can be given by the RL harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgentAction {
    /// Step one cell in the facing direction.
    MoveForward,
    /// Step one cell against the facing direction.
    MoveBackward,
    /// Step one cell to the left of the facing direction.
    StrafeLeft,
    /// Step one cell to the right of the facing direction.
    StrafeRight,
    /// Rotate a quarter turn counter-clockwise in place.
    TurnLeft,
    /// Rotate a quarter turn clockwise in place.
    TurnRight,
    /// Do nothing.
    NoOp,
}

impl AgentAction {
    /// The full action vocabulary.
    pub const ALL: [Self; 7] = [
        Self::MoveForward,
        Self::MoveBackward,
        Self::StrafeLeft,
        Self::StrafeRight,
        Self::TurnLeft,
        Self::TurnRight,
        Self::NoOp,
    ];

    /// The action vocabulary without the turning actions.
    pub const WITHOUT_TURNS: [Self; 5] = [
        Self::MoveForward,
        Self::MoveBackward,
        Self::StrafeLeft,
        Self::StrafeRight,
        Self::NoOp,
    ];

    /// Whether the action only changes orientation.
    pub const fn is_turn(self) -> bool {
        matches!(self, Self::TurnLeft | Self::TurnRight)
    }
}

/// An action selected internally by an NPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NpcAction {
    /// Step one cell in the facing direction.
    Forward,
    /// Pivot a quarter turn counter-clockwise.
    TurnLeft,
    /// Pivot a quarter turn clockwise.
    TurnRight,
    /// Turn around.
    TurnFull,
    /// Stay in place.
    Stay,
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// The kind of a simulated entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Player-controlled agent.
    Survivor,
    /// Herbivore NPC that can be shepherded.
    Sheep,
    /// Predator NPC that hunts sheep.
    Wolf,
    /// Stationary NPC that can be guarded.
    Fireplace,
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Survivor => write!(f, "survivor"),
            Self::Sheep => write!(f, "sheep"),
            Self::Wolf => write!(f, "wolf"),
            Self::Fireplace => write!(f, "fireplace"),
        }
    }
}
