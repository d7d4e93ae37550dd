//! Game-dynamics constants.

use crate::body::Footprint;

/// Energy every survivor loses per tick before the terrain multiplier.
pub const COST_PERMANENT: f64 = 1.0;
/// Cost multiplier after ending a tick on land.
pub const COST_MULT_LAND: f64 = 1.0;
/// Cost multiplier after ending a tick on water.
pub const COST_MULT_WATER: f64 = 3.0;

/// Energy every living survivor gains per team event (grass eaten, sheep
/// shepherded, fire burning).
pub const ENERGY_TRICKLE: f64 = 0.25;
/// Energy per tick of a caught wolf's lifetime shared with every survivor.
pub const WOLF_ENERGY_PER_STEP: f64 = 0.25;
/// Energy a wolf bite takes from a survivor.
pub const WOLF_DAMAGE: f64 = 50.0;

/// Ticks between sheep moves when no fire burns.
pub const SHEEP_SLOW: u64 = 6;
/// Ticks between sheep moves while a fire burns.
pub const SHEEP_FAST: u64 = 2;
/// Ticks between wolf moves while a fire burns.
pub const WOLF_SLOW: u64 = 4;
/// Ticks between wolf moves when no fire burns.
pub const WOLF_FAST: u64 = 1;

/// Survivor footprint.
pub const SURVIVOR_FOOTPRINT: Footprint = Footprint::new(1, 1);
/// Sheep footprint.
pub const SHEEP_FOOTPRINT: Footprint = Footprint::new(1, 2);
/// Wolf footprint.
pub const WOLF_FOOTPRINT: Footprint = Footprint::new(1, 2);
/// Fireplace footprint.
pub const FIRE_FOOTPRINT: Footprint = Footprint::new(4, 4);
