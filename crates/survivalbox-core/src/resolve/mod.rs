//! Per-kind tick resolution.
//!
//! One tick resolves every entity in a fixed order: survivors in agent
//! order, then sheep, wolves and fireplaces. The acting entity is taken out
//! of the entity list for its update and everything else is reached through
//! a [`TickContext`], so both can be mutated without aliasing. Moves are applied provisionally and rolled
//! back with [`Body::set_back`] when they hit something.
//!
//! [`Body::set_back`]: survivalbox_entities::Body::set_back

pub mod fireplace;
pub mod sheep;
pub mod survivor;
pub mod wolf;

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use survivalbox_entities::Entity;
use survivalbox_types::{GridCell, TileType};
use survivalbox_world::{TileMap, WorldError, free_random_position};

use crate::config::RewardsConfig;

/// Terrain animals and fireplaces may not be spawned on.
pub const SPAWN_FORBIDDEN: [TileType; 1] = [TileType::Water];

/// Terrain `entity` may not be spawned on. Survivors may start anywhere
/// off the border, water included.
pub const fn spawn_forbidden(entity: &Entity) -> &'static [TileType] {
    if entity.as_survivor().is_some() {
        &[]
    } else {
        &SPAWN_FORBIDDEN
    }
}

/// Everything an entity update may read or mutate besides the entity itself.
pub struct TickContext<'a> {
    /// The live tile grid.
    pub tiles: &'a mut TileMap,
    /// All other entities, in resolution order.
    pub others: &'a mut [Entity],
    /// Reward table.
    pub rewards: &'a RewardsConfig,
    /// Simulation random number generator.
    pub rng: &'a mut StdRng,
    /// Cells that need redrawing after this tick.
    pub dirty: &'a mut Vec<GridCell>,
}

impl TickContext<'_> {
    /// Index of the first living entity covering `cell`.
    pub fn occupant(&self, cell: GridCell) -> Option<usize> {
        self.others
            .iter()
            .position(|e| e.is_alive() && e.body.covers(cell))
    }

    /// Every cell covered by a living entity, the actor included.
    pub fn occupied_cells(&self, actor: &Entity) -> BTreeSet<GridCell> {
        self.others
            .iter()
            .filter(|e| e.is_alive())
            .flat_map(|e| e.body.cells().iter().copied())
            .chain(actor.body.cells().iter().copied())
            .collect()
    }

    /// Move the entity at `index` to a free spot it may spawn on.
    pub fn respawn(&mut self, index: usize, actor: &Entity) -> Result<(), WorldError> {
        let occupied = self.occupied_cells(actor);
        let Some(target) = self.others.get(index) else {
            return Ok(());
        };
        let min_space = u32::try_from(target.footprint().max_side()).unwrap_or(1);
        let position = free_random_position(
            &*self.tiles,
            &occupied,
            spawn_forbidden(target),
            min_space,
            &mut *self.rng,
        )?;
        if let Some(target) = self.others.get_mut(index) {
            self.dirty.extend_from_slice(target.body.cells());
            target.respawn(position);
        }
        Ok(())
    }

    /// Give `amount` energy to every living survivor, the actor included.
    ///
    /// Returns how many survivors received it.
    pub fn share_energy(&mut self, actor: &mut Entity, amount: f64) -> u32 {
        let mut receivers = 0_u32;
        for entity in self.others.iter_mut().chain(core::iter::once(actor)) {
            if let Some(survivor) = entity.living_survivor_mut() {
                survivor.energy += amount;
                receivers = receivers.saturating_add(1);
            }
        }
        receivers
    }
}
