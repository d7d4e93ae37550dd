//! Simulated entities and their per-kind state.
//!
//! Every entity is a [`Body`] plus a [`Role`] carrying what only that kind
//! needs. Survivors are the player-controlled agents; sheep, wolves and
//! fireplaces are NPCs driven by the simulation.

use serde::{Deserialize, Serialize};
use survivalbox_types::{
    AgentId, EntityId, EntityKind, EntityStats, FireStats, GridPosition, PixelRect, SheepStats,
    SurvivorStats, WolfStats,
};

use crate::behavior::Pace;
use crate::body::{Body, Footprint, marker_rect};
use crate::rules::{
    COST_MULT_LAND, FIRE_FOOTPRINT, SHEEP_FAST, SHEEP_FOOTPRINT, SHEEP_SLOW, SURVIVOR_FOOTPRINT,
    WOLF_FAST, WOLF_FOOTPRINT, WOLF_SLOW,
};
use crate::viewport::{FIRE_VIEWPORT, SHEEP_VIEWPORT, ViewPort, WOLF_VIEWPORT};

// ---------------------------------------------------------------------------
// Per-kind state
// ---------------------------------------------------------------------------

/// A player-controlled agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survivor {
    /// Harness-facing identifier.
    pub agent: AgentId,
    /// Remaining energy; the survivor dies when it reaches zero.
    pub energy: f64,
    /// Energy at spawn.
    pub initial_energy: f64,
    /// Multiplier applied to the next tick's energy cost.
    pub cost_multiplier: f64,
    /// Cumulative episode score.
    pub score: f64,
    /// Whether the survivor is still in play.
    pub alive: bool,
    /// Observation extents.
    pub viewport: ViewPort,
    /// Episode statistics.
    pub stats: SurvivorStats,
}

impl Survivor {
    /// A fresh survivor with `life` energy.
    pub fn new(agent: AgentId, life: f64, viewport: ViewPort) -> Self {
        Self {
            agent,
            energy: life,
            initial_energy: life,
            cost_multiplier: COST_MULT_LAND,
            score: 0.0,
            alive: true,
            viewport,
            stats: SurvivorStats::default(),
        }
    }

    /// Add `amount` to the score and mirror it into the statistics.
    pub fn add_score(&mut self, amount: f64) {
        self.score += amount;
        self.stats.rewards.reward_total = self.score;
    }

    fn reset(&mut self) {
        *self = Self::new(self.agent, self.initial_energy, self.viewport);
    }
}

/// A sheep that wanders, grazes and can be shepherded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheep {
    /// Movement cadence.
    pub pace: Pace,
    /// Ticks since spawn.
    pub world_steps: u64,
    /// The survivor currently claiming the sheep.
    pub shepherd: Option<AgentId>,
    /// Episode statistics.
    pub stats: SheepStats,
}

impl Default for Sheep {
    fn default() -> Self {
        Self {
            pace: Pace::new(SHEEP_SLOW, SHEEP_FAST, SHEEP_SLOW),
            world_steps: 0,
            shepherd: None,
            stats: SheepStats::default(),
        }
    }
}

/// A wolf that hunts sheep and bites survivors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wolf {
    /// Movement cadence.
    pub pace: Pace,
    /// Ticks since the last (re)spawn.
    pub world_steps: u64,
    /// Ticks survived since the last (re)spawn.
    pub steps_alive: u64,
    /// Episode statistics.
    pub stats: WolfStats,
}

impl Default for Wolf {
    fn default() -> Self {
        Self {
            pace: Pace::new(WOLF_SLOW, WOLF_FAST, WOLF_FAST),
            world_steps: 0,
            steps_alive: 0,
            stats: WolfStats::default(),
        }
    }
}

/// A stationary fire that burns while a guard stands near it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fireplace {
    /// Whether the fire burned this tick.
    pub lit: bool,
    /// The survivor currently guarding the fire.
    pub guard: Option<AgentId>,
    /// Episode statistics.
    pub stats: FireStats,
}

/// Kind-specific state of an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Role {
    /// Player-controlled agent.
    Survivor(Survivor),
    /// Sheep NPC.
    Sheep(Sheep),
    /// Wolf NPC.
    Wolf(Wolf),
    /// Fireplace NPC.
    Fireplace(Fireplace),
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// Anything that occupies cells on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// Position and footprint.
    pub body: Body,
    /// Kind-specific state.
    pub role: Role,
}

impl Entity {
    /// A survivor with `life` energy.
    pub fn survivor(
        id: EntityId,
        agent: AgentId,
        position: GridPosition,
        life: f64,
        viewport: ViewPort,
    ) -> Self {
        Self {
            id,
            body: Body::new(SURVIVOR_FOOTPRINT, position),
            role: Role::Survivor(Survivor::new(agent, life, viewport)),
        }
    }

    /// A sheep at its slow pace.
    pub fn sheep(id: EntityId, position: GridPosition) -> Self {
        Self {
            id,
            body: Body::new(SHEEP_FOOTPRINT, position),
            role: Role::Sheep(Sheep::default()),
        }
    }

    /// A wolf at its fast pace.
    pub fn wolf(id: EntityId, position: GridPosition) -> Self {
        Self {
            id,
            body: Body::new(WOLF_FOOTPRINT, position),
            role: Role::Wolf(Wolf::default()),
        }
    }

    /// An unlit fireplace.
    pub fn fireplace(id: EntityId, position: GridPosition) -> Self {
        Self {
            id,
            body: Body::new(FIRE_FOOTPRINT, position),
            role: Role::Fireplace(Fireplace::default()),
        }
    }

    /// The entity's kind.
    pub const fn kind(&self) -> EntityKind {
        match self.role {
            Role::Survivor(_) => EntityKind::Survivor,
            Role::Sheep(_) => EntityKind::Sheep,
            Role::Wolf(_) => EntityKind::Wolf,
            Role::Fireplace(_) => EntityKind::Fireplace,
        }
    }

    /// Whether the entity takes part in the simulation. Only survivors die.
    pub const fn is_alive(&self) -> bool {
        match &self.role {
            Role::Survivor(s) => s.alive,
            Role::Sheep(_) | Role::Wolf(_) | Role::Fireplace(_) => true,
        }
    }

    /// Footprint dimensions.
    pub const fn footprint(&self) -> Footprint {
        self.body.footprint()
    }

    /// View extents of the entity.
    pub const fn viewport(&self) -> ViewPort {
        match &self.role {
            Role::Survivor(s) => s.viewport,
            Role::Sheep(_) => SHEEP_VIEWPORT,
            Role::Wolf(_) => WOLF_VIEWPORT,
            Role::Fireplace(_) => FIRE_VIEWPORT,
        }
    }

    /// View rectangle in pixels.
    pub const fn view_rect(&self, tile_size: i32, offset: i32) -> PixelRect {
        let footprint = self.footprint();
        self.viewport().rect(
            self.body.position(),
            tile_size,
            offset,
            footprint.width,
            footprint.height,
        )
    }

    /// View rectangle in grid cells.
    pub const fn view_grid(&self) -> PixelRect {
        self.view_rect(1, 0)
    }

    /// Facing marker in pixels.
    pub const fn marker(&self, tile_size: i32, offset: i32) -> PixelRect {
        marker_rect(self.body.position(), self.footprint(), tile_size, offset)
    }

    /// The survivor state, if this is a survivor.
    pub const fn as_survivor(&self) -> Option<&Survivor> {
        match &self.role {
            Role::Survivor(s) => Some(s),
            _ => None,
        }
    }

    /// The survivor state, mutably.
    pub const fn as_survivor_mut(&mut self) -> Option<&mut Survivor> {
        match &mut self.role {
            Role::Survivor(s) => Some(s),
            _ => None,
        }
    }

    /// The survivor state if this is a survivor still in play.
    pub fn living_survivor_mut(&mut self) -> Option<&mut Survivor> {
        self.as_survivor_mut().filter(|s| s.alive)
    }

    /// The sheep state, mutably.
    pub const fn as_sheep_mut(&mut self) -> Option<&mut Sheep> {
        match &mut self.role {
            Role::Sheep(s) => Some(s),
            _ => None,
        }
    }

    /// The wolf state, mutably.
    pub const fn as_wolf_mut(&mut self) -> Option<&mut Wolf> {
        match &mut self.role {
            Role::Wolf(w) => Some(w),
            _ => None,
        }
    }

    /// A copy of the entity's statistics.
    pub fn stats(&self) -> EntityStats {
        match &self.role {
            Role::Survivor(s) => EntityStats::Survivor(s.stats.clone()),
            Role::Sheep(s) => EntityStats::Sheep(s.stats.clone()),
            Role::Wolf(w) => EntityStats::Wolf(w.stats.clone()),
            Role::Fireplace(f) => EntityStats::Fireplace(f.stats.clone()),
        }
    }

    /// Move to a fresh spawn point after being caught.
    ///
    /// A respawned wolf starts its lifetime over; statistics are kept.
    pub fn respawn(&mut self, position: GridPosition) {
        self.body.place(position);
        if let Role::Wolf(wolf) = &mut self.role {
            wolf.world_steps = 0;
            wolf.steps_alive = 0;
        }
    }

    /// Start a new episode at `position`, clearing all per-episode state.
    pub fn reset(&mut self, position: GridPosition) {
        self.body.place(position);
        match &mut self.role {
            Role::Survivor(s) => s.reset(),
            Role::Sheep(s) => *s = Sheep::default(),
            Role::Wolf(w) => *w = Wolf::default(),
            Role::Fireplace(f) => *f = Fireplace::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survivalbox_types::{GridCell, Orientation};

    fn up(x: i32, y: i32) -> GridPosition {
        GridPosition::new(x, y, Orientation::Up)
    }

    #[test]
    fn kinds_and_footprints() {
        let fire = Entity::fireplace(EntityId::new(3), up(5, 5));
        assert_eq!(fire.kind(), EntityKind::Fireplace);
        assert_eq!(fire.body.cells().len(), 16);
        assert_eq!(fire.view_grid(), PixelRect::new(2, 2, 10, 10));

        let sheep = Entity::sheep(EntityId::new(1), up(5, 5));
        assert_eq!(sheep.body.cells(), &[GridCell::new(5, 5), GridCell::new(5, 6)]);
        assert_eq!(sheep.viewport(), SHEEP_VIEWPORT);
    }

    #[test]
    fn score_mirrors_into_stats() {
        let mut entity = Entity::survivor(
            EntityId::new(0),
            AgentId::new(0),
            up(2, 2),
            10.0,
            ViewPort::new(1, 1, 1, 1),
        );
        if let Some(s) = entity.as_survivor_mut() {
            s.add_score(1.0);
            s.add_score(2.5);
        }
        let total = entity.as_survivor().map(|s| s.stats.rewards.reward_total);
        assert_eq!(total, Some(3.5));
    }

    #[test]
    fn dead_survivors_are_filtered() {
        let mut entity = Entity::survivor(
            EntityId::new(0),
            AgentId::new(0),
            up(2, 2),
            10.0,
            ViewPort::new(1, 1, 1, 1),
        );
        assert!(entity.living_survivor_mut().is_some());
        if let Some(s) = entity.as_survivor_mut() {
            s.alive = false;
        }
        assert!(!entity.is_alive());
        assert!(entity.living_survivor_mut().is_none());
    }

    #[test]
    fn reset_restores_survivor() {
        let mut entity = Entity::survivor(
            EntityId::new(0),
            AgentId::new(1),
            up(2, 2),
            10.0,
            ViewPort::new(1, 1, 1, 1),
        );
        if let Some(s) = entity.as_survivor_mut() {
            s.energy = -3.0;
            s.alive = false;
            s.add_score(4.0);
            s.cost_multiplier = 3.0;
            s.stats.basics.collisions = 7;
        }
        entity.reset(up(4, 4));
        let s = entity.as_survivor().cloned();
        assert_eq!(s.as_ref().map(|s| s.energy), Some(10.0));
        assert_eq!(s.as_ref().map(|s| s.alive), Some(true));
        assert_eq!(s.as_ref().map(|s| s.score), Some(0.0));
        assert_eq!(s.as_ref().map(|s| s.cost_multiplier), Some(1.0));
        assert_eq!(s.as_ref().map(|s| s.stats.basics.collisions), Some(0));
        assert_eq!(entity.body.anchor(), GridCell::new(4, 4));
    }

    #[test]
    fn respawned_wolf_keeps_stats_but_restarts_lifetime() {
        let mut entity = Entity::wolf(EntityId::new(2), up(3, 3));
        if let Some(w) = entity.as_wolf_mut() {
            w.world_steps = 9;
            w.steps_alive = 9;
            w.stats.caught_by_survivor = 1;
        }
        entity.respawn(up(7, 7));
        let wolf = entity.as_wolf_mut().cloned();
        assert_eq!(wolf.as_ref().map(|w| w.steps_alive), Some(0));
        assert_eq!(wolf.as_ref().map(|w| w.world_steps), Some(0));
        assert_eq!(wolf.as_ref().map(|w| w.stats.caught_by_survivor), Some(1));
    }

    #[test]
    fn stats_are_tagged_by_kind() {
        let fire = Entity::fireplace(EntityId::new(0), up(1, 1));
        assert!(matches!(fire.stats(), EntityStats::Fireplace(_)));
    }
}
