//! The simulation driver.
//!
//! A [`Simulation`] owns the map, the entities and the random number
//! generator. Each call to [`Simulation::step`] runs one tick to
//! completion:
//!
//! 1. **Survivors** act in agent order, each with its harness action.
//! 2. **Sheep** wander, graze and look for a shepherd.
//! 3. **Wolves** hunt or wander, catch sheep and bite survivors.
//! 4. **Fireplaces** look for a guard and set the animals' pace.
//!
//! Later entities see the final positions of earlier ones. The tick
//! reports the cells that need redrawing, each agent's score delta, and
//! whether every survivor is dead.

use std::collections::BTreeSet;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use survivalbox_entities::{Entity, Survivor, ViewPort};
use survivalbox_types::{
    AgentAction, AgentId, EntityId, EntityKind, EntityStats, GridCell, GridPosition, Orientation,
    SurvivorStats,
};
use survivalbox_world::{
    MapMeta, MapSnapshot, TerrainStats, TileMap, clamp_i32, free_random_position,
};
use tracing::{debug, info};

use crate::config::{ConfigError, SimulationConfig};
use crate::error::SimulationError;
use crate::observation::{self, Frame};
use crate::resolve::{self, TickContext, spawn_forbidden};

/// What one tick produced.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Cells whose contents changed, sorted and deduplicated.
    pub dirty: Vec<GridCell>,
    /// Score change of every agent this tick, indexed by agent id.
    pub rewards: Vec<f64>,
    /// Whether every survivor is dead.
    pub terminal: bool,
}

/// A running SurvivalBox world.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    viewport: ViewPort,
    rng: StdRng,
    snapshot: MapSnapshot,
    tiles: TileMap,
    entities: Vec<Entity>,
    ticks: u64,
}

impl Simulation {
    /// Validate `config`, generate a map and spawn the population.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let viewport = agent_viewport(&config)?;
        let mut rng = StdRng::seed_from_u64(config.world.seed);
        let snapshot =
            MapSnapshot::generate(map_meta(&config), config.world.noise_octaves, &mut rng)?;
        let tiles = snapshot.restore()?;
        let entities = populate(&config, viewport);

        let mut simulation = Self {
            config,
            viewport,
            rng,
            snapshot,
            tiles,
            entities,
            ticks: 0,
        };
        simulation.restart()?;
        Ok(simulation)
    }

    /// Start from a given map with hand-placed entities.
    ///
    /// Map size, water percentage and tile size come from the snapshot's
    /// metadata; population counts come from `entities`. Survivors must
    /// carry agent ids `0..n`. Entities keep their positions until the
    /// next [`reset`](Self::reset).
    pub fn with_entities(
        mut config: SimulationConfig,
        snapshot: MapSnapshot,
        mut entities: Vec<Entity>,
    ) -> Result<Self, SimulationError> {
        entities.sort_by_key(|e| (e.kind(), e.as_survivor().map(|s| s.agent)));
        let count = |kind: EntityKind| {
            u32::try_from(entities.iter().filter(|e| e.kind() == kind).count()).unwrap_or(u32::MAX)
        };
        config.agents.count = count(EntityKind::Survivor);
        config.npcs.sheep = count(EntityKind::Sheep);
        config.npcs.wolves = count(EntityKind::Wolf);
        config.npcs.fires = count(EntityKind::Fireplace);
        apply_meta(&mut config, snapshot.meta);
        config.validate()?;
        let viewport = agent_viewport(&config)?;
        let tiles = snapshot.restore()?;
        check_layout(&tiles, &entities)?;

        info!(
            width = snapshot.meta.width,
            height = snapshot.meta.height,
            entities = entities.len(),
            "scripted simulation created"
        );
        Ok(Self {
            rng: StdRng::seed_from_u64(config.world.seed),
            config,
            viewport,
            snapshot,
            tiles,
            entities,
            ticks: 0,
        })
    }

    // -----------------------------------------------------------------------
    // Episode control
    // -----------------------------------------------------------------------

    /// Start a new episode.
    ///
    /// Terrain is regenerated when `regenerate_map` is set or the
    /// configuration asks for a new map on every reset; otherwise tiles
    /// get their generated type and food back.
    pub fn reset(&mut self, regenerate_map: bool) -> Result<(), SimulationError> {
        if regenerate_map || self.config.world.always_new_map {
            self.snapshot = MapSnapshot::generate(
                map_meta(&self.config),
                self.config.world.noise_octaves,
                &mut self.rng,
            )?;
            self.tiles = self.snapshot.restore()?;
        } else {
            self.tiles.reset();
        }
        self.restart()
    }

    /// Re-place every entity and clear the tick counter.
    fn restart(&mut self) -> Result<(), SimulationError> {
        let mut occupied = BTreeSet::new();
        for entity in &mut self.entities {
            let side = u32::try_from(entity.footprint().max_side()).unwrap_or(1);
            let position =
                free_random_position(
                &self.tiles,
                &occupied,
                spawn_forbidden(entity),
                side,
                &mut self.rng,
            )?;
            entity.reset(position);
            occupied.extend(entity.body.cells().iter().copied());
        }
        self.ticks = 0;
        info!(
            entities = self.entities.len(),
            water = self.snapshot.stats.water,
            land = self.snapshot.stats.land,
            "episode reset"
        );
        Ok(())
    }

    /// Run one tick.
    ///
    /// `actions` holds one action per agent, indexed by agent id. Turning
    /// actions resolve to [`AgentAction::NoOp`] unless turning is enabled.
    pub fn step(&mut self, actions: &[AgentAction]) -> Result<StepOutcome, SimulationError> {
        let agents = self.agent_count();
        if actions.len() != agents {
            return Err(SimulationError::ActionCount {
                expected: agents,
                given: actions.len(),
            });
        }
        if self.is_over() {
            return Ok(StepOutcome {
                dirty: Vec::new(),
                rewards: vec![0.0; agents],
                terminal: true,
            });
        }

        let before = self.scores();
        let mut dirty = Vec::new();
        for index in 0..self.entities.len() {
            let mut actor = self.entities.remove(index);
            let action = actor
                .as_survivor()
                .and_then(|s| actions.get(s.agent.index()).copied())
                .map_or(AgentAction::NoOp, |a| self.effective_action(a));
            let result = {
                let mut ctx = TickContext {
                    tiles: &mut self.tiles,
                    others: &mut self.entities,
                    rewards: &self.config.rewards,
                    rng: &mut self.rng,
                    dirty: &mut dirty,
                };
                match actor.kind() {
                    EntityKind::Survivor => resolve::survivor::resolve(&mut actor, action, &mut ctx),
                    EntityKind::Sheep => {
                        resolve::sheep::resolve(&mut actor, &mut ctx);
                        Ok(())
                    }
                    EntityKind::Wolf => resolve::wolf::resolve(&mut actor, &mut ctx),
                    EntityKind::Fireplace => {
                        resolve::fireplace::resolve(&mut actor, &mut ctx);
                        Ok(())
                    }
                }
            };
            self.entities.insert(index, actor);
            result?;
        }
        self.ticks += 1;

        dirty.sort_unstable();
        dirty.dedup();
        let rewards = self
            .scores()
            .iter()
            .zip(&before)
            .map(|(after, before)| after - before)
            .collect();
        let terminal = self.is_over();
        debug!(tick = self.ticks, dirty = dirty.len(), terminal, "tick resolved");
        if terminal {
            info!(ticks = self.ticks, scores = ?self.scores(), "all survivors dead");
        }
        Ok(StepOutcome {
            dirty,
            rewards,
            terminal,
        })
    }

    const fn effective_action(&self, action: AgentAction) -> AgentAction {
        if action.is_turn() && !self.config.agents.turn_actions {
            AgentAction::NoOp
        } else {
            action
        }
    }

    /// Whether every survivor is dead.
    pub fn is_over(&self) -> bool {
        !self
            .entities
            .iter()
            .any(|e| e.kind() == EntityKind::Survivor && e.is_alive())
    }

    /// Actions the harness may send.
    pub const fn available_actions(&self) -> &'static [AgentAction] {
        if self.config.agents.turn_actions {
            &AgentAction::ALL
        } else {
            &AgentAction::WITHOUT_TURNS
        }
    }

    // -----------------------------------------------------------------------
    // Observations and scores
    // -----------------------------------------------------------------------

    /// The observation of `agent`: its view rectangle, facing up.
    pub fn observation(&self, agent: AgentId) -> Result<Frame, SimulationError> {
        observation::observe(
            &self.tiles,
            &self.entities,
            agent,
            self.config.world.tile_size,
            self.clipping_border(),
        )
        .ok_or(SimulationError::UnknownAgent(agent))
    }

    /// The whole rendered world, border included, as seen by `agent`.
    pub fn render(&self, agent: AgentId) -> Frame {
        observation::render(
            &self.tiles,
            &self.entities,
            agent,
            self.config.world.tile_size,
            self.clipping_border(),
        )
    }

    /// Cumulative episode score of `agent`.
    pub fn get_score(&self, agent: AgentId) -> Result<f64, SimulationError> {
        self.survivor(agent).map(|s| s.score)
    }

    /// Scores of all agents, indexed by agent id.
    pub fn scores(&self) -> Vec<f64> {
        self.entities
            .iter()
            .filter_map(Entity::as_survivor)
            .map(|s| s.score)
            .collect()
    }

    /// Statistics of `agent`.
    pub fn survivor_stats(&self, agent: AgentId) -> Result<&SurvivorStats, SimulationError> {
        self.survivor(agent).map(|s| &s.stats)
    }

    /// Statistics of every entity.
    pub fn entity_stats(&self) -> Vec<(EntityId, EntityStats)> {
        self.entities.iter().map(|e| (e.id, e.stats())).collect()
    }

    fn survivor(&self, agent: AgentId) -> Result<&Survivor, SimulationError> {
        self.entities
            .iter()
            .filter_map(Entity::as_survivor)
            .find(|s| s.agent == agent)
            .ok_or(SimulationError::UnknownAgent(agent))
    }

    fn agent_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| e.kind() == EntityKind::Survivor)
            .count()
    }

    // -----------------------------------------------------------------------
    // Map handling
    // -----------------------------------------------------------------------

    /// Change the observation resolution. The episode is reset.
    pub fn scale_to(&mut self, tile_size: u32) -> Result<(), SimulationError> {
        if tile_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "world.tile_size",
                reason: "must be at least 1".to_owned(),
            }
            .into());
        }
        self.reset(false)?;
        self.config.world.tile_size = tile_size;
        self.snapshot.meta.tile_size = tile_size;
        info!(tile_size, border = self.clipping_border(), "rescaled");
        Ok(())
    }

    /// Replace the terrain with `snapshot` and start a new episode on it.
    pub fn load_map(&mut self, snapshot: MapSnapshot) -> Result<(), SimulationError> {
        let mut config = self.config.clone();
        apply_meta(&mut config, snapshot.meta);
        config.validate()?;
        let tiles = snapshot.restore()?;

        self.config = config;
        self.tiles = tiles;
        self.snapshot = snapshot;
        info!(
            width = self.snapshot.meta.width,
            height = self.snapshot.meta.height,
            "map loaded"
        );
        self.restart()
    }

    /// A snapshot of the current map, eaten grass included.
    pub fn map_snapshot(&self) -> MapSnapshot {
        let mut snapshot = self.snapshot.clone();
        snapshot.capture(&self.tiles);
        snapshot
    }

    /// Write the current map to `path` as JSON.
    pub fn save_map(&self, path: &Path) -> Result<(), SimulationError> {
        let json = self.map_snapshot().to_json()?;
        std::fs::write(path, json)?;
        debug!(path = %path.display(), "map saved");
        Ok(())
    }

    /// Load a JSON map from `path`; see [`load_map`](Self::load_map).
    pub fn load_map_file(&mut self, path: &Path) -> Result<(), SimulationError> {
        let json = std::fs::read_to_string(path)?;
        let snapshot = MapSnapshot::from_json(&json)?;
        self.load_map(snapshot)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Pixel offset of tile `(0, 0)` on the rendered surface.
    ///
    /// Wide enough that the largest survivor viewport never leaves the
    /// surface.
    pub fn clipping_border(&self) -> i32 {
        self.viewport
            .max_extent()
            .saturating_sub(1)
            .max(0)
            .saturating_mul(clamp_i32(self.config.world.tile_size))
    }

    /// Every entity in resolution order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// The live tile map.
    pub const fn tiles(&self) -> &TileMap {
        &self.tiles
    }

    /// Terrain statistics of the current map.
    pub const fn terrain_stats(&self) -> TerrainStats {
        self.snapshot.stats
    }

    /// Ticks run this episode.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Edge length of a tile in pixels.
    pub const fn tile_size(&self) -> u32 {
        self.config.world.tile_size
    }

    /// The active configuration.
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const fn map_meta(config: &SimulationConfig) -> MapMeta {
    MapMeta {
        width: config.world.width,
        height: config.world.height,
        water_percentage: config.world.water_percentage,
        tile_size: config.world.tile_size,
    }
}

const fn apply_meta(config: &mut SimulationConfig, meta: MapMeta) {
    config.world.width = meta.width;
    config.world.height = meta.height;
    config.world.water_percentage = meta.water_percentage;
    config.world.tile_size = meta.tile_size;
}

fn agent_viewport(config: &SimulationConfig) -> Result<ViewPort, ConfigError> {
    config
        .agents
        .viewport
        .ok_or(ConfigError::MissingViewport)?
        .to_viewport()
}

/// Build the population in resolution order. Positions are assigned by
/// the first reset.
fn populate(config: &SimulationConfig, viewport: ViewPort) -> Vec<Entity> {
    let origin = GridPosition::new(1, 1, Orientation::Up);
    let mut entities = Vec::new();
    let next_id = |entities: &[Entity]| {
        EntityId::new(u32::try_from(entities.len()).unwrap_or(u32::MAX))
    };
    for agent in 0..config.agents.count {
        let id = next_id(&entities);
        entities.push(Entity::survivor(
            id,
            AgentId::new(agent),
            origin,
            config.agents.life,
            viewport,
        ));
    }
    for _ in 0..config.npcs.sheep {
        let id = next_id(&entities);
        entities.push(Entity::sheep(id, origin));
    }
    for _ in 0..config.npcs.wolves {
        let id = next_id(&entities);
        entities.push(Entity::wolf(id, origin));
    }
    for _ in 0..config.npcs.fires {
        let id = next_id(&entities);
        entities.push(Entity::fireplace(id, origin));
    }
    entities
}

/// Check a hand-placed population: agent ids are `0..n`, every entity
/// stands inside the border ring, and no two entities overlap.
fn check_layout(tiles: &TileMap, entities: &[Entity]) -> Result<(), SimulationError> {
    let invalid = |reason: String| Err(SimulationError::InvalidLayout { reason });
    for (expected, survivor) in entities.iter().filter_map(Entity::as_survivor).enumerate() {
        if survivor.agent.index() != expected {
            return invalid(format!(
                "survivor with agent id {} where {expected} was expected",
                survivor.agent
            ));
        }
    }
    let mut seen = BTreeSet::new();
    for entity in entities {
        for &cell in entity.body.cells() {
            if tiles.tile_type(cell).is_border() {
                return invalid(format!(
                    "{} {} covers border cell ({}, {})",
                    entity.kind(),
                    entity.id,
                    cell.x,
                    cell.y
                ));
            }
            if !seen.insert(cell) {
                return invalid(format!("cell ({}, {}) is covered twice", cell.x, cell.y));
            }
        }
    }
    Ok(())
}
