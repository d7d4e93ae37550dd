//! Configuration loading and typed config structures for SurvivalBox.
//!
//! The canonical configuration lives in `survivalbox-config.yaml` at the
//! project root. Every field has a default, so an empty file (or no file at
//! all) yields the stock 50x50 map with two survivors, one sheep, one wolf
//! and one fireplace.

use std::path::Path;

use serde::{Deserialize, Serialize};
use survivalbox_entities::ViewPort;

/// Most survivors a simulation supports.
pub const MAX_AGENTS: u32 = 3;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// Survivor count outside `1..=3`.
    #[error("supported number of agents: 1-{MAX_AGENTS}, given: {given}")]
    AgentCount {
        /// Requested survivor count.
        given: u32,
    },

    /// An `agents` section without a `viewport`.
    #[error("agents.viewport is required when an agents section is given")]
    MissingViewport,

    /// A field holds a value outside its domain.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Dotted path of the field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The map cannot hold the requested entities.
    #[error("map too small: entities need {required} cells, map offers {available}")]
    MapCapacity {
        /// Cells the requested entities cover.
        required: u64,
        /// Cells available for spawning.
        available: u64,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `survivalbox-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Map generation settings.
    #[serde(default)]
    pub world: WorldConfig,

    /// Survivor settings.
    #[serde(default)]
    pub agents: AgentsConfig,

    /// NPC counts.
    #[serde(default)]
    pub npcs: NpcConfig,

    /// Reward table.
    #[serde(default)]
    pub rewards: RewardsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Episode runner settings.
    #[serde(default)]
    pub engine: EngineConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The result is not validated; call [`Self::validate`] before use.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Check every field against its domain and the map against the
    /// footprint of everything that has to be spawned on it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let agents = self.agents.count;
        if !(1..=MAX_AGENTS).contains(&agents) {
            return Err(ConfigError::AgentCount { given: agents });
        }
        let viewport = self.agents.viewport.ok_or(ConfigError::MissingViewport)?;
        viewport.to_viewport()?;

        let world = &self.world;
        if world.width < 3 || world.height < 3 {
            return Err(ConfigError::InvalidValue {
                field: "world.width/world.height",
                reason: format!(
                    "both axes must be at least 3, got {}x{}",
                    world.width, world.height
                ),
            });
        }
        if world.tile_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "world.tile_size",
                reason: "must be at least 1".to_owned(),
            });
        }
        if !(0.0..=1.0).contains(&world.water_percentage) {
            return Err(ConfigError::InvalidValue {
                field: "world.water_percentage",
                reason: format!("must lie in [0, 1], got {}", world.water_percentage),
            });
        }
        if !self.agents.life.is_finite() || self.agents.life <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "agents.life",
                reason: format!("must be positive, got {}", self.agents.life),
            });
        }

        let required = self.required_cells();
        let available = u64::from(world.width.saturating_sub(1))
            .saturating_mul(u64::from(world.height.saturating_sub(1)));
        if required >= available {
            return Err(ConfigError::MapCapacity {
                required,
                available,
            });
        }
        Ok(())
    }

    /// Cells covered by every survivor and NPC at spawn.
    pub fn required_cells(&self) -> u64 {
        let npcs = &self.npcs;
        u64::from(self.agents.count)
            .saturating_add(u64::from(npcs.sheep).saturating_mul(2))
            .saturating_add(u64::from(npcs.wolves).saturating_mul(2))
            .saturating_add(u64::from(npcs.fires).saturating_mul(16))
    }
}

/// Map generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Map width in cells, border included.
    #[serde(default = "default_grid_size")]
    pub width: u32,

    /// Map height in cells, border included.
    #[serde(default = "default_grid_size")]
    pub height: u32,

    /// Edge length of a tile in observation pixels.
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,

    /// Heights at or below this fraction become water.
    #[serde(default = "default_water_percentage")]
    pub water_percentage: f64,

    /// Seed of the simulation random number generator.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of noise octaves.
    #[serde(default = "default_noise_octaves")]
    pub noise_octaves: u32,

    /// Generate a new map on every episode reset.
    #[serde(default)]
    pub always_new_map: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: default_grid_size(),
            height: default_grid_size(),
            tile_size: default_tile_size(),
            water_percentage: default_water_percentage(),
            seed: default_seed(),
            noise_octaves: default_noise_octaves(),
            always_new_map: false,
        }
    }
}

/// Survivor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentsConfig {
    /// Number of survivors (1 to 3).
    #[serde(default = "default_agent_count")]
    pub count: u32,

    /// Starting energy of every survivor.
    #[serde(default = "default_agent_life")]
    pub life: f64,

    /// Whether survivors may turn in place.
    #[serde(default)]
    pub turn_actions: bool,

    /// Observation extents. Required whenever an `agents` section is given.
    #[serde(default)]
    pub viewport: Option<ViewportConfig>,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            count: default_agent_count(),
            life: default_agent_life(),
            turn_actions: false,
            viewport: Some(ViewportConfig::default()),
        }
    }
}

/// Survivor observation extents, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Cells visible to the left.
    pub left: u32,
    /// Cells visible to the right.
    pub right: u32,
    /// Cells visible ahead.
    pub front: u32,
    /// Cells visible behind.
    pub back: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            left: 5,
            right: 5,
            front: 10,
            back: 2,
        }
    }
}

impl ViewportConfig {
    /// Convert into the entity-level viewport.
    pub fn to_viewport(self) -> Result<ViewPort, ConfigError> {
        let convert = |field: &'static str, value: u32| {
            i32::try_from(value).ok().filter(|v| *v <= 4096).ok_or_else(|| {
                ConfigError::InvalidValue {
                    field,
                    reason: format!("extent {value} is out of range"),
                }
            })
        };
        Ok(ViewPort::new(
            convert("agents.viewport.left", self.left)?,
            convert("agents.viewport.right", self.right)?,
            convert("agents.viewport.front", self.front)?,
            convert("agents.viewport.back", self.back)?,
        ))
    }
}

/// NPC counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcConfig {
    /// Number of sheep.
    #[serde(default = "default_one")]
    pub sheep: u32,

    /// Number of wolves.
    #[serde(default = "default_one")]
    pub wolves: u32,

    /// Number of fireplaces.
    #[serde(default = "default_one")]
    pub fires: u32,
}

impl Default for NpcConfig {
    fn default() -> Self {
        Self {
            sheep: 1,
            wolves: 1,
            fires: 1,
        }
    }
}

/// Reward table.
///
/// `positive`, `negative` and `win` are not produced by the simulation
/// itself; they are carried for learning harnesses that shape rewards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardsConfig {
    /// Generic positive reward.
    #[serde(default = "default_positive")]
    pub positive: f64,
    /// Generic negative reward.
    #[serde(default = "default_negative")]
    pub negative: f64,
    /// Added to every living survivor each tick.
    #[serde(default)]
    pub tick: f64,
    /// Applied once when a survivor dies.
    #[serde(default = "default_loss")]
    pub loss: f64,
    /// Episode win reward.
    #[serde(default = "default_win")]
    pub win: f64,
    /// Eating a grass tile.
    #[serde(default = "default_positive")]
    pub grass: f64,
    /// Shepherding a sheep for a tick.
    #[serde(default = "default_positive")]
    pub sheep: f64,
    /// Guarding a lit fire for a tick.
    #[serde(default = "default_positive")]
    pub fire: f64,
    /// Catching a wolf.
    #[serde(default = "default_positive")]
    pub wolf: f64,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            positive: default_positive(),
            negative: default_negative(),
            tick: 0.0,
            loss: default_loss(),
            win: default_win(),
            grass: default_positive(),
            sheep: default_positive(),
            fire: default_positive(),
            wolf: default_positive(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Episode runner configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Episodes to play.
    #[serde(default = "default_episodes")]
    pub episodes: u32,

    /// Tick limit per episode.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            episodes: default_episodes(),
            max_ticks: default_max_ticks(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_grid_size() -> u32 {
    50
}

const fn default_tile_size() -> u32 {
    8
}

const fn default_water_percentage() -> f64 {
    0.5
}

const fn default_seed() -> u64 {
    24
}

const fn default_noise_octaves() -> u32 {
    8
}

const fn default_agent_count() -> u32 {
    2
}

const fn default_agent_life() -> f64 {
    999.0
}

const fn default_one() -> u32 {
    1
}

const fn default_positive() -> f64 {
    1.0
}

const fn default_negative() -> f64 {
    -1.0
}

const fn default_loss() -> f64 {
    -5.0
}

const fn default_win() -> f64 {
    5.0
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_episodes() -> u32 {
    3
}

const fn default_max_ticks() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.world.width, 50);
        assert_eq!(config.world.seed, 24);
        assert_eq!(config.agents.count, 2);
        assert_eq!(config.agents.viewport, Some(ViewportConfig::default()));
        assert_eq!(config.npcs.fires, 1);
        assert!((config.rewards.loss + 5.0).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = SimulationConfig::parse("");
        assert_eq!(config.ok(), Some(SimulationConfig::default()));
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
world:
  width: 30
  height: 20
  tile_size: 4
  water_percentage: 0.3
  seed: 7
  noise_octaves: 5
  always_new_map: true

agents:
  count: 3
  life: 150.0
  turn_actions: true
  viewport:
    left: 2
    right: 3
    front: 4
    back: 1

npcs:
  sheep: 2
  wolves: 0
  fires: 1

rewards:
  grass: 2.0
  loss: -10.0

logging:
  level: debug

engine:
  episodes: 1
  max_ticks: 50
";
        let config = SimulationConfig::parse(yaml);
        assert!(config.is_ok());
        let Some(config) = config.ok() else { return };
        assert_eq!(config.world.width, 30);
        assert!(config.world.always_new_map);
        assert_eq!(config.agents.count, 3);
        assert!(config.agents.turn_actions);
        assert_eq!(
            config.agents.viewport.map(ViewportConfig::to_viewport).and_then(Result::ok),
            Some(ViewPort::new(2, 3, 4, 1))
        );
        assert_eq!(config.npcs.sheep, 2);
        assert!((config.rewards.grass - 2.0).abs() < f64::EPSILON);
        // Unset rewards keep their defaults.
        assert!((config.rewards.wolf - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.engine.max_ticks, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn agents_section_without_viewport_is_rejected() {
        let config = SimulationConfig::parse("agents:\n  count: 1\n");
        assert!(config.is_ok());
        let result = config.ok().map(|c| c.validate());
        assert!(matches!(result, Some(Err(ConfigError::MissingViewport))));
    }

    #[test]
    fn agent_count_is_bounded() {
        for count in [0, 4] {
            let mut config = SimulationConfig::default();
            config.agents.count = count;
            assert!(matches!(
                config.validate(),
                Err(ConfigError::AgentCount { given }) if given == count
            ));
        }
    }

    #[test]
    fn water_percentage_is_bounded() {
        let mut config = SimulationConfig::default();
        config.world.water_percentage = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "world.water_percentage",
                ..
            })
        ));
    }

    #[test]
    fn crowded_map_is_rejected() {
        let mut config = SimulationConfig::default();
        config.world.width = 6;
        config.world.height = 6;
        config.npcs.fires = 2;
        // 2 + 2 + 2 + 32 = 38 cells against 25.
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MapCapacity {
                required: 38,
                available: 25
            })
        ));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = SimulationConfig::parse("world: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }
}
