//! Error types for the `survivalbox-core` crate.

use survivalbox_types::AgentId;
use survivalbox_world::WorldError;

use crate::config::ConfigError;

/// Errors raised while building or driving a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Map generation, placement or restoration failed.
    #[error(transparent)]
    World(#[from] WorldError),

    /// A map snapshot file could not be read or written.
    #[error("map file I/O failed: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// No survivor with this id exists.
    #[error("unknown agent {0}")]
    UnknownAgent(AgentId),

    /// Hand-placed entities do not form a valid population.
    #[error("invalid entity layout: {reason}")]
    InvalidLayout {
        /// What is wrong with the layout.
        reason: String,
    },

    /// `step` received the wrong number of actions.
    #[error("expected {expected} actions, got {given}")]
    ActionCount {
        /// Number of survivors.
        expected: usize,
        /// Number of actions supplied.
        given: usize,
    },
}
