//! Error types for the engine binary.

/// Top-level error for the engine binary.
///
/// Wraps every failure mode of startup and episode execution so `main`
/// can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: survivalbox_core::ConfigError,
    },

    /// The simulation could not be built or stepped.
    #[error("simulation error: {source}")]
    Simulation {
        /// The underlying simulation error.
        #[from]
        source: survivalbox_core::SimulationError,
    },

    /// The policy had no action to choose from.
    #[error("no actions available")]
    NoActions,
}
