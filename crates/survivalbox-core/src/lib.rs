//! Configuration, tick resolution and observations for SurvivalBox.
//!
//! This crate turns the world and entity crates into a runnable
//! simulation. [`Simulation`] is the entry point an RL harness drives:
//! `step` with one action per agent, read rewards and observations, and
//! `reset` between episodes.
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration and its validation.
//! - [`simulation`] -- The tick loop, episode control and map handling.
//! - [`resolve`] -- Per-kind collision and event resolution.
//! - [`observation`] -- Rasterizing, cropping and rotating agent views.
//! - [`error`] -- Error types for simulation operations.

pub mod config;
pub mod error;
pub mod observation;
pub mod resolve;
pub mod simulation;

pub use config::{ConfigError, SimulationConfig};
pub use error::SimulationError;
pub use observation::Frame;
pub use simulation::{Simulation, StepOutcome};
