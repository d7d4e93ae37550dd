//! Action policies for headless runs.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use survivalbox_types::AgentAction;

use crate::error::EngineError;

/// Picks every agent's action uniformly from the available set.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    /// A policy with its own seeded generator.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// One action per agent.
    pub fn actions(
        &mut self,
        available: &[AgentAction],
        agents: usize,
    ) -> Result<Vec<AgentAction>, EngineError> {
        (0..agents)
            .map(|_| available.choose(&mut self.rng).copied().ok_or(EngineError::NoActions))
            .collect()
    }
}
