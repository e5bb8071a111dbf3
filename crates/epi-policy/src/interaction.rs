//! Reduced interaction: one speed for everybody.

use epi_core::config::{positive, probability};
use epi_core::{Config, EpiResult};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpeedPolicy {
    /// Displacement per tick assigned to every agent at initialization.
    pub agent_speed: f64,
    /// Per-tick chance that a wandering agent turns.
    pub heading_change_chance: f64,
    pub reduced: bool,
}

impl SpeedPolicy {
    pub fn from_config(config: &Config) -> EpiResult<Self> {
        let agent_speed = if config.reduced_interaction {
            positive("speed", config.speed)?
        } else {
            positive("base_speed", config.base_speed)?
        };
        Ok(Self {
            agent_speed,
            heading_change_chance: probability("heading_change_chance", config.heading_change_chance)?,
            reduced: config.reduced_interaction,
        })
    }
}
