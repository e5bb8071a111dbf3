//! `epi-policy`: configuration-to-behavior mappings.
//!
//! Every type here is built from a [`Config`](epi_core::Config) and is
//! read-only afterwards.  Policies never touch the population store; the
//! population builder and the stepper consult them.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`lockdown`]    | `LockdownPolicy`: stationary cohort                       |
//! | [`isolation`]   | `SelfIsolationPolicy`: confined cohort, contact filter    |
//! | [`interaction`] | `SpeedPolicy`: base vs. reduced-interaction speed         |
//! | [`healthcare`]  | `HealthcarePolicy`: capacity gate, treatment multipliers  |
//! | [`mortality`]   | `MortalityModel`: age ramp / flat base risk               |
//! | [`course`]      | `DiseaseCourse`: incubation and outcome scheduling        |
//!
//! [`Interventions::from_config`] reads the whole set.  A disabled
//! intervention is `None`; an enabled one with an invalid field fails with
//! `EpiError::Config` at that point.

pub mod course;
pub mod healthcare;
pub mod interaction;
pub mod isolation;
pub mod lockdown;
pub mod mortality;

#[cfg(test)]
mod tests;

pub use course::DiseaseCourse;
pub use healthcare::HealthcarePolicy;
pub use interaction::SpeedPolicy;
pub use isolation::SelfIsolationPolicy;
pub use lockdown::LockdownPolicy;
pub use mortality::MortalityModel;

use epi_core::{Bounds, Config, EpiResult};

/// Every policy the engine consults, read from one `Config`.
#[derive(Clone, Debug)]
pub struct Interventions {
    pub world:      Bounds,
    pub lockdown:   Option<LockdownPolicy>,
    pub isolation:  Option<SelfIsolationPolicy>,
    pub speed:      SpeedPolicy,
    pub healthcare: HealthcarePolicy,
    pub course:     DiseaseCourse,
}

impl Interventions {
    pub fn from_config(config: &Config) -> EpiResult<Self> {
        Ok(Self {
            world:      config.world_bounds()?,
            lockdown:   LockdownPolicy::from_config(config)?,
            isolation:  SelfIsolationPolicy::from_config(config)?,
            speed:      SpeedPolicy::from_config(config)?,
            healthcare: HealthcarePolicy::from_config(config)?,
            course:     DiseaseCourse::from_config(config)?,
        })
    }
}
