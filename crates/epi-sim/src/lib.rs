//! `epi-sim`: simulation driver for the rust_epi engine.
//!
//! # Tick loop
//!
//! ```text
//! population_init()            build Population + AgentRngs from Config
//! run(observer):
//!   stepper = Stepper::from_config(config)      config errors surface here
//!   for tick in 0..simulation_steps:
//!     observer.keep_running()?                  abort between ticks only
//!     ① movement      (parallel with `parallel`)
//!     ② transmission  start-of-tick snapshot, ascending ids
//!     ③ progression   incubation, outcomes, admissions
//!     ④ verify        bounds, transitions, capacity
//!     observer.on_tick_end / on_snapshot
//!   return final PopulationSnapshot
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the movement phase on Rayon's thread pool.        |
//! | `serde`    | Serde derives on `Config` and snapshot types.          |
//!
//! # Quick-start
//!
//! ```rust
//! use epi_core::Config;
//! use epi_sim::{NoopObserver, Simulation};
//!
//! let mut config = Config::default();
//! config.pop_size = 200;
//! config.simulation_steps = 20;
//! config.seed = Some(1);
//!
//! let mut sim = Simulation::new(config);
//! sim.population_init().unwrap();
//! let last = sim.run(&mut NoopObserver).unwrap();
//! assert_eq!(last.len(), 200);
//! ```

pub mod builder;
pub mod environment;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::{Director, SimulationBuilder};
pub use environment::{Environment, Scenario, SimulationVariant};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, Publisher, SimObserver};
pub use sim::{Phase, Simulation};
