//! `epi-dynamics`: the per-tick agent model.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                   |
//! |------------------|------------------------------------------------------------|
//! | [`stepper`]      | `Stepper`: runs one tick, verifies invariants             |
//! | [`movement`]     | lockdown holds, destination seeking, billiard wandering    |
//! | [`contact`]      | `ContactIndex`: R-tree of susceptible agents              |
//! | [`transmission`] | proximity infections from the start-of-tick snapshot       |
//! | [`progression`]  | incubation, outcomes, treatment admissions                 |
//! | [`report`]       | `TickReport`, `StateCounts`, `Infection`                   |
//! | [`error`]        | `DynamicsError`, `DynamicsResult`                          |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                              |
//! |------------|-----------------------------------------------------|
//! | `parallel` | Movement phase runs on Rayon's global thread pool.  |

pub mod contact;
pub mod error;
pub mod movement;
pub mod progression;
pub mod report;
pub mod stepper;
pub mod transmission;


pub use contact::ContactIndex;
pub use error::{DynamicsError, DynamicsResult};
pub use movement::{Move, MovementRules};
pub use report::{Infection, StateCounts, TickReport};
pub use stepper::Stepper;
