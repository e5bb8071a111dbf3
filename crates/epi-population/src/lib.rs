//! `epi-population`: Structure-of-Arrays agent storage for `rust_epi`.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`store`]   | `Population` (SoA columns), `AgentRngs` (per-agent RNG)       |
//! | [`builder`] | `PopulationBuilder`: `population_init` from a `Config`       |
//! | [`record`]  | `AgentRecord` (15-field row view), `PopulationSnapshot`       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|---------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on record types.      |

pub mod builder;
pub mod record;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::PopulationBuilder;
pub use record::{AgentRecord, PopulationSnapshot};
pub use store::{AgentRngs, Population};
