//! `epi-core`: foundational types for the `rust_epi` epidemic engine.
//!
//! This crate is a dependency of every other `epi-*` crate.  It has no
//! `epi-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `ListenerId`                               |
//! | [`geo`]         | `Vec2`, `Bounds` (world / wander rectangles)          |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`state`]       | `EpiState`, `RecoveryVector`                          |
//! | [`config`]      | `Config`, `RiskCurve`, `DisplaySettings`              |
//! | [`error`]       | `EpiError`, `EpiResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod state;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{Config, DisplaySettings, RiskCurve};
pub use error::{EpiError, EpiResult};
pub use geo::{Bounds, Vec2};
pub use ids::{AgentId, ListenerId};
pub use rng::{AgentRng, SimRng};
pub use state::{EpiState, RecoveryVector};
pub use time::{SimClock, Tick};
