//! Row-oriented views of the population, for observers and exporters.

use epi_core::{AgentId, EpiState, RecoveryVector, Tick, Vec2};

/// One agent's state in the classic 15-column layout:
///
/// `id, x, y, heading_x, heading_y, speed, state, age, infection_frame,
/// recovery_vector, in_treatment, active_destination, at_destination,
/// wander_x, wander_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentRecord {
    pub id:                 AgentId,
    pub x:                  f64,
    pub y:                  f64,
    pub heading_x:          f64,
    pub heading_y:          f64,
    pub speed:              f64,
    pub state:              EpiState,
    pub age:                f64,
    /// `None` if the agent was never infected.
    pub infection_frame:    Option<Tick>,
    pub recovery_vector:    RecoveryVector,
    pub in_treatment:       bool,
    pub active_destination: Option<Vec2>,
    pub at_destination:     bool,
    /// Wander bounds along x, `[min, max]`.
    pub wander_x:           [f64; 2],
    /// Wander bounds along y, `[min, max]`.
    pub wander_y:           [f64; 2],
}

impl AgentRecord {
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// The full table at one tick.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationSnapshot {
    /// Driver tick within the run that produced this snapshot.
    pub tick:    Tick,
    /// Population frame (monotonic across runs).
    pub frame:   Tick,
    pub records: Vec<AgentRecord>,
}

impl PopulationSnapshot {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of agents in `state`.
    pub fn count_in(&self, state: EpiState) -> usize {
        self.records.iter().filter(|r| r.state == state).count()
    }
}
