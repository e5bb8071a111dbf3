//! Epidemic state machine and per-agent outcome scheduling record.

use std::fmt;

use crate::{EpiError, Tick};

/// Epidemic state of one agent.
///
/// The discriminants are the numeric tags used in snapshots:
/// `0 healthy, 1 sick, 2 immune, 3 dead, 4 infectious`.
///
/// Allowed edges: `Healthy → Infectious → Sick → {Immune, Dead}`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum EpiState {
    #[default]
    Healthy    = 0,
    Sick       = 1,
    Immune     = 2,
    Dead       = 3,
    Infectious = 4,
}

impl EpiState {
    /// All states in tag order.
    pub const ALL: [EpiState; 5] = [
        EpiState::Healthy,
        EpiState::Sick,
        EpiState::Immune,
        EpiState::Dead,
        EpiState::Infectious,
    ];

    #[inline]
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<EpiState> {
        EpiState::ALL.get(tag as usize).copied()
    }

    /// `Immune` and `Dead` never change again.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, EpiState::Immune | EpiState::Dead)
    }

    /// Can this agent infect others?
    #[inline]
    pub fn is_contagious(self) -> bool {
        matches!(self, EpiState::Infectious | EpiState::Sick)
    }

    /// `true` for every state an agent can reach once infected.
    #[inline]
    pub fn ever_infected(self) -> bool {
        !matches!(self, EpiState::Healthy)
    }

    /// Whether `self → next` is an edge of the state machine.  Staying in
    /// the same state is always allowed.
    pub fn can_become(self, next: EpiState) -> bool {
        use EpiState::*;
        self == next
            || matches!(
                (self, next),
                (Healthy, Infectious) | (Infectious, Sick) | (Sick, Immune) | (Sick, Dead)
            )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EpiState::Healthy    => "healthy",
            EpiState::Sick       => "sick",
            EpiState::Immune     => "immune",
            EpiState::Dead       => "dead",
            EpiState::Infectious => "infectious",
        }
    }
}

impl fmt::Display for EpiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EpiState {
    type Err = EpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EpiState::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EpiError::Parse(format!("unknown epidemic state {s:?}")))
    }
}

// ── RecoveryVector ────────────────────────────────────────────────────────────

/// Scheduled outcome of an infection, fixed at the moment of infection.
///
/// At `outcome_tick` a sick agent dies iff `fate_draw` is below its effective
/// mortality risk (`base_risk` adjusted for treatment at that moment),
/// otherwise it becomes immune.  Drawing the fate up front keeps the outcome
/// reproducible while still letting treatment status change it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecoveryVector {
    /// Population frame at which the sickness resolves.
    pub outcome_tick: Tick,
    /// Age-dependent (or flat) mortality before treatment multipliers.
    pub base_risk: f64,
    /// Uniform draw in `[0, 1)`.
    pub fate_draw: f64,
}

impl RecoveryVector {
    /// Value for agents that were never infected.
    pub const UNSCHEDULED: RecoveryVector = RecoveryVector {
        outcome_tick: Tick::NEVER,
        base_risk:    0.0,
        fate_draw:    1.0,
    };

    #[inline]
    pub fn is_scheduled(&self) -> bool {
        !self.outcome_tick.is_never()
    }

    /// Push the outcome to at least the tick after `onset`.
    #[inline]
    pub fn defer_past(&mut self, onset: Tick) {
        let earliest = onset.offset(1);
        if self.outcome_tick < earliest {
            self.outcome_tick = earliest;
        }
    }

    /// Outcome for a given effective risk.
    #[inline]
    pub fn resolve(&self, effective_risk: f64) -> EpiState {
        if self.fate_draw < effective_risk {
            EpiState::Dead
        } else {
            EpiState::Immune
        }
    }
}

impl Default for RecoveryVector {
    fn default() -> Self {
        RecoveryVector::UNSCHEDULED
    }
}
