//! What happened during one tick.

use epi_core::{AgentId, EpiState, Tick};
use epi_population::Population;

/// One successful transmission.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Infection {
    pub source: AgentId,
    pub target: AgentId,
}

/// Head count per epidemic state, plus the treated count.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StateCounts {
    pub healthy:    usize,
    pub infectious: usize,
    pub sick:       usize,
    pub immune:     usize,
    pub dead:       usize,
    pub treated:    usize,
}

impl StateCounts {
    pub fn from_population(pop: &Population) -> Self {
        let mut counts = StateCounts::default();
        for (state, &treated) in pop.state.iter().zip(&pop.in_treatment) {
            match state {
                EpiState::Healthy    => counts.healthy += 1,
                EpiState::Infectious => counts.infectious += 1,
                EpiState::Sick       => counts.sick += 1,
                EpiState::Immune     => counts.immune += 1,
                EpiState::Dead       => counts.dead += 1,
            }
            if treated {
                counts.treated += 1;
            }
        }
        counts
    }

    pub fn get(&self, state: EpiState) -> usize {
        match state {
            EpiState::Healthy    => self.healthy,
            EpiState::Infectious => self.infectious,
            EpiState::Sick       => self.sick,
            EpiState::Immune     => self.immune,
            EpiState::Dead       => self.dead,
        }
    }

    pub fn total(&self) -> usize {
        self.healthy + self.infectious + self.sick + self.immune + self.dead
    }
}

/// Events of one tick, in the order the stepper produced them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Population frame the tick was processed at.
    pub frame:         Tick,
    pub infections:    Vec<Infection>,
    /// Infectious → Sick.
    pub became_sick:   Vec<AgentId>,
    pub recovered:     Vec<AgentId>,
    pub died:          Vec<AgentId>,
    pub admitted:      Vec<AgentId>,
    /// Released from treatment because capacity dropped below the patient
    /// count, highest id first.
    pub discharged:    Vec<AgentId>,
    /// Counts after the tick.
    pub counts:        StateCounts,
}

impl TickReport {
    /// `true` if no agent changed epidemic state or treatment status.
    pub fn is_quiet(&self) -> bool {
        self.infections.is_empty()
            && self.became_sick.is_empty()
            && self.recovered.is_empty()
            && self.died.is_empty()
            && self.admitted.is_empty()
            && self.discharged.is_empty()
    }
}
