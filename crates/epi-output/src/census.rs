//! Classification of a population into per-state id lists.

use std::fmt;

use epi_core::{AgentId, EpiState};
use epi_population::Population;

/// Agent ids grouped by epidemic state, each list in ascending id order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateBuckets {
    buckets: [Vec<AgentId>; 5],
}

impl StateBuckets {
    pub fn from_population(pop: &Population) -> Self {
        let mut out = Self::default();
        for (id, state) in pop.agent_ids().zip(&pop.state) {
            out.buckets[state.tag() as usize].push(id);
        }
        out
    }

    pub fn ids(&self, state: EpiState) -> &[AgentId] {
        &self.buckets[state.tag() as usize]
    }

    pub fn len(&self, state: EpiState) -> usize {
        self.buckets[state.tag() as usize].len()
    }

    /// Total number of classified agents.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// `(state, ids)` pairs in state-tag order.
    pub fn iter(&self) -> impl Iterator<Item = (EpiState, &[AgentId])> {
        EpiState::ALL.iter().map(move |&s| (s, self.ids(s)))
    }
}

impl fmt::Display for StateBuckets {
    /// `healthy=… sick=… immune=… dead=… infectious=…`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (state, ids) in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{state}={}", ids.len())?;
        }
        Ok(())
    }
}
