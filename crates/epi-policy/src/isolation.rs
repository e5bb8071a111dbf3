//! Self-isolation: a permanently confined cohort.

use epi_core::config::probability;
use epi_core::{Bounds, Config, EpiResult, SimRng, Vec2};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SelfIsolationPolicy {
    /// Fraction of the population confined to `bounds`.
    pub proportion:        f64,
    pub bounds:            Bounds,
    /// When `false`, an isolating agent only exchanges infections with agents
    /// standing inside its own bounds.
    pub traveling_infects: bool,
}

impl SelfIsolationPolicy {
    /// `None` when self-isolation is off.
    pub fn from_config(config: &Config) -> EpiResult<Option<Self>> {
        if !config.self_isolate {
            return Ok(None);
        }
        Ok(Some(Self {
            proportion:        probability("self_isolate_proportion", config.self_isolate_proportion)?,
            bounds:            config.isolation_rect()?,
            traveling_infects: config.traveling_infects,
        }))
    }

    pub fn cohort_size(&self, n: usize) -> usize {
        ((self.proportion * n as f64).round() as usize).min(n)
    }

    /// Isolation flag per agent, exactly `cohort_size(n)` of them set.
    pub fn select_cohort(&self, n: usize, rng: &mut SimRng) -> Vec<bool> {
        let mut flags = vec![false; n];
        for i in rng.sample_indices(n, self.cohort_size(n)) {
            flags[i] = true;
        }
        flags
    }

    /// Wander bounds for an agent, given its cohort flag.
    #[inline]
    pub fn wander_bounds(&self, isolating: bool, world: Bounds) -> Bounds {
        if isolating { self.bounds } else { world }
    }

    /// May an isolating agent with `own_bounds` exchange an infection with
    /// an agent standing at `other`?
    #[inline]
    pub fn permits_contact(&self, own_bounds: &Bounds, other: Vec2) -> bool {
        self.traveling_infects || own_bounds.contains(other)
    }
}
