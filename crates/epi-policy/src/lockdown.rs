//! Lockdown: a fixed cohort chosen at initialization, a fresh compliance draw
//! every tick.

use epi_core::config::probability;
use epi_core::{AgentRng, Config, EpiResult, SimRng};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LockdownPolicy {
    /// Fraction of the population that is lockdown-eligible.
    pub percentage: f64,
    /// Per-tick probability that an eligible agent stays put.
    pub compliance: f64,
}

impl LockdownPolicy {
    /// `None` when lockdown is off.
    pub fn from_config(config: &Config) -> EpiResult<Option<Self>> {
        if !config.lockdown {
            return Ok(None);
        }
        Ok(Some(Self {
            percentage: probability("lockdown_percentage", config.lockdown_percentage)?,
            compliance: probability("lockdown_compliance", config.lockdown_compliance)?,
        }))
    }

    /// Number of eligible agents in a population of `n`.
    pub fn cohort_size(&self, n: usize) -> usize {
        ((self.percentage * n as f64).round() as usize).min(n)
    }

    /// Eligibility flag per agent, exactly `cohort_size(n)` of them set.
    pub fn select_cohort(&self, n: usize, rng: &mut SimRng) -> Vec<bool> {
        let mut flags = vec![false; n];
        for i in rng.sample_indices(n, self.cohort_size(n)) {
            flags[i] = true;
        }
        flags
    }

    /// Does an eligible agent stay stationary this tick?
    #[inline]
    pub fn holds_still(&self, rng: &mut AgentRng) -> bool {
        rng.gen_bool(self.compliance)
    }
}
