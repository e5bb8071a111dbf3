//! Healthcare capacity and treatment-dependent mortality.
//!
//! Running out of beds is a modeled degradation, never an error: agents that
//! cannot be admitted carry the untreated multiplier.

use epi_core::config::non_negative;
use epi_core::{Config, EpiResult};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HealthcarePolicy {
    pub capacity:             usize,
    pub treatment_dependent:  bool,
    pub treatment_factor:     f64,
    pub no_treatment_factor:  f64,
}

impl HealthcarePolicy {
    pub fn from_config(config: &Config) -> EpiResult<Self> {
        Ok(Self {
            capacity:            config.healthcare_capacity,
            treatment_dependent: config.treatment_dependent_risk,
            treatment_factor:    non_negative("treatment_factor", config.treatment_factor)?,
            no_treatment_factor: non_negative("no_treatment_factor", config.no_treatment_factor)?,
        })
    }

    /// Is there a free slot given `currently_treated` patients?
    #[inline]
    pub fn admits(&self, currently_treated: usize) -> bool {
        currently_treated < self.capacity
    }

    /// Final death probability for a sick agent.
    pub fn effective_risk(&self, base_risk: f64, in_treatment: bool) -> f64 {
        let risk = if !self.treatment_dependent {
            base_risk
        } else if in_treatment {
            base_risk * self.treatment_factor
        } else {
            base_risk * self.no_treatment_factor
        };
        risk.clamp(0.0, 1.0)
    }
}
