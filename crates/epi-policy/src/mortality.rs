//! Age-dependent mortality.
//!
//! With `age_dependent_risk` the base risk is
//!
//! ```text
//!   0                                 age <  risk_age
//!   critical_chance · shape(t)        risk_age <= age < critical_age
//!   critical_chance                   age >= critical_age
//! ```
//!
//! where `t = (age - risk_age) / (critical_age - risk_age)` and `shape` is
//! `t`, `t²` or `(e^{kt} - 1) / (e^k - 1)`.  Every shape maps 0 → 0 and
//! 1 → 1, so the ramp is continuous at both ends.  Without age dependence the
//! flat `mortality_chance` applies to everybody.

use epi_core::config::{positive, probability};
use epi_core::{Config, EpiError, EpiResult, RiskCurve};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MortalityModel {
    pub age_dependent:   bool,
    pub risk_age:        f64,
    pub critical_age:    f64,
    pub critical_chance: f64,
    pub curve:           RiskCurve,
    pub steepness:       f64,
    pub base_chance:     f64,
}

impl MortalityModel {
    pub fn from_config(config: &Config) -> EpiResult<Self> {
        let model = Self {
            age_dependent:   config.age_dependent_risk,
            risk_age:        config.risk_age,
            critical_age:    config.critical_age,
            critical_chance: probability("critical_mortality_chance", config.critical_mortality_chance)?,
            curve:           config.risk_increase,
            steepness:       positive("exponential_steepness", config.exponential_steepness)?,
            base_chance:     probability("mortality_chance", config.mortality_chance)?,
        };
        if model.age_dependent && model.risk_age >= model.critical_age {
            return Err(EpiError::config(
                "risk_age",
                format!(
                    "risk age {} must be below critical age {}",
                    model.risk_age, model.critical_age
                ),
            ));
        }
        Ok(model)
    }

    /// Ramp shape on `t ∈ [0, 1]`.
    pub fn shape(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self.curve {
            RiskCurve::Linear      => t,
            RiskCurve::Quadratic   => t * t,
            RiskCurve::Exponential => {
                let k = self.steepness;
                (k * t).exp_m1() / k.exp_m1()
            }
        }
    }

    /// Base mortality risk for an agent of `age`, before treatment.
    pub fn risk_for_age(&self, age: f64) -> f64 {
        if !self.age_dependent {
            return self.base_chance;
        }
        if age < self.risk_age {
            0.0
        } else if age >= self.critical_age {
            self.critical_chance
        } else {
            let t = (age - self.risk_age) / (self.critical_age - self.risk_age);
            self.critical_chance * self.shape(t)
        }
    }
}
