//! Disease course: transmission parameters, incubation, and the outcome
//! schedule fixed at infection time.

use epi_core::config::{positive, probability};
use epi_core::{AgentRng, Config, EpiError, EpiResult, RecoveryVector, Tick};

use crate::MortalityModel;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DiseaseCourse {
    pub infection_range:  f64,
    pub infection_chance: f64,
    pub incubation_ticks: u64,
    /// Sickness length bounds `[min, max]`, inclusive.
    pub recovery_min:     u64,
    pub recovery_max:     u64,
    pub mortality:        MortalityModel,
}

impl DiseaseCourse {
    pub fn from_config(config: &Config) -> EpiResult<Self> {
        if config.incubation_ticks == 0 {
            return Err(EpiError::config("incubation_ticks", "must be at least 1 tick"));
        }
        let [recovery_min, recovery_max] = config.recovery_duration;
        if recovery_min == 0 || recovery_min > recovery_max {
            return Err(EpiError::config(
                "recovery_duration",
                format!("[{recovery_min}, {recovery_max}] must satisfy 1 <= min <= max"),
            ));
        }
        Ok(Self {
            infection_range:  positive("infection_range", config.infection_range)?,
            infection_chance: probability("infection_chance", config.infection_chance)?,
            incubation_ticks: config.incubation_ticks,
            recovery_min,
            recovery_max,
            mortality:        MortalityModel::from_config(config)?,
        })
    }

    /// Schedule the outcome for an agent of `age` infected at `now`.
    ///
    /// The outcome lands strictly after the agent becomes sick, so every
    /// infected agent passes through `Sick` for at least one tick.
    pub fn schedule(&self, now: Tick, age: f64, rng: &mut AgentRng) -> RecoveryVector {
        let sick_for = rng.gen_range(self.recovery_min..=self.recovery_max);
        RecoveryVector {
            outcome_tick: now.offset(self.incubation_ticks + sick_for),
            base_risk:    self.mortality.risk_for_age(age),
            fate_draw:    rng.random::<f64>(),
        }
    }

    /// Has an agent infected at `infection_frame` finished incubating?
    #[inline]
    pub fn incubation_over(&self, infection_frame: Tick, now: Tick) -> bool {
        !infection_frame.is_never() && now.since(infection_frame) >= self.incubation_ticks
    }

    /// Transmission test for one source/target pair.
    #[inline]
    pub fn transmits(&self, rng: &mut AgentRng) -> bool {
        rng.gen_bool(self.infection_chance)
    }
}
