//! `population_init`: build a fresh [`Population`] + [`AgentRngs`] from a
//! [`Config`].
//!
//! # Usage
//!
//! ```rust
//! use epi_core::Config;
//! use epi_population::PopulationBuilder;
//!
//! let mut config = Config::default();
//! config.pop_size = 500;
//! config.seed = Some(42);
//!
//! let (pop, rngs) = PopulationBuilder::new(&config).build().unwrap();
//! assert_eq!(pop.count, 500);
//! assert_eq!(rngs.len(), 500);
//! ```
//!
//! # Draw order
//!
//! All initialization draws come from one `SimRng` seeded with the global
//! seed, in this fixed order: ages, isolation cohort, positions, headings,
//! lockdown cohort, patient zeros.  Outcome schedules for patient zeros are
//! drawn from each agent's own `AgentRng`.  Changing the order changes every
//! seeded run.

use epi_core::{AgentId, Config, EpiError, EpiResult, EpiState, SimRng, Tick};
use epi_policy::Interventions;
use tracing::debug;

use crate::{AgentRngs, Population};

/// Rejection attempts for the truncated age normal before falling back to
/// clamping.
const AGE_REDRAWS: usize = 16;

/// Builds the population described by a [`Config`].
pub struct PopulationBuilder<'a> {
    config: &'a Config,
    seed:   Option<u64>,
}

impl<'a> PopulationBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config, seed: config.seed }
    }

    /// Override the configured seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Construct the population.
    ///
    /// Fails with [`EpiError::Config`] if any field read during
    /// initialization is out of range.
    pub fn build(self) -> EpiResult<(Population, AgentRngs)> {
        let cfg = self.config;
        let n = cfg.population_size()?;
        let age_std = age_spread(cfg)?;
        let policies = Interventions::from_config(cfg)?;

        let seed = self.seed.unwrap_or_else(SimRng::entropy_seed);
        let mut rng = SimRng::new(seed);
        let mut pop = Population::new(n, seed, policies.world);
        let mut rngs = AgentRngs::new(n, seed);

        for age in pop.age.iter_mut() {
            *age = draw_age(&mut rng, cfg.mean_age, age_std, cfg.max_age);
        }

        if let Some(isolation) = &policies.isolation {
            pop.self_isolating = isolation.select_cohort(n, &mut rng);
            for (bounds, &isolating) in pop.wander_bounds.iter_mut().zip(&pop.self_isolating) {
                *bounds = isolation.wander_bounds(isolating, policies.world);
            }
        }

        for (pos, bounds) in pop.position.iter_mut().zip(&pop.wander_bounds) {
            *pos = rng.point_in(bounds);
        }
        for heading in pop.heading.iter_mut() {
            *heading = rng.heading();
        }
        pop.speed.fill(policies.speed.agent_speed);

        if let Some(lockdown) = &policies.lockdown {
            pop.lockdown_eligible = lockdown.select_cohort(n, &mut rng);
        }

        let seeded = rng.sample_indices(n, cfg.initial_infections);
        for &i in &seeded {
            let id = AgentId(i as u32);
            pop.state[i]           = EpiState::Infectious;
            pop.infection_frame[i] = Tick::ZERO;
            pop.recovery[i]        = policies.course.schedule(Tick::ZERO, pop.age[i], rngs.get_mut(id));
        }

        debug!(
            agents      = n,
            seed,
            infected    = seeded.len(),
            lockdown    = pop.lockdown_eligible.iter().filter(|&&f| f).count(),
            isolating   = pop.self_isolating.iter().filter(|&&f| f).count(),
            agent_speed = policies.speed.agent_speed,
            "population initialized"
        );

        Ok((pop, rngs))
    }
}

/// Standard deviation of the age distribution: a third of the distance from
/// the mean to the maximum age.
fn age_spread(cfg: &Config) -> EpiResult<f64> {
    if !(cfg.max_age.is_finite() && cfg.max_age > 0.0) {
        return Err(EpiError::config("max_age", format!("{} must be finite and > 0", cfg.max_age)));
    }
    if !(0.0..=cfg.max_age).contains(&cfg.mean_age) {
        return Err(EpiError::config(
            "mean_age",
            format!("mean age {} must lie in [0, {}]", cfg.mean_age, cfg.max_age),
        ));
    }
    Ok((cfg.max_age - cfg.mean_age) / 3.0)
}

fn draw_age(rng: &mut SimRng, mean: f64, std_dev: f64, max: f64) -> f64 {
    for _ in 0..AGE_REDRAWS {
        let age = rng.normal(mean, std_dev);
        if (0.0..=max).contains(&age) {
            return age;
        }
    }
    rng.normal(mean, std_dev).clamp(0.0, max)
}
