//! Preset environments and intervention scenarios.
//!
//! An [`Environment`] decides *who* is simulated (population presets) and
//! carries out the two engine entry points; a [`Scenario`] decides *which
//! intervention* is active.  [`SimulationVariant`] pairs one simulation with
//! one environment and layers scenario and parameter tweaks on top.
//!
//! | Environment           | Population preset                                             |
//! |-----------------------|---------------------------------------------------------------|
//! | `HighDensity`         | 6000 agents, ages 45/105, risk 55→75, 10 %, quadratic         |
//! | `LowDensity`          | 500 agents, ages 20/55, risk 35→50, 10 %, exponential         |
//! | `PopulationDependent` | none; population knobs are set through the variant            |
//! | `ScenarioDependent`   | none; intervention knobs are set through the variant          |

use std::fmt;
use std::str::FromStr;

use epi_core::{Config, EpiError, RiskCurve};
use epi_population::PopulationSnapshot;

use crate::{SimObserver, SimResult, Simulation};

// ── Environment ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    HighDensity,
    LowDensity,
    PopulationDependent,
    ScenarioDependent,
}

impl Environment {
    /// Population size of the preset, if it has one.
    pub fn preset_size(self) -> Option<usize> {
        match self {
            Environment::HighDensity => Some(6_000),
            Environment::LowDensity  => Some(500),
            _                        => None,
        }
    }

    pub fn set_population_size(self, config: &mut Config) {
        if let Some(n) = self.preset_size() {
            config.pop_size = n;
        }
    }

    /// Age distribution and mortality ramp of the preset.
    pub fn set_population_variables(self, config: &mut Config) {
        match self {
            Environment::HighDensity => {
                config.mean_age = 45.0;
                config.max_age  = 105.0;
                config.set_age_risk(55.0, 75.0, 0.1, RiskCurve::Quadratic);
            }
            Environment::LowDensity => {
                config.mean_age = 20.0;
                config.max_age  = 55.0;
                config.set_age_risk(35.0, 50.0, 0.1, RiskCurve::Exponential);
            }
            Environment::PopulationDependent | Environment::ScenarioDependent => {}
        }
    }

    pub fn produce_population(self, simulation: &mut Simulation) -> SimResult<()> {
        simulation.population_init()
    }

    pub fn run_simulation<O: SimObserver>(
        self,
        simulation: &mut Simulation,
        observer:   &mut O,
    ) -> SimResult<PopulationSnapshot> {
        simulation.run(observer)
    }
}

// ── Scenario ──────────────────────────────────────────────────────────────────

/// Intervention presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Scenario {
    #[default]
    Baseline,
    Lockdown,
    SelfIsolation,
    ReducedInteraction,
}

impl Scenario {
    /// Switch the scenario's intervention on with its preset values.
    /// `Baseline` leaves the configuration untouched.
    pub fn apply(self, config: &mut Config) {
        match self {
            Scenario::Baseline           => {}
            Scenario::Lockdown           => config.set_lockdown(0.1, 0.9),
            Scenario::SelfIsolation      => config.set_self_isolation(0.9, [0.02, 0.02, 0.09, 0.98], false),
            Scenario::ReducedInteraction => config.set_reduced_interaction(0.001),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scenario::Baseline           => "baseline",
            Scenario::Lockdown           => "lockdown",
            Scenario::SelfIsolation      => "self-isolation",
            Scenario::ReducedInteraction => "reduced interaction",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = EpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['_', '-'], " ").as_str() {
            "" | "none" | "baseline"                  => Ok(Scenario::Baseline),
            "lockdown"                                => Ok(Scenario::Lockdown),
            "self isolation" | "isolation"            => Ok(Scenario::SelfIsolation),
            "reduced interaction" | "reduced"         => Ok(Scenario::ReducedInteraction),
            other => Err(EpiError::Parse(format!("unknown scenario {other:?}"))),
        }
    }
}

// ── SimulationVariant ─────────────────────────────────────────────────────────

/// One simulation bound to one environment.
///
/// ```rust,ignore
/// let mut v = SimulationVariant::new(Environment::LowDensity);
/// v.add_scenario(Scenario::Lockdown).no_healthcare();
/// let last = v.instantiate(&mut NoopObserver)?;
/// ```
pub struct SimulationVariant {
    simulation:  Simulation,
    environment: Environment,
}

impl SimulationVariant {
    pub fn new(environment: Environment) -> Self {
        Self::with_config(environment, Config::default())
    }

    pub fn with_config(environment: Environment, config: Config) -> Self {
        Self { simulation: Simulation::new(config), environment }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }

    pub fn config(&self) -> &Config {
        self.simulation.config()
    }

    fn cfg(&mut self) -> &mut Config {
        self.simulation.config_mut()
    }

    pub fn add_scenario(&mut self, scenario: Scenario) -> &mut Self {
        scenario.apply(self.cfg());
        self
    }

    /// Apply the environment presets, build the population and run.
    pub fn instantiate<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<PopulationSnapshot> {
        let env = self.environment;
        env.set_population_size(self.cfg());
        env.set_population_variables(self.cfg());
        env.produce_population(&mut self.simulation)?;
        env.run_simulation(&mut self.simulation, observer)
    }

    // ── Variant setters ───────────────────────────────────────────────────

    pub fn set_simulation_steps(&mut self, steps: u64) -> &mut Self {
        self.cfg().simulation_steps = steps;
        self
    }

    pub fn no_healthcare(&mut self) -> &mut Self {
        self.cfg().healthcare_capacity = 0;
        self
    }

    pub fn set_healthcare_capacity(&mut self, capacity: usize) -> &mut Self {
        self.cfg().healthcare_capacity = capacity;
        self
    }

    pub fn set_infection_chance(&mut self, chance: f64) -> &mut Self {
        self.cfg().infection_chance = chance;
        self
    }

    /// Lockdown parameters, without switching lockdown on.
    pub fn set_lockdown_variables(&mut self, percentage: f64, compliance: f64) -> &mut Self {
        let cfg = self.cfg();
        cfg.lockdown_percentage = percentage;
        cfg.lockdown_compliance = compliance;
        self
    }

    /// Self-isolation parameters, without switching it on.
    pub fn set_self_isolation_variables(
        &mut self,
        proportion:        f64,
        bounds:            [f64; 4],
        traveling_infects: bool,
    ) -> &mut Self {
        let cfg = self.cfg();
        cfg.self_isolate_proportion = proportion;
        cfg.isolation_bounds        = bounds;
        cfg.traveling_infects       = traveling_infects;
        self
    }

    /// Reduced-interaction speed, without switching it on.
    pub fn set_reduced_interaction_variables(&mut self, speed: f64) -> &mut Self {
        self.cfg().speed = speed;
        self
    }

    pub fn apply_lockdown(&mut self, percentage: f64, compliance: f64) -> &mut Self {
        self.cfg().set_lockdown(percentage, compliance);
        self
    }

    pub fn apply_self_isolation(&mut self, proportion: f64, bounds: [f64; 4], traveling_infects: bool) -> &mut Self {
        self.cfg().set_self_isolation(proportion, bounds, traveling_infects);
        self
    }

    pub fn apply_reduced_interaction(&mut self, speed: f64) -> &mut Self {
        self.cfg().set_reduced_interaction(speed);
        self
    }

    pub fn set_population_size(&mut self, pop_size: usize) -> &mut Self {
        self.cfg().pop_size = pop_size;
        self
    }

    pub fn set_population_age(&mut self, mean_age: f64, max_age: f64) -> &mut Self {
        let cfg = self.cfg();
        cfg.mean_age = mean_age;
        cfg.max_age  = max_age;
        self
    }

    pub fn enable_age_risk(
        &mut self,
        risk_age:                  f64,
        critical_age:              f64,
        critical_mortality_chance: f64,
        curve:                     RiskCurve,
    ) -> &mut Self {
        self.cfg().set_age_risk(risk_age, critical_age, critical_mortality_chance, curve);
        self
    }

    pub fn set_plot_style(&mut self, plot_style: &str) -> &mut Self {
        self.cfg().display.plot_style = plot_style.to_owned();
        self
    }

    pub fn set_colorblind(&mut self, mode: bool, colorblind_type: &str) -> &mut Self {
        let display = &mut self.cfg().display;
        display.colorblind_mode = mode;
        display.colorblind_type = colorblind_type.to_owned();
        self
    }
}
