//! Simulation configuration.
//!
//! [`Config`] is a plain mutable record: every tunable parameter of the model
//! lives here and nothing is recomputed when a field changes.  Fields that
//! are baked into agents at creation (population size, ages, bounds, cohort
//! settings, speeds) only take effect after the next `population_init`.
//!
//! Validation is lazy.  Assigning an out-of-range value is allowed; the
//! policy that reads the field reports an [`EpiError::Config`].  Call
//! [`Config::validate`] to check everything at once.

use std::fmt;
use std::str::FromStr;

use crate::{AgentId, Bounds, EpiError, EpiResult};

// ── RiskCurve ─────────────────────────────────────────────────────────────────

/// Shape of the mortality ramp between `risk_age` and `critical_age`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RiskCurve {
    Linear,
    #[default]
    Quadratic,
    Exponential,
}

impl RiskCurve {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskCurve::Linear      => "linear",
            RiskCurve::Quadratic   => "quadratic",
            RiskCurve::Exponential => "exponential",
        }
    }
}

impl fmt::Display for RiskCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskCurve {
    type Err = EpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear"      => Ok(RiskCurve::Linear),
            "quadratic"   => Ok(RiskCurve::Quadratic),
            "exponential" => Ok(RiskCurve::Exponential),
            other => Err(EpiError::config(
                "risk_increase",
                format!("unknown curve {other:?} (expected linear, quadratic or exponential)"),
            )),
        }
    }
}

// ── DisplaySettings ───────────────────────────────────────────────────────────

/// Presentation preferences carried along for front-ends.  Never read by the
/// dynamics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplaySettings {
    pub plot_style:      String,
    pub colorblind_mode: bool,
    pub colorblind_type: String,
    /// Figure size `(width, height)` in inches.
    pub fig_size:        (f64, f64),
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            plot_style:      "default".to_owned(),
            colorblind_mode: false,
            colorblind_type: "deuteranopia".to_owned(),
            fig_size:        (5.0, 7.0),
        }
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

/// Every tunable parameter of the simulation.
///
/// `Config::default()` is a 2 000-agent population in the unit square with
/// no interventions active.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    // ── Run ───────────────────────────────────────────────────────────────
    /// Master RNG seed.  `None` draws a fresh seed from OS entropy at every
    /// `population_init`; the same seed always reproduces the same run.
    pub seed: Option<u64>,

    /// Ticks executed by one `run()`.
    pub simulation_steps: u64,

    /// Observers receive a population snapshot every N ticks.  0 disables
    /// per-tick snapshots.
    pub snapshot_interval: u64,

    // ── Population ────────────────────────────────────────────────────────
    pub pop_size: usize,
    pub mean_age: f64,
    pub max_age:  f64,

    /// World rectangle, x axis `[min, max]`.
    pub xbounds: [f64; 2],
    /// World rectangle, y axis `[min, max]`.
    pub ybounds: [f64; 2],

    // ── Infection ─────────────────────────────────────────────────────────
    /// Agents seeded as infectious by `population_init`.
    pub initial_infections: usize,
    /// Contact radius for transmission.
    pub infection_range: f64,
    /// Per-contact, per-tick transmission probability.
    pub infection_chance: f64,
    /// Ticks from infection until the agent becomes sick.
    pub incubation_ticks: u64,
    /// Sickness length `[min, max]` in ticks, drawn uniformly per agent.
    pub recovery_duration: [u64; 2],

    // ── Mortality ─────────────────────────────────────────────────────────
    /// Flat mortality used when `age_dependent_risk` is off.
    pub mortality_chance: f64,
    pub age_dependent_risk: bool,
    /// Age where the mortality ramp starts.
    pub risk_age: f64,
    /// Age at and beyond which mortality reaches `critical_mortality_chance`.
    pub critical_age: f64,
    pub critical_mortality_chance: f64,
    pub risk_increase: RiskCurve,
    /// Shape parameter `k` of the exponential ramp `(e^{kt} - 1) / (e^k - 1)`.
    pub exponential_steepness: f64,

    // ── Healthcare ────────────────────────────────────────────────────────
    /// Simultaneous treatment slots.  0 means nobody is ever treated.
    pub healthcare_capacity: usize,
    pub treatment_dependent_risk: bool,
    /// Mortality multiplier while in treatment.
    pub treatment_factor: f64,
    /// Mortality multiplier while sick and untreated.
    pub no_treatment_factor: f64,

    // ── Movement ──────────────────────────────────────────────────────────
    /// Per-tick displacement without reduced interaction.
    pub base_speed: f64,
    /// Per-tick chance that a wandering agent picks a new heading.
    pub heading_change_chance: f64,

    // ── Lockdown ──────────────────────────────────────────────────────────
    pub lockdown: bool,
    /// Fraction of agents in the lockdown cohort.
    pub lockdown_percentage: f64,
    /// Per-tick fraction of the cohort that stays put.
    pub lockdown_compliance: f64,

    // ── Self-isolation ────────────────────────────────────────────────────
    pub self_isolate: bool,
    /// Fraction of agents confined to `isolation_bounds`.
    pub self_isolate_proportion: f64,
    /// `[x_min, y_min, x_max, y_max]`.
    pub isolation_bounds: [f64; 4],
    /// Whether isolating agents can infect agents outside their bounds.
    pub traveling_infects: bool,

    // ── Reduced interaction ───────────────────────────────────────────────
    pub reduced_interaction: bool,
    /// Movement cap applied to every agent under reduced interaction.
    pub speed: f64,

    // ── Display ───────────────────────────────────────────────────────────
    pub display: DisplaySettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed:              None,
            simulation_steps:  10_000,
            snapshot_interval: 1,

            pop_size: 2_000,
            mean_age: 45.0,
            max_age:  105.0,
            xbounds:  [0.0, 1.0],
            ybounds:  [0.0, 1.0],

            initial_infections: 1,
            infection_range:    0.01,
            infection_chance:   0.03,
            incubation_ticks:   20,
            recovery_duration:  [200, 500],

            mortality_chance:          0.02,
            age_dependent_risk:        true,
            risk_age:                  55.0,
            critical_age:              75.0,
            critical_mortality_chance: 0.1,
            risk_increase:             RiskCurve::Quadratic,
            exponential_steepness:     4.0,

            healthcare_capacity:      300,
            treatment_dependent_risk: true,
            treatment_factor:         0.5,
            no_treatment_factor:      3.0,

            base_speed:            0.01,
            heading_change_chance: 0.02,

            lockdown:            false,
            lockdown_percentage: 0.1,
            lockdown_compliance: 0.95,

            self_isolate:            false,
            self_isolate_proportion: 0.6,
            isolation_bounds:        [0.02, 0.02, 0.1, 0.98],
            traveling_infects:       false,

            reduced_interaction: false,
            speed:               0.001,

            display: DisplaySettings::default(),
        }
    }
}

/// Check that `value` is a probability.
pub fn probability(field: &'static str, value: f64) -> EpiResult<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(EpiError::config(field, format!("{value} is not a probability in [0, 1]")))
    }
}

/// Check that `value` is finite and strictly positive.
pub fn positive(field: &'static str, value: f64) -> EpiResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EpiError::config(field, format!("{value} must be finite and > 0")))
    }
}

/// Check that `value` is finite and non-negative.
pub fn non_negative(field: &'static str, value: f64) -> EpiResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(EpiError::config(field, format!("{value} must be finite and >= 0")))
    }
}

impl Config {
    // ── Grouped setters ───────────────────────────────────────────────────

    /// Enable lockdown with a coherent pair of parameters.
    pub fn set_lockdown(&mut self, lockdown_percentage: f64, lockdown_compliance: f64) {
        self.lockdown            = true;
        self.lockdown_percentage = lockdown_percentage;
        self.lockdown_compliance = lockdown_compliance;
    }

    /// Enable self-isolation.  `isolation_bounds` is
    /// `[x_min, y_min, x_max, y_max]`.
    pub fn set_self_isolation(
        &mut self,
        self_isolate_proportion: f64,
        isolation_bounds:        [f64; 4],
        traveling_infects:       bool,
    ) {
        self.self_isolate            = true;
        self.self_isolate_proportion = self_isolate_proportion;
        self.isolation_bounds        = isolation_bounds;
        self.traveling_infects       = traveling_infects;
    }

    /// Enable reduced interaction: every agent moves at `speed`.
    pub fn set_reduced_interaction(&mut self, speed: f64) {
        self.reduced_interaction = true;
        self.speed               = speed;
    }

    /// Turn on the age-dependent mortality ramp.
    pub fn set_age_risk(
        &mut self,
        risk_age:                  f64,
        critical_age:              f64,
        critical_mortality_chance: f64,
        risk_increase:             RiskCurve,
    ) {
        self.age_dependent_risk        = true;
        self.risk_age                  = risk_age;
        self.critical_age              = critical_age;
        self.critical_mortality_chance = critical_mortality_chance;
        self.risk_increase             = risk_increase;
    }

    /// Switch every intervention off, keeping their parameters.
    pub fn clear_interventions(&mut self) {
        self.lockdown            = false;
        self.self_isolate        = false;
        self.reduced_interaction = false;
    }

    // ── Derived values ────────────────────────────────────────────────────

    /// The world rectangle.
    pub fn world_bounds(&self) -> EpiResult<Bounds> {
        Bounds::from_axes("xbounds/ybounds", self.xbounds, self.ybounds)
    }

    /// The self-isolation rectangle, which must lie inside the world.
    pub fn isolation_rect(&self) -> EpiResult<Bounds> {
        let rect  = Bounds::from_corners("isolation_bounds", self.isolation_bounds)?;
        let world = self.world_bounds()?;
        if !world.encloses(&rect) {
            return Err(EpiError::config(
                "isolation_bounds",
                format!("{rect} does not lie inside the world {world}"),
            ));
        }
        Ok(rect)
    }

    /// `pop_size`, checked to be non-zero and small enough that every agent
    /// gets an [`AgentId`].
    pub fn population_size(&self) -> EpiResult<usize> {
        let n = self.pop_size;
        if n == 0 {
            return Err(EpiError::config("pop_size", "population size must be > 0"));
        }
        if AgentId::try_from(n - 1).is_err() {
            return Err(EpiError::config(
                "pop_size",
                format!("{n} agents exceed the id space of {}", u32::MAX as u64 + 1),
            ));
        }
        Ok(n)
    }

    /// Check every range invariant.  Policies perform the same checks on
    /// the fields they read; this is the all-at-once variant.
    pub fn validate(&self) -> EpiResult<()> {
        self.population_size()?;
        non_negative("mean_age", self.mean_age)?;
        positive("max_age", self.max_age)?;
        if self.mean_age > self.max_age {
            return Err(EpiError::config(
                "mean_age",
                format!("mean age {} exceeds max age {}", self.mean_age, self.max_age),
            ));
        }
        self.world_bounds()?;

        positive("infection_range", self.infection_range)?;
        probability("infection_chance", self.infection_chance)?;
        if self.incubation_ticks == 0 {
            return Err(EpiError::config("incubation_ticks", "must be at least 1 tick"));
        }
        let [lo, hi] = self.recovery_duration;
        if lo == 0 || lo > hi {
            return Err(EpiError::config(
                "recovery_duration",
                format!("[{lo}, {hi}] must satisfy 1 <= min <= max"),
            ));
        }

        probability("mortality_chance", self.mortality_chance)?;
        probability("critical_mortality_chance", self.critical_mortality_chance)?;
        if self.age_dependent_risk && self.risk_age >= self.critical_age {
            return Err(EpiError::config(
                "risk_age",
                format!("risk age {} must be below critical age {}", self.risk_age, self.critical_age),
            ));
        }
        positive("exponential_steepness", self.exponential_steepness)?;

        non_negative("treatment_factor", self.treatment_factor)?;
        non_negative("no_treatment_factor", self.no_treatment_factor)?;

        positive("base_speed", self.base_speed)?;
        probability("heading_change_chance", self.heading_change_chance)?;

        if self.lockdown {
            probability("lockdown_percentage", self.lockdown_percentage)?;
            probability("lockdown_compliance", self.lockdown_compliance)?;
        }
        if self.self_isolate {
            probability("self_isolate_proportion", self.self_isolate_proportion)?;
            self.isolation_rect()?;
        }
        if self.reduced_interaction {
            positive("speed", self.speed)?;
        }
        Ok(())
    }

    // ── Name-based access ─────────────────────────────────────────────────

    /// `(name, value)` pairs for every dynamics-relevant field, in
    /// declaration order.  Used for printing the active configuration.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let seed = self.seed.map_or_else(|| "none".to_owned(), |s| s.to_string());
        vec![
            ("seed",                      seed),
            ("simulation_steps",          self.simulation_steps.to_string()),
            ("snapshot_interval",         self.snapshot_interval.to_string()),
            ("pop_size",                  self.pop_size.to_string()),
            ("mean_age",                  self.mean_age.to_string()),
            ("max_age",                   self.max_age.to_string()),
            ("xbounds",                   format!("{:?}", self.xbounds)),
            ("ybounds",                   format!("{:?}", self.ybounds)),
            ("initial_infections",        self.initial_infections.to_string()),
            ("infection_range",           self.infection_range.to_string()),
            ("infection_chance",          self.infection_chance.to_string()),
            ("incubation_ticks",          self.incubation_ticks.to_string()),
            ("recovery_duration",         format!("{:?}", self.recovery_duration)),
            ("mortality_chance",          self.mortality_chance.to_string()),
            ("age_dependent_risk",        self.age_dependent_risk.to_string()),
            ("risk_age",                  self.risk_age.to_string()),
            ("critical_age",              self.critical_age.to_string()),
            ("critical_mortality_chance", self.critical_mortality_chance.to_string()),
            ("risk_increase",             self.risk_increase.to_string()),
            ("exponential_steepness",     self.exponential_steepness.to_string()),
            ("healthcare_capacity",       self.healthcare_capacity.to_string()),
            ("treatment_dependent_risk",  self.treatment_dependent_risk.to_string()),
            ("treatment_factor",          self.treatment_factor.to_string()),
            ("no_treatment_factor",       self.no_treatment_factor.to_string()),
            ("base_speed",                self.base_speed.to_string()),
            ("heading_change_chance",     self.heading_change_chance.to_string()),
            ("lockdown",                  self.lockdown.to_string()),
            ("lockdown_percentage",       self.lockdown_percentage.to_string()),
            ("lockdown_compliance",       self.lockdown_compliance.to_string()),
            ("self_isolate",              self.self_isolate.to_string()),
            ("self_isolate_proportion",   self.self_isolate_proportion.to_string()),
            ("isolation_bounds",          format!("{:?}", self.isolation_bounds)),
            ("traveling_infects",         self.traveling_infects.to_string()),
            ("reduced_interaction",       self.reduced_interaction.to_string()),
            ("speed",                     self.speed.to_string()),
        ]
    }

    /// Update one scalar field by name from its textual value.
    ///
    /// Only parsing is checked here; range checks stay lazy like any other
    /// assignment.  Array-valued fields (`xbounds`, `isolation_bounds`, …)
    /// are set through their typed setters instead.
    pub fn set_field(&mut self, name: &str, value: &str) -> EpiResult<()> {
        fn parse<T: FromStr>(name: &str, value: &str) -> EpiResult<T> {
            value
                .trim()
                .parse()
                .map_err(|_| EpiError::Parse(format!("{name}: cannot parse {value:?}")))
        }

        match name {
            "seed" => {
                self.seed = match value.trim() {
                    "" | "none" => None,
                    v => Some(parse(name, v)?),
                }
            }
            "simulation_steps"          => self.simulation_steps = parse(name, value)?,
            "snapshot_interval"         => self.snapshot_interval = parse(name, value)?,
            "pop_size"                  => self.pop_size = parse(name, value)?,
            "mean_age"                  => self.mean_age = parse(name, value)?,
            "max_age"                   => self.max_age = parse(name, value)?,
            "initial_infections"        => self.initial_infections = parse(name, value)?,
            "infection_range"           => self.infection_range = parse(name, value)?,
            "infection_chance"          => self.infection_chance = parse(name, value)?,
            "incubation_ticks"          => self.incubation_ticks = parse(name, value)?,
            "mortality_chance"          => self.mortality_chance = parse(name, value)?,
            "age_dependent_risk"        => self.age_dependent_risk = parse(name, value)?,
            "risk_age"                  => self.risk_age = parse(name, value)?,
            "critical_age"              => self.critical_age = parse(name, value)?,
            "critical_mortality_chance" => self.critical_mortality_chance = parse(name, value)?,
            "risk_increase"             => self.risk_increase = value.parse()?,
            "exponential_steepness"     => self.exponential_steepness = parse(name, value)?,
            "healthcare_capacity"       => self.healthcare_capacity = parse(name, value)?,
            "treatment_dependent_risk"  => self.treatment_dependent_risk = parse(name, value)?,
            "treatment_factor"          => self.treatment_factor = parse(name, value)?,
            "no_treatment_factor"       => self.no_treatment_factor = parse(name, value)?,
            "base_speed"                => self.base_speed = parse(name, value)?,
            "heading_change_chance"     => self.heading_change_chance = parse(name, value)?,
            "lockdown"                  => self.lockdown = parse(name, value)?,
            "lockdown_percentage"       => self.lockdown_percentage = parse(name, value)?,
            "lockdown_compliance"       => self.lockdown_compliance = parse(name, value)?,
            "self_isolate"              => self.self_isolate = parse(name, value)?,
            "self_isolate_proportion"   => self.self_isolate_proportion = parse(name, value)?,
            "traveling_infects"         => self.traveling_infects = parse(name, value)?,
            "reduced_interaction"       => self.reduced_interaction = parse(name, value)?,
            "speed"                     => self.speed = parse(name, value)?,
            "plot_style"                => self.display.plot_style = value.trim().to_owned(),
            "colorblind_mode"           => self.display.colorblind_mode = parse(name, value)?,
            "colorblind_type"           => self.display.colorblind_type = value.trim().to_owned(),
            other => {
                return Err(EpiError::Parse(format!("unknown or non-scalar config field {other:?}")));
            }
        }
        Ok(())
    }
}
