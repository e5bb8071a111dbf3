//! Step-by-step construction of a configured [`Simulation`], and a
//! [`Director`] holding the canned scenario recipes.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut builder = SimulationBuilder::new();
//! builder
//!     .population(50.0, 100.0, [0.0, 1.0], [0.0, 1.0])
//!     .fig(3.0, 5.0)
//!     .plot("dark", true, "deuteranopia");
//! let last = builder.result(&mut NoopObserver)?;
//!
//! let mut director = Director::new(builder);
//! director.construct_lockdown(&mut NoopObserver)?;
//! ```
//!
//! Setters only write configuration.  The population is (re)built once, when
//! [`SimulationBuilder::build`] or [`SimulationBuilder::result`] runs, so a
//! chain of intervention setters costs a single `population_init`.

use epi_core::{Config, DisplaySettings};
use epi_population::PopulationSnapshot;

use crate::{SimObserver, SimResult, Simulation};

/// Horizon of a freshly reset builder.
pub const BUILDER_STEPS: u64 = 10;

/// Fluent, resettable builder for a [`Simulation`].
pub struct SimulationBuilder {
    simulation: Simulation,
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationBuilder {
    pub fn new() -> Self {
        let mut builder = Self { simulation: Simulation::new(Config::default()) };
        builder.reset();
        builder
    }

    /// Start over from the default configuration with a short horizon.
    pub fn reset(&mut self) -> &mut Self {
        let config = Config { simulation_steps: BUILDER_STEPS, ..Config::default() };
        self.simulation = Simulation::new(config);
        self
    }

    fn config(&mut self) -> &mut Config {
        self.simulation.config_mut()
    }

    /// Age distribution and world rectangle.
    pub fn population(&mut self, mean_age: f64, max_age: f64, xbounds: [f64; 2], ybounds: [f64; 2]) -> &mut Self {
        let cfg = self.config();
        cfg.mean_age = mean_age;
        cfg.max_age  = max_age;
        cfg.xbounds  = xbounds;
        cfg.ybounds  = ybounds;
        self
    }

    /// Display settings; carried in the configuration, ignored by dynamics.
    pub fn plot(&mut self, plot_style: &str, colorblind_mode: bool, colorblind_type: &str) -> &mut Self {
        let display = &mut self.config().display;
        display.plot_style      = plot_style.to_owned();
        display.colorblind_mode = colorblind_mode;
        display.colorblind_type = colorblind_type.to_owned();
        self
    }

    /// Figure size; display only.
    pub fn fig(&mut self, width: f64, height: f64) -> &mut Self {
        self.config().display.fig_size = (width, height);
        self
    }

    pub fn lockdown(&mut self, percentage: f64, compliance: f64) -> &mut Self {
        self.config().set_lockdown(percentage, compliance);
        self
    }

    pub fn self_isolation(&mut self, proportion: f64, bounds: [f64; 4], traveling_infects: bool) -> &mut Self {
        self.config().set_self_isolation(proportion, bounds, traveling_infects);
        self
    }

    pub fn reduced_interaction(&mut self, speed: f64) -> &mut Self {
        self.config().set_reduced_interaction(speed);
        self
    }

    /// Fine-grained access for anything without a dedicated setter.
    pub fn configure(&mut self, f: impl FnOnce(&mut Config)) -> &mut Self {
        f(self.config());
        self
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Initialize the population from the accumulated configuration.
    pub fn build(&mut self) -> SimResult<&mut Simulation> {
        self.simulation.population_init()?;
        Ok(&mut self.simulation)
    }

    /// Initialize and run, returning the final table.
    pub fn result<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<PopulationSnapshot> {
        self.build()?.run(observer)
    }

    /// Hand over the configured simulation without initializing it.
    pub fn into_simulation(self) -> Simulation {
        self.simulation
    }
}

// ── Director ──────────────────────────────────────────────────────────────────

/// Canned recipes on top of a [`SimulationBuilder`].
///
/// Each `configure_*` resets the builder and applies one recipe; each
/// `construct_*` does the same and then runs it.
pub struct Director {
    builder: SimulationBuilder,
}

impl Director {
    pub fn new(builder: SimulationBuilder) -> Self {
        Self { builder }
    }

    pub fn builder(&mut self) -> &mut SimulationBuilder {
        &mut self.builder
    }

    pub fn into_builder(self) -> SimulationBuilder {
        self.builder
    }

    pub fn configure_default(&mut self) -> &mut SimulationBuilder {
        let display = DisplaySettings::default();
        self.builder
            .reset()
            .population(45.0, 105.0, [0.0, 1.0], [0.0, 1.0])
            .plot(&display.plot_style, display.colorblind_mode, &display.colorblind_type)
            .fig(display.fig_size.0, display.fig_size.1)
    }

    pub fn configure_lockdown(&mut self) -> &mut SimulationBuilder {
        self.builder
            .reset()
            .population(25.0, 60.0, [0.0, 2.0], [0.0, 2.0])
            .lockdown(0.1, 0.95)
            .plot("dark", false, "deuteranopia")
            .fig(10.0, 14.0)
    }

    pub fn configure_self_isolation(&mut self) -> &mut SimulationBuilder {
        self.builder
            .reset()
            .population(50.0, 115.0, [0.0, 2.0], [0.0, 2.0])
            .self_isolation(0.9, [0.02, 0.02, 0.09, 0.98], false)
            .plot("dark", false, "deuteranopia")
            .fig(10.0, 14.0)
    }

    pub fn configure_reduced_interaction(&mut self) -> &mut SimulationBuilder {
        self.builder
            .reset()
            .population(32.0, 60.0, [0.0, 2.0], [0.0, 2.0])
            .reduced_interaction(0.01)
            .plot("default", false, "deuteranopia")
            .fig(10.0, 14.0)
    }

    pub fn construct_default<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<PopulationSnapshot> {
        self.configure_default().result(observer)
    }

    pub fn construct_lockdown<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<PopulationSnapshot> {
        self.configure_lockdown().result(observer)
    }

    pub fn construct_self_isolation<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<PopulationSnapshot> {
        self.configure_self_isolation().result(observer)
    }

    pub fn construct_reduced_interaction<O: SimObserver>(
        &mut self,
        observer: &mut O,
    ) -> SimResult<PopulationSnapshot> {
        self.configure_reduced_interaction().result(observer)
    }
}
