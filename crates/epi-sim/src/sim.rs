//! The `Simulation` driver and its tick loop.

use epi_core::{Config, SimClock, Tick};
use epi_dynamics::Stepper;
use epi_population::{AgentRngs, Population, PopulationBuilder, PopulationSnapshot};
use tracing::{debug, error, info};

use crate::{SimError, SimObserver, SimResult};

/// Driver life cycle.
///
/// ```text
/// Uninitialized ──population_init──▶ Initialized ──run──▶ Completed
///       ▲                                  ▲                   │
///       └──── invariant violation ─────────┴── population_init ┘
/// ```
///
/// `Phase::Running` holds only while the tick loop executes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Initialized,
    Running,
    Completed,
}

/// Population store plus its RNGs; present from `population_init` on.
struct World {
    population: Population,
    rngs:       AgentRngs,
}

/// Owns the configuration and the population and runs the tick loop.
///
/// ```rust,ignore
/// let mut config = Config::default();
/// config.seed = Some(42);
/// config.simulation_steps = 100;
///
/// let mut sim = Simulation::new(config);
/// sim.population_init()?;
/// let last = sim.run(&mut NoopObserver)?;
/// ```
pub struct Simulation {
    config: Config,
    phase:  Phase,
    /// Run clock: restarts at zero for every run.
    clock:  SimClock,
    world:  Option<World>,
}

impl Simulation {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            phase: Phase::Uninitialized,
            clock: SimClock::new(),
            world: None,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable configuration.  Changes to population-affecting fields take
    /// effect at the next `population_init()`; dynamics fields at the next
    /// run.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Ticks completed in the current (or last) run.
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn population(&self) -> Option<&Population> {
        self.world.as_ref().map(|w| &w.population)
    }

    /// Mutable access between runs, e.g. to set destinations.
    pub fn population_mut(&mut self) -> Option<&mut Population> {
        self.world.as_mut().map(|w| &mut w.population)
    }

    /// The 15-column table as of now.
    pub fn snapshot(&self) -> SimResult<PopulationSnapshot> {
        self.population()
            .map(|p| p.snapshot(self.clock.current_tick))
            .ok_or(SimError::NotInitialized)
    }

    // ── Entry points ──────────────────────────────────────────────────────

    /// (Re)build the population from the current configuration, discarding
    /// any previous one.
    pub fn population_init(&mut self) -> SimResult<()> {
        let (population, rngs) = PopulationBuilder::new(&self.config).build()?;
        info!(
            agents = population.count,
            seed   = population.seed,
            "population initialized"
        );
        self.world = Some(World { population, rngs });
        self.clock.reset();
        self.phase = Phase::Initialized;
        Ok(())
    }

    /// Run `config.simulation_steps` ticks and return the final table.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<PopulationSnapshot> {
        let steps = self.config.simulation_steps;
        self.run_ticks(steps, observer)
    }

    /// Run exactly `n` ticks (fewer if an observer stops the run).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<PopulationSnapshot> {
        if !matches!(self.phase, Phase::Initialized | Phase::Completed) {
            return Err(SimError::NotInitialized);
        }
        let stepper = Stepper::from_config(&self.config)?;
        let Some(world) = self.world.as_mut() else {
            return Err(SimError::NotInitialized);
        };

        self.clock.reset();
        self.phase = Phase::Running;
        info!(ticks = n, frame = world.population.frame.0, "run started");

        let outcome = drive(
            &stepper,
            world,
            &mut self.clock,
            self.config.snapshot_interval,
            n,
            &self.config,
            observer,
        );

        match outcome {
            Ok(snapshot) => {
                self.phase = Phase::Completed;
                info!(
                    ticks = self.clock.current_tick.0,
                    frame = snapshot.frame.0,
                    "run completed"
                );
                Ok(snapshot)
            }
            Err(err) => {
                error!(%err, tick = self.clock.current_tick.0, "run aborted, population discarded");
                self.world = None;
                self.phase = Phase::Uninitialized;
                Err(err)
            }
        }
    }
}

fn drive<O: SimObserver>(
    stepper:  &Stepper,
    world:    &mut World,
    clock:    &mut SimClock,
    interval: u64,
    n:        u64,
    config:   &Config,
    observer: &mut O,
) -> SimResult<PopulationSnapshot> {
    let World { population, rngs } = world;
    observer.on_run_start(config, population);

    for _ in 0..n {
        if !observer.keep_running() {
            debug!(tick = clock.current_tick.0, "run stopped by observer");
            break;
        }
        let now = clock.current_tick;
        observer.on_tick_start(now);
        let report = stepper.step(population, rngs)?;
        debug!(
            tick       = now.0,
            infections = report.infections.len(),
            infectious = report.counts.infectious,
            sick       = report.counts.sick,
            dead       = report.counts.dead,
            "tick"
        );
        observer.on_tick_end(now, &report);
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, population);
        }
        clock.advance();
    }

    observer.on_run_end(clock.current_tick, population);
    Ok(population.snapshot(clock.current_tick))
}
