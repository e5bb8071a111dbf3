//! Integration tests for epi-sim.

use std::sync::{Arc, Mutex};

use epi_core::{Config, EpiState, Tick, Vec2};
use epi_dynamics::TickReport;
use epi_population::Population;

use crate::{SimObserver, Simulation};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(pop_size: usize, steps: u64) -> Config {
    Config {
        pop_size,
        simulation_steps: steps,
        seed: Some(42),
        ..Config::default()
    }
}

fn initialized(config: Config) -> Simulation {
    let mut sim = Simulation::new(config);
    sim.population_init().unwrap();
    sim
}

/// Runs a check against the population after every tick.
struct EveryTick<F: FnMut(Tick, &Population)> {
    check: F,
}

impl<F: FnMut(Tick, &Population)> SimObserver for EveryTick<F> {
    fn on_snapshot(&mut self, tick: Tick, population: &Population) {
        (self.check)(tick, population);
    }
}

/// Records hook calls into a shared log.
struct Recorder {
    name: &'static str,
    log:  Arc<Mutex<Vec<String>>>,
}

impl SimObserver for Recorder {
    fn on_run_start(&mut self, _config: &Config, _population: &Population) {
        self.log.lock().unwrap().push(format!("{}:start", self.name));
    }
    fn on_tick_end(&mut self, tick: Tick, _report: &TickReport) {
        self.log.lock().unwrap().push(format!("{}:{}", self.name, tick.0));
    }
    fn on_run_end(&mut self, final_tick: Tick, _population: &Population) {
        self.log.lock().unwrap().push(format!("{}:end@{}", self.name, final_tick.0));
    }
}

// ── Driver phases ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod driver {
    use super::*;
    use crate::{NoopObserver, Phase, SimError};

    #[test]
    fn run_before_init_fails() {
        let mut sim = Simulation::new(test_config(10, 5));
        assert_eq!(sim.phase(), Phase::Uninitialized);
        assert!(matches!(sim.run(&mut NoopObserver), Err(SimError::NotInitialized)));
        assert!(matches!(sim.snapshot(), Err(SimError::NotInitialized)));
    }

    #[test]
    fn init_then_run_completes() {
        let mut sim = initialized(test_config(50, 7));
        assert_eq!(sim.phase(), Phase::Initialized);
        let last = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.phase(), Phase::Completed);
        assert_eq!(last.len(), 50);
        assert_eq!(last.tick, Tick(7));
        assert_eq!(last.frame, Tick(7));
        assert_eq!(sim.current_tick(), Tick(7));
    }

    #[test]
    fn rerun_restarts_clock_and_keeps_population() {
        let mut sim = initialized(test_config(50, 5));
        sim.run(&mut NoopObserver).unwrap();
        let second = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(second.tick, Tick(5));
        assert_eq!(second.frame, Tick(10));

        sim.population_init().unwrap();
        assert_eq!(sim.phase(), Phase::Initialized);
        assert_eq!(sim.population().unwrap().frame, Tick::ZERO);
    }

    #[test]
    fn config_error_surfaces_at_run() {
        let mut sim = initialized(test_config(20, 5));
        sim.config_mut().infection_chance = 1.5;
        let err = sim.run(&mut NoopObserver).unwrap_err();
        assert!(matches!(err, SimError::Config(epi_core::EpiError::Config { field: "infection_chance", .. })));
        assert_eq!(sim.phase(), Phase::Initialized);
        assert!(sim.population().is_some());
    }

    #[test]
    fn config_error_surfaces_at_init() {
        let mut sim = Simulation::new(Config { pop_size: 0, ..test_config(1, 1) });
        assert!(matches!(sim.population_init(), Err(SimError::Config(_))));
        assert_eq!(sim.phase(), Phase::Uninitialized);
    }

    #[test]
    fn invariant_violation_discards_population() {
        let mut sim = initialized(test_config(5, 5));
        let pop = sim.population_mut().unwrap();
        pop.state[0] = EpiState::Dead;
        pop.position[0] = Vec2::new(5.0, 5.0);

        let err = sim.run(&mut NoopObserver).unwrap_err();
        assert!(matches!(err, SimError::Invariant(epi_dynamics::DynamicsError::OutOfBounds { .. })));
        assert_eq!(sim.phase(), Phase::Uninitialized);
        assert!(sim.population().is_none());
    }

    #[test]
    fn observer_can_stop_between_ticks() {
        struct StopAfter(u64, u64);
        impl SimObserver for StopAfter {
            fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {
                self.0 += 1;
            }
            fn keep_running(&self) -> bool {
                self.0 < self.1
            }
        }

        let mut sim = initialized(test_config(20, 100));
        let last = sim.run(&mut StopAfter(0, 3)).unwrap();
        assert_eq!(last.tick, Tick(3));
        assert_eq!(sim.phase(), Phase::Completed);
    }

    #[test]
    fn snapshot_interval_respected() {
        let mut cfg = test_config(20, 20);
        cfg.snapshot_interval = 5;
        let mut sim = initialized(cfg);
        let mut seen = Vec::new();
        sim.run(&mut EveryTick { check: |t: Tick, _: &Population| seen.push(t.0) }).unwrap();
        assert_eq!(seen, vec![0, 5, 10, 15]);
    }

    /// Run once more, asserting every tick only makes legal transitions.
    fn run_legal(sim: &mut Simulation) -> epi_population::PopulationSnapshot {
        let mut prev: Vec<EpiState> = sim.population().unwrap().state.clone();
        let last = sim
            .run(&mut EveryTick {
                check: |_: Tick, pop: &Population| {
                    for (from, to) in prev.iter().zip(&pop.state) {
                        assert!(from.can_become(*to), "{from} -> {to}");
                    }
                    prev = pop.state.clone();
                },
            })
            .unwrap();
        assert_eq!(sim.phase(), Phase::Completed);
        last
    }

    #[test]
    fn capacity_cut_between_runs_discharges_patients() {
        struct Discharges(usize);
        impl SimObserver for Discharges {
            fn on_tick_end(&mut self, _tick: Tick, report: &TickReport) {
                self.0 += report.discharged.len();
                assert_eq!(report.counts.treated, 0);
            }
        }

        let mut cfg = test_config(300, 3);
        cfg.initial_infections = 300;
        cfg.incubation_ticks = 1;
        cfg.recovery_duration = [1_000, 1_000];
        cfg.healthcare_capacity = 300;
        let mut sim = initialized(cfg);
        let first = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(first.records.iter().filter(|r| r.in_treatment).count(), 300);

        sim.config_mut().healthcare_capacity = 0;
        let mut discharges = Discharges(0);
        let second = sim.run(&mut discharges).unwrap();
        assert_eq!(discharges.0, 300);
        assert!(second.records.iter().all(|r| !r.in_treatment));
        assert!(sim.population().is_some());
    }

    #[test]
    fn longer_incubation_between_runs_keeps_transitions_legal() {
        let mut cfg = test_config(50, 1);
        cfg.initial_infections = 5;
        cfg.incubation_ticks = 2;
        cfg.recovery_duration = [3, 3];
        let mut sim = initialized(cfg);
        sim.run(&mut NoopObserver).unwrap();

        sim.config_mut().incubation_ticks = 50;
        sim.config_mut().simulation_steps = 60;
        let last = run_legal(&mut sim);
        assert!(last.count_in(EpiState::Immune) + last.count_in(EpiState::Dead) >= 5);
    }

    #[test]
    fn dynamics_changes_between_runs_take_effect() {
        let mut cfg = test_config(300, 30);
        cfg.initial_infections = 20;
        cfg.infection_range = 0.05;
        cfg.infection_chance = 0.3;
        cfg.incubation_ticks = 3;
        cfg.recovery_duration = [5, 15];
        cfg.healthcare_capacity = 50;
        cfg.set_lockdown(0.5, 0.2);
        let mut sim = initialized(cfg);
        run_legal(&mut sim);

        let c = sim.config_mut();
        c.infection_chance = 0.0;
        c.lockdown_compliance = 1.0;
        c.healthcare_capacity = 3;
        c.incubation_ticks = 12;
        c.recovery_duration = [1, 2];
        let healthy = sim.population().unwrap().state.iter().filter(|&&s| s == EpiState::Healthy).count();
        let last = run_legal(&mut sim);
        assert_eq!(last.count_in(EpiState::Healthy), healthy);
        assert!(last.records.iter().filter(|r| r.in_treatment).count() <= 3);

        let c = sim.config_mut();
        c.infection_chance = 1.0;
        c.incubation_ticks = 1;
        c.healthcare_capacity = 0;
        let last = run_legal(&mut sim);
        assert!(last.records.iter().all(|r| !r.in_treatment));
        assert_eq!(last.frame, Tick(90));
    }

    #[test]
    fn destinations_set_between_runs_are_followed() {
        let mut sim = initialized(test_config(3, 120));
        let pop = sim.population_mut().unwrap();
        pop.set_destination(epi_core::AgentId(0), Vec2::new(0.5, 0.5)).unwrap();
        let last = sim.run(&mut NoopObserver).unwrap();
        let rec = last.records[0];
        assert!(rec.at_destination);
        assert_eq!(rec.position(), Vec2::new(0.5, 0.5));
    }
}

// ── Engine properties ─────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use super::*;
    use crate::NoopObserver;

    #[test]
    fn positions_stay_in_wander_bounds_every_tick() {
        let mut cfg = test_config(400, 150);
        cfg.base_speed = 0.03;
        cfg.set_self_isolation(0.4, [0.05, 0.05, 0.3, 0.95], false);
        cfg.set_lockdown(0.2, 0.5);
        let mut sim = initialized(cfg);
        let mut ticks = 0;
        sim.run(&mut EveryTick {
            check: |_: Tick, pop: &Population| {
                ticks += 1;
                assert_eq!(pop.first_out_of_bounds(), None);
            },
        })
        .unwrap();
        assert_eq!(ticks, 150);
    }

    #[test]
    fn only_legal_state_transitions() {
        let mut cfg = test_config(300, 120);
        cfg.initial_infections = 10;
        cfg.infection_range = 0.05;
        cfg.infection_chance = 0.3;
        cfg.incubation_ticks = 3;
        cfg.recovery_duration = [5, 15];
        cfg.set_age_risk(20.0, 60.0, 0.8, epi_core::RiskCurve::Linear);
        let mut sim = initialized(cfg);

        let mut prev: Vec<EpiState> = sim.population().unwrap().state.clone();
        let mut seen_dead = false;
        let mut seen_immune = false;
        sim.run(&mut EveryTick {
            check: |_: Tick, pop: &Population| {
                for (from, to) in prev.iter().zip(&pop.state) {
                    assert!(from.can_become(*to), "{from} -> {to}");
                    assert!(!from.is_terminal() || from == to);
                }
                seen_dead |= pop.state.contains(&EpiState::Dead);
                seen_immune |= pop.state.contains(&EpiState::Immune);
                prev = pop.state.clone();
            },
        })
        .unwrap();
        assert!(seen_dead && seen_immune);
    }

    #[test]
    fn zero_infection_chance_means_no_new_infections() {
        let mut cfg = test_config(300, 100);
        cfg.initial_infections = 30;
        cfg.infection_chance = 0.0;
        cfg.infection_range = 0.2;
        let mut sim = initialized(cfg);
        let last = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(last.count_in(EpiState::Healthy), 270);
    }

    #[test]
    fn zero_capacity_never_treats() {
        struct NoTreatment;
        impl SimObserver for NoTreatment {
            fn on_tick_end(&mut self, _tick: Tick, report: &TickReport) {
                assert_eq!(report.counts.treated, 0);
            }
        }

        let mut cfg = test_config(300, 80);
        cfg.initial_infections = 20;
        cfg.infection_range = 0.05;
        cfg.infection_chance = 0.5;
        cfg.incubation_ticks = 2;
        cfg.recovery_duration = [10, 20];
        cfg.healthcare_capacity = 0;
        let mut sim = initialized(cfg);
        let last = sim.run(&mut NoTreatment).unwrap();
        assert!(last.records.iter().all(|r| !r.in_treatment));
        assert!(last.count_in(EpiState::Healthy) < 280);
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let mut cfg = test_config(400, 60);
        cfg.infection_range = 0.04;
        cfg.infection_chance = 0.2;
        cfg.initial_infections = 5;
        cfg.set_lockdown(0.3, 0.8);

        let a = initialized(cfg.clone()).run(&mut NoopObserver).unwrap();
        let b = initialized(cfg.clone()).run(&mut NoopObserver).unwrap();
        assert_eq!(a, b);

        cfg.seed = Some(43);
        let c = initialized(cfg).run(&mut NoopObserver).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn certain_transmission_saturates() {
        let mut cfg = test_config(500, 50);
        cfg.infection_chance = 1.0;
        cfg.initial_infections = 1;
        cfg.infection_range = 0.1;
        cfg.healthcare_capacity = 500;
        let last = initialized(cfg).run(&mut NoopObserver).unwrap();

        assert_eq!(last.count_in(EpiState::Healthy), 0);
        let settled = last.count_in(EpiState::Dead) + last.count_in(EpiState::Immune);
        let active = last.count_in(EpiState::Sick) + last.count_in(EpiState::Infectious);
        assert_eq!(settled + active, 500);
    }

    #[test]
    fn full_lockdown_means_zero_displacement() {
        let mut cfg = test_config(300, 50);
        cfg.set_lockdown(1.0, 1.0);
        let mut sim = initialized(cfg);
        let start = sim.population().unwrap().position.clone();
        sim.run(&mut EveryTick {
            check: |_: Tick, pop: &Population| assert_eq!(pop.position, start),
        })
        .unwrap();
    }

    #[test]
    fn linear_risk_at_critical_age_is_exact() {
        use epi_core::{AgentId, AgentRng, RiskCurve};
        use epi_policy::{DiseaseCourse, HealthcarePolicy};

        let mut cfg = Config::default();
        cfg.set_age_risk(55.0, 75.0, 0.1, RiskCurve::Linear);
        cfg.treatment_dependent_risk = false;

        let course = DiseaseCourse::from_config(&cfg).unwrap();
        let rv = course.schedule(Tick::ZERO, 75.0, &mut AgentRng::new(1, AgentId(0)));
        let healthcare = HealthcarePolicy::from_config(&cfg).unwrap();
        assert_eq!(healthcare.effective_risk(rv.base_risk, false), 0.1);
        assert_eq!(healthcare.effective_risk(rv.base_risk, true), 0.1);
    }
}

// ── Publisher ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod publisher {
    use super::*;
    use crate::Publisher;

    #[test]
    fn fans_out_in_subscription_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut publisher = Publisher::new();
        publisher.subscribe(Recorder { name: "a", log: Arc::clone(&log) });
        publisher.subscribe(Recorder { name: "b", log: Arc::clone(&log) });

        initialized(test_config(10, 2)).run(&mut publisher).unwrap();
        let log = log.lock().unwrap();
        assert_eq!(
            *log,
            vec!["a:start", "b:start", "a:0", "b:0", "a:1", "b:1", "a:end@2", "b:end@2"]
        );
    }

    #[test]
    fn unsubscribed_listeners_are_silent() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut publisher = Publisher::new();
        let a = publisher.subscribe(Recorder { name: "a", log: Arc::clone(&log) });
        let b = publisher.subscribe(Recorder { name: "b", log: Arc::clone(&log) });
        assert_ne!(a, b);

        assert!(publisher.unsubscribe(b).is_some());
        assert!(publisher.unsubscribe(b).is_none());
        assert_eq!(publisher.listener_ids().collect::<Vec<_>>(), vec![a]);

        initialized(test_config(10, 1)).run(&mut publisher).unwrap();
        assert!(log.lock().unwrap().iter().all(|e| e.starts_with("a:")));
    }

    #[test]
    fn any_listener_can_stop_the_run() {
        struct Never;
        impl SimObserver for Never {
            fn keep_running(&self) -> bool {
                false
            }
        }

        let mut publisher = Publisher::new();
        publisher.subscribe(crate::NoopObserver);
        publisher.subscribe(Never);
        let last = initialized(test_config(10, 50)).run(&mut publisher).unwrap();
        assert_eq!(last.tick, Tick::ZERO);
    }
}

// ── Builder / Director ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;
    use crate::builder::BUILDER_STEPS;
    use crate::{Director, NoopObserver, Phase, SimulationBuilder};

    #[test]
    fn reset_shortens_the_horizon() {
        let mut builder = SimulationBuilder::new();
        builder.configure(|c| c.simulation_steps = 99);
        builder.reset();
        assert_eq!(builder.simulation().config().simulation_steps, BUILDER_STEPS);
        assert_eq!(builder.simulation().phase(), Phase::Uninitialized);
    }

    #[test]
    fn setters_write_config() {
        let mut builder = SimulationBuilder::new();
        builder
            .population(50.0, 100.0, [0.0, 1.0], [0.0, 1.0])
            .fig(3.0, 5.0)
            .plot("dark", true, "protanopia")
            .reduced_interaction(0.002);
        let cfg = builder.simulation().config();
        assert_eq!((cfg.mean_age, cfg.max_age), (50.0, 100.0));
        assert_eq!(cfg.display.fig_size, (3.0, 5.0));
        assert_eq!(cfg.display.plot_style, "dark");
        assert!(cfg.display.colorblind_mode);
        assert!(cfg.reduced_interaction);
        assert_eq!(cfg.speed, 0.002);
    }

    #[test]
    fn result_initializes_and_runs() {
        let mut builder = SimulationBuilder::new();
        builder.configure(|c| {
            c.pop_size = 100;
            c.seed = Some(3);
        });
        let last = builder.result(&mut NoopObserver).unwrap();
        assert_eq!(last.len(), 100);
        assert_eq!(last.tick, Tick(BUILDER_STEPS));
    }

    #[test]
    fn director_recipes() {
        let mut director = Director::new(SimulationBuilder::new());

        let cfg = director.configure_lockdown().simulation().config().clone();
        assert_eq!((cfg.mean_age, cfg.max_age), (25.0, 60.0));
        assert_eq!(cfg.xbounds, [0.0, 2.0]);
        assert!(cfg.lockdown);
        assert_eq!((cfg.lockdown_percentage, cfg.lockdown_compliance), (0.1, 0.95));
        assert_eq!(cfg.display.plot_style, "dark");
        assert_eq!(cfg.display.fig_size, (10.0, 14.0));

        let cfg = director.configure_self_isolation().simulation().config().clone();
        assert!(cfg.self_isolate && !cfg.lockdown);
        assert_eq!(cfg.self_isolate_proportion, 0.9);
        assert_eq!(cfg.isolation_bounds, [0.02, 0.02, 0.09, 0.98]);
        assert_eq!((cfg.mean_age, cfg.max_age), (50.0, 115.0));

        let cfg = director.configure_reduced_interaction().simulation().config().clone();
        assert!(cfg.reduced_interaction && !cfg.self_isolate);
        assert_eq!(cfg.speed, 0.01);
        assert_eq!(cfg.display.plot_style, "default");

        let cfg = director.configure_default().simulation().config().clone();
        assert!(!cfg.lockdown && !cfg.self_isolate && !cfg.reduced_interaction);
        assert_eq!(cfg.display.fig_size, (5.0, 7.0));
        assert_eq!(cfg.simulation_steps, BUILDER_STEPS);
    }

    #[test]
    fn director_constructs_and_runs() {
        let mut director = Director::new(SimulationBuilder::new());
        let last = director.construct_lockdown(&mut NoopObserver).unwrap();
        assert_eq!(last.len(), Config::default().pop_size);
        assert!(last.records.iter().all(|r| r.wander_x == [0.0, 2.0]));
    }
}

// ── Environments / scenarios ──────────────────────────────────────────────────

#[cfg(test)]
mod environment {
    use super::*;
    use crate::{Environment, NoopObserver, Scenario, SimulationVariant};
    use epi_core::RiskCurve;

    #[test]
    fn presets() {
        let mut cfg = Config::default();
        Environment::HighDensity.set_population_size(&mut cfg);
        Environment::HighDensity.set_population_variables(&mut cfg);
        assert_eq!(cfg.pop_size, 6_000);
        assert_eq!((cfg.risk_age, cfg.critical_age), (55.0, 75.0));
        assert_eq!(cfg.risk_increase, RiskCurve::Quadratic);

        Environment::LowDensity.set_population_size(&mut cfg);
        Environment::LowDensity.set_population_variables(&mut cfg);
        assert_eq!(cfg.pop_size, 500);
        assert_eq!((cfg.mean_age, cfg.max_age), (20.0, 55.0));
        assert_eq!(cfg.risk_increase, RiskCurve::Exponential);

        let before = cfg.clone();
        Environment::ScenarioDependent.set_population_size(&mut cfg);
        Environment::PopulationDependent.set_population_variables(&mut cfg);
        assert_eq!(cfg, before);
    }

    #[test]
    fn scenarios_parse_and_apply() {
        assert_eq!("self-isolation".parse::<Scenario>().unwrap(), Scenario::SelfIsolation);
        assert_eq!("Reduced Interaction".parse::<Scenario>().unwrap(), Scenario::ReducedInteraction);
        assert_eq!("".parse::<Scenario>().unwrap(), Scenario::Baseline);
        assert!("quarantine".parse::<Scenario>().is_err());

        let mut cfg = Config::default();
        Scenario::Lockdown.apply(&mut cfg);
        assert!(cfg.lockdown);
        assert_eq!((cfg.lockdown_percentage, cfg.lockdown_compliance), (0.1, 0.9));

        Scenario::ReducedInteraction.apply(&mut cfg);
        assert_eq!(cfg.speed, 0.001);
    }

    #[test]
    fn variant_instantiates_with_preset_population() {
        let mut variant = SimulationVariant::with_config(
            Environment::LowDensity,
            Config { seed: Some(5), ..Config::default() },
        );
        variant.add_scenario(Scenario::Lockdown).no_healthcare().set_simulation_steps(5);
        let last = variant.instantiate(&mut NoopObserver).unwrap();

        assert_eq!(last.len(), 500);
        assert_eq!(last.tick, Tick(5));
        assert_eq!(variant.config().healthcare_capacity, 0);
        let eligible = variant.simulation().population().unwrap().lockdown_eligible.iter().filter(|&&f| f).count();
        assert_eq!(eligible, 50);
    }

    #[test]
    fn variable_setters_do_not_switch_interventions_on() {
        let mut variant = SimulationVariant::new(Environment::ScenarioDependent);
        variant
            .set_lockdown_variables(0.5, 0.9)
            .set_self_isolation_variables(0.3, [0.1, 0.1, 0.2, 0.2], true)
            .set_reduced_interaction_variables(0.005);
        let cfg = variant.config();
        assert!(!cfg.lockdown && !cfg.self_isolate && !cfg.reduced_interaction);
        assert_eq!(cfg.lockdown_percentage, 0.5);
        assert_eq!(cfg.speed, 0.005);

        variant.apply_lockdown(0.5, 0.9).enable_age_risk(35.0, 50.0, 0.3, RiskCurve::Linear);
        assert!(variant.config().lockdown);
        assert_eq!(variant.config().critical_mortality_chance, 0.3);
    }
}
