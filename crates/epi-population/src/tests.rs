//! Unit tests for epi-population.

#[cfg(test)]
mod init {
    use epi_core::{Bounds, Config, EpiError, EpiState, Tick};

    use crate::PopulationBuilder;

    fn seeded(n: usize) -> Config {
        let mut cfg = Config::default();
        cfg.pop_size = n;
        cfg.seed = Some(42);
        cfg
    }

    #[test]
    fn sizes_match_config() {
        let (pop, rngs) = PopulationBuilder::new(&seeded(300)).build().unwrap();
        assert_eq!(pop.count, 300);
        assert_eq!(rngs.len(), 300);
        assert_eq!(pop.position.len(), 300);
        assert_eq!(pop.agent_ids().count(), 300);
        assert_eq!(pop.frame, Tick::ZERO);
    }

    #[test]
    fn zero_population_rejected() {
        let err = PopulationBuilder::new(&seeded(0)).build().unwrap_err();
        assert!(matches!(err, EpiError::Config { field: "pop_size", .. }));
    }

    #[test]
    fn oversized_population_rejected_before_allocating() {
        let err = PopulationBuilder::new(&seeded(u32::MAX as usize + 2)).build().unwrap_err();
        assert!(matches!(err, EpiError::Config { field: "pop_size", .. }));
    }

    #[test]
    fn ages_truncated_to_range() {
        let mut cfg = seeded(2_000);
        cfg.mean_age = 20.0;
        cfg.max_age = 55.0;
        let (pop, _) = PopulationBuilder::new(&cfg).build().unwrap();
        assert!(pop.age.iter().all(|&a| (0.0..=55.0).contains(&a)));
        let mean = pop.age.iter().sum::<f64>() / pop.count as f64;
        assert!((mean - 20.0).abs() < 1.5, "mean age {mean}");
    }

    #[test]
    fn everyone_starts_inside_the_world() {
        let (pop, _) = PopulationBuilder::new(&seeded(1_000)).build().unwrap();
        assert!(pop.first_out_of_bounds().is_none());
        assert!(pop.wander_bounds.iter().all(|b| *b == Bounds::UNIT));
        assert!(pop.heading.iter().all(|h| (h.length() - 1.0).abs() < 1e-9));
    }

    #[test]
    fn patient_zeros_are_infectious_at_frame_zero() {
        let mut cfg = seeded(100);
        cfg.initial_infections = 5;
        let (pop, _) = PopulationBuilder::new(&cfg).build().unwrap();
        assert_eq!(pop.count_in(EpiState::Infectious), 5);
        assert_eq!(pop.count_in(EpiState::Healthy), 95);
        for id in pop.agent_ids() {
            let i = id.index();
            if pop.state[i] == EpiState::Infectious {
                assert_eq!(pop.infection_frame[i], Tick::ZERO);
                assert!(pop.recovery[i].is_scheduled());
            } else {
                assert!(pop.infection_frame[i].is_never());
                assert!(!pop.recovery[i].is_scheduled());
            }
        }
    }

    #[test]
    fn initial_infections_capped_at_population() {
        let mut cfg = seeded(10);
        cfg.initial_infections = 50;
        let (pop, _) = PopulationBuilder::new(&cfg).build().unwrap();
        assert_eq!(pop.count_in(EpiState::Infectious), 10);
    }

    #[test]
    fn isolation_cohort_confined() {
        let mut cfg = seeded(200);
        cfg.set_self_isolation(0.5, [0.0, 0.0, 0.25, 1.0], false);
        let (pop, _) = PopulationBuilder::new(&cfg).build().unwrap();
        let rect = cfg.isolation_rect().unwrap();

        assert_eq!(pop.self_isolating.iter().filter(|&&f| f).count(), 100);
        for i in 0..pop.count {
            if pop.self_isolating[i] {
                assert_eq!(pop.wander_bounds[i], rect);
                assert!(rect.contains(pop.position[i]));
            } else {
                assert_eq!(pop.wander_bounds[i], Bounds::UNIT);
            }
        }
    }

    #[test]
    fn lockdown_cohort_and_reduced_speed() {
        let mut cfg = seeded(200);
        cfg.set_lockdown(0.1, 0.9);
        cfg.set_reduced_interaction(0.001);
        let (pop, _) = PopulationBuilder::new(&cfg).build().unwrap();
        assert_eq!(pop.lockdown_eligible.iter().filter(|&&f| f).count(), 20);
        assert!(pop.speed.iter().all(|&s| s == 0.001));
    }

    #[test]
    fn invalid_isolation_rect_fails_init() {
        let mut cfg = seeded(10);
        cfg.set_self_isolation(0.5, [0.5, 0.5, 1.5, 0.9], false);
        let err = PopulationBuilder::new(&cfg).build().unwrap_err();
        assert!(matches!(err, EpiError::Config { field: "isolation_bounds", .. }));
    }

    #[test]
    fn same_seed_same_population() {
        let cfg = seeded(500);
        let (a, _) = PopulationBuilder::new(&cfg).build().unwrap();
        let (b, _) = PopulationBuilder::new(&cfg).build().unwrap();
        assert_eq!(a.snapshot(Tick::ZERO), b.snapshot(Tick::ZERO));

        let (c, _) = PopulationBuilder::new(&cfg).seed(43).build().unwrap();
        assert_ne!(a.position, c.position);
        assert_eq!(c.seed, 43);
    }
}

#[cfg(test)]
mod store {
    use epi_core::{AgentId, Config, EpiError, EpiState, Tick, Vec2};

    use crate::PopulationBuilder;

    fn small() -> crate::Population {
        let mut cfg = Config::default();
        cfg.pop_size = 4;
        cfg.seed = Some(1);
        cfg.initial_infections = 0;
        PopulationBuilder::new(&cfg).build().unwrap().0
    }

    #[test]
    fn destination_is_clamped_into_wander_bounds() {
        let mut pop = small();
        pop.set_destination(AgentId(1), Vec2::new(3.0, -1.0)).unwrap();
        assert_eq!(pop.destination[1], Some(Vec2::new(1.0, 0.0)));
        assert!(!pop.at_destination[1]);

        pop.at_destination[1] = true;
        pop.clear_destination(AgentId(1)).unwrap();
        assert_eq!(pop.destination[1], None);
        assert!(!pop.at_destination[1]);
    }

    #[test]
    fn dead_agents_ignore_destinations() {
        let mut pop = small();
        pop.state[2] = EpiState::Dead;
        pop.set_destination(AgentId(2), Vec2::new(0.5, 0.5)).unwrap();
        assert_eq!(pop.destination[2], None);
    }

    #[test]
    fn unknown_agent_errors() {
        let mut pop = small();
        assert!(matches!(
            pop.set_destination(AgentId(99), Vec2::ZERO),
            Err(EpiError::AgentNotFound(AgentId(99)))
        ));
        assert!(pop.record(AgentId(4)).is_err());
    }

    #[test]
    fn record_exposes_all_columns() {
        let mut pop = small();
        pop.infection_frame[0] = Tick(7);
        pop.in_treatment[0] = true;
        let rec = pop.record(AgentId(0)).unwrap();
        assert_eq!(rec.id, AgentId(0));
        assert_eq!(rec.position(), pop.position[0]);
        assert_eq!(rec.infection_frame, Some(Tick(7)));
        assert!(rec.in_treatment);
        assert_eq!(rec.wander_x, [0.0, 1.0]);
        assert_eq!(rec.wander_y, [0.0, 1.0]);
        assert_eq!(pop.record(AgentId(1)).unwrap().infection_frame, None);
    }

    #[test]
    fn snapshot_counts_and_treated() {
        let mut pop = small();
        pop.state[0] = EpiState::Sick;
        pop.in_treatment[0] = true;
        pop.state[3] = EpiState::Immune;
        let snap = pop.snapshot(Tick(5));
        assert_eq!(snap.tick, Tick(5));
        assert_eq!(snap.len(), 4);
        assert_eq!(snap.count_in(EpiState::Healthy), 2);
        assert_eq!(pop.treated_count(), 1);
    }

    #[test]
    fn out_of_bounds_detected() {
        let mut pop = small();
        pop.position[3] = Vec2::new(1.5, 0.5);
        assert_eq!(pop.first_out_of_bounds(), Some(AgentId(3)));
    }
}
