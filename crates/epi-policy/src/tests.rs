//! Unit tests for epi-policy.

#[cfg(test)]
mod mortality {
    use epi_core::{Config, RiskCurve};

    use crate::MortalityModel;

    fn model(curve: RiskCurve) -> MortalityModel {
        let mut cfg = Config::default();
        cfg.set_age_risk(55.0, 75.0, 0.1, curve);
        MortalityModel::from_config(&cfg).unwrap()
    }

    #[test]
    fn zero_below_risk_age() {
        for curve in [RiskCurve::Linear, RiskCurve::Quadratic, RiskCurve::Exponential] {
            assert_eq!(model(curve).risk_for_age(30.0), 0.0);
            assert_eq!(model(curve).risk_for_age(55.0), 0.0);
        }
    }

    #[test]
    fn exactly_critical_at_critical_age() {
        for curve in [RiskCurve::Linear, RiskCurve::Quadratic, RiskCurve::Exponential] {
            assert_eq!(model(curve).risk_for_age(75.0), 0.1);
            assert_eq!(model(curve).risk_for_age(99.0), 0.1);
        }
    }

    #[test]
    fn ramp_shapes_ordered_at_midpoint() {
        let lin = model(RiskCurve::Linear).risk_for_age(65.0);
        let quad = model(RiskCurve::Quadratic).risk_for_age(65.0);
        let exp = model(RiskCurve::Exponential).risk_for_age(65.0);
        assert!((lin - 0.05).abs() < 1e-12);
        assert!((quad - 0.025).abs() < 1e-12);
        assert!(exp > 0.0 && exp < lin, "exponential midpoint {exp}");
    }

    #[test]
    fn ramp_is_monotone() {
        let m = model(RiskCurve::Exponential);
        let mut prev = 0.0;
        for age in 55..=80 {
            let r = m.risk_for_age(age as f64);
            assert!(r >= prev);
            prev = r;
        }
    }

    #[test]
    fn flat_risk_without_age_dependence() {
        let mut cfg = Config::default();
        cfg.age_dependent_risk = false;
        cfg.mortality_chance = 0.02;
        let m = MortalityModel::from_config(&cfg).unwrap();
        assert_eq!(m.risk_for_age(5.0), 0.02);
        assert_eq!(m.risk_for_age(100.0), 0.02);
    }

    #[test]
    fn inverted_ages_rejected() {
        let mut cfg = Config::default();
        cfg.set_age_risk(80.0, 60.0, 0.1, RiskCurve::Linear);
        assert!(MortalityModel::from_config(&cfg).is_err());
    }
}

#[cfg(test)]
mod healthcare {
    use epi_core::Config;

    use crate::HealthcarePolicy;

    #[test]
    fn zero_capacity_never_admits() {
        let mut cfg = Config::default();
        cfg.healthcare_capacity = 0;
        let hp = HealthcarePolicy::from_config(&cfg).unwrap();
        assert!(!hp.admits(0));
    }

    #[test]
    fn capacity_gate() {
        let mut cfg = Config::default();
        cfg.healthcare_capacity = 2;
        let hp = HealthcarePolicy::from_config(&cfg).unwrap();
        assert!(hp.admits(1));
        assert!(!hp.admits(2));
    }

    #[test]
    fn untreated_is_worse_and_clamped() {
        let hp = HealthcarePolicy::from_config(&Config::default()).unwrap();
        assert_eq!(hp.effective_risk(0.1, true), 0.05);
        assert!((hp.effective_risk(0.1, false) - 0.3).abs() < 1e-12);
        assert_eq!(hp.effective_risk(0.5, false), 1.0);
    }

    #[test]
    fn treatment_independent_risk() {
        let mut cfg = Config::default();
        cfg.treatment_dependent_risk = false;
        let hp = HealthcarePolicy::from_config(&cfg).unwrap();
        assert_eq!(hp.effective_risk(0.1, false), 0.1);
        assert_eq!(hp.effective_risk(0.1, true), 0.1);
    }
}

#[cfg(test)]
mod cohorts {
    use epi_core::{Config, EpiError, SimRng};

    use crate::{LockdownPolicy, SelfIsolationPolicy, SpeedPolicy};

    #[test]
    fn disabled_interventions_are_none() {
        let cfg = Config::default();
        assert!(LockdownPolicy::from_config(&cfg).unwrap().is_none());
        assert!(SelfIsolationPolicy::from_config(&cfg).unwrap().is_none());
    }

    #[test]
    fn lockdown_cohort_has_exact_size() {
        let mut cfg = Config::default();
        cfg.set_lockdown(0.25, 1.0);
        let lp = LockdownPolicy::from_config(&cfg).unwrap().unwrap();
        let flags = lp.select_cohort(200, &mut SimRng::new(1));
        assert_eq!(flags.iter().filter(|&&f| f).count(), 50);
    }

    #[test]
    fn invalid_lockdown_raised_on_read() {
        let mut cfg = Config::default();
        cfg.set_lockdown(1.2, 0.5);
        assert!(matches!(
            LockdownPolicy::from_config(&cfg).unwrap_err(),
            EpiError::Config { field: "lockdown_percentage", .. }
        ));
    }

    #[test]
    fn isolation_cohort_and_contact_filter() {
        let mut cfg = Config::default();
        cfg.set_self_isolation(0.5, [0.0, 0.0, 0.5, 0.5], false);
        let ip = SelfIsolationPolicy::from_config(&cfg).unwrap().unwrap();
        let flags = ip.select_cohort(10, &mut SimRng::new(2));
        assert_eq!(flags.iter().filter(|&&f| f).count(), 5);

        let own = ip.bounds;
        assert!(ip.permits_contact(&own, epi_core::Vec2::new(0.25, 0.25)));
        assert!(!ip.permits_contact(&own, epi_core::Vec2::new(0.75, 0.25)));

        let traveling = SelfIsolationPolicy { traveling_infects: true, ..ip };
        assert!(traveling.permits_contact(&own, epi_core::Vec2::new(0.75, 0.25)));
    }

    #[test]
    fn reduced_interaction_overrides_speed() {
        let mut cfg = Config::default();
        assert_eq!(SpeedPolicy::from_config(&cfg).unwrap().agent_speed, 0.01);
        cfg.set_reduced_interaction(0.001);
        assert_eq!(SpeedPolicy::from_config(&cfg).unwrap().agent_speed, 0.001);
        cfg.set_reduced_interaction(0.0);
        assert!(SpeedPolicy::from_config(&cfg).is_err());
    }
}

#[cfg(test)]
mod course {
    use epi_core::{AgentId, AgentRng, Config, Tick};

    use crate::{DiseaseCourse, Interventions};

    #[test]
    fn schedule_lands_after_incubation() {
        let cfg = Config::default();
        let course = DiseaseCourse::from_config(&cfg).unwrap();
        let mut rng = AgentRng::new(7, AgentId(3));
        for _ in 0..200 {
            let rv = course.schedule(Tick(100), 80.0, &mut rng);
            let lo = 100 + cfg.incubation_ticks + cfg.recovery_duration[0];
            let hi = 100 + cfg.incubation_ticks + cfg.recovery_duration[1];
            assert!((lo..=hi).contains(&rv.outcome_tick.0));
            assert_eq!(rv.base_risk, cfg.critical_mortality_chance);
            assert!((0.0..1.0).contains(&rv.fate_draw));
        }
    }

    #[test]
    fn incubation_boundary() {
        let course = DiseaseCourse::from_config(&Config::default()).unwrap();
        assert!(!course.incubation_over(Tick(5), Tick(24)));
        assert!(course.incubation_over(Tick(5), Tick(25)));
        assert!(!course.incubation_over(Tick::NEVER, Tick(1_000)));
    }

    #[test]
    fn zero_chance_never_transmits() {
        let mut cfg = Config::default();
        cfg.infection_chance = 0.0;
        let course = DiseaseCourse::from_config(&cfg).unwrap();
        let mut rng = AgentRng::new(1, AgentId(0));
        assert!((0..1_000).all(|_| !course.transmits(&mut rng)));
    }

    #[test]
    fn bad_recovery_window_rejected() {
        let mut cfg = Config::default();
        cfg.recovery_duration = [10, 5];
        assert!(DiseaseCourse::from_config(&cfg).is_err());
        cfg.recovery_duration = [0, 5];
        assert!(DiseaseCourse::from_config(&cfg).is_err());
    }

    #[test]
    fn interventions_bundle_reads_everything() {
        let mut cfg = Config::default();
        cfg.set_lockdown(0.1, 0.9);
        let iv = Interventions::from_config(&cfg).unwrap();
        assert!(iv.lockdown.is_some());
        assert!(iv.isolation.is_none());
        assert_eq!(iv.world, epi_core::Bounds::UNIT);

        cfg.xbounds = [1.0, 0.0];
        assert!(Interventions::from_config(&cfg).is_err());
    }
}
