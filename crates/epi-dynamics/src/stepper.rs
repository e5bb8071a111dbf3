//! The `Stepper`: one tick of the agent model.
//!
//! # Tick phases
//!
//! | # | Phase         | Reads               | Writes                          |
//! |---|---------------|---------------------|---------------------------------|
//! | 1 | movement      | start-of-tick state | move buffer (parallel-safe)     |
//! | 2 | transmission  | start-of-tick state | infection list                  |
//! | 3 | apply         | buffers             | positions, new `Infectious`     |
//! | 4 | progression   | store               | `Infectious` → `Sick`           |
//! | 5 | outcomes      | store               | `Sick` → `Dead` / `Immune`      |
//! | 6 | admissions    | store               | discharges, then `in_treatment` |
//! | 7 | verify        | store               | nothing                         |
//!
//! The population frame advances by one at the start of the tick; every
//! event of the tick is stamped with the new frame.

use epi_core::{AgentId, Config, EpiState};
use epi_policy::Interventions;
use epi_population::{AgentRngs, Population};
use tracing::trace;

use crate::movement::{apply_moves, plan_moves};
use crate::progression::{admit, progress, resolve_outcomes};
use crate::transmission::{apply_infections, find_infections};
use crate::{ContactIndex, DynamicsError, DynamicsResult, MovementRules, StateCounts, TickReport};

/// Advances a [`Population`] one tick at a time under a fixed set of
/// policies.
///
/// Built from the configuration at the start of every run, so configuration
/// errors surface before the first tick.
#[derive(Clone, Debug)]
pub struct Stepper {
    pub interventions: Interventions,
    pub movement:      MovementRules,
}

impl Stepper {
    pub fn from_config(config: &Config) -> DynamicsResult<Self> {
        let interventions = Interventions::from_config(config)?;
        let movement = MovementRules {
            lockdown:              interventions.lockdown,
            heading_change_chance: interventions.speed.heading_change_chance,
        };
        Ok(Self { interventions, movement })
    }

    /// Run one tick.
    pub fn step(&self, pop: &mut Population, rngs: &mut AgentRngs) -> DynamicsResult<TickReport> {
        if rngs.len() != pop.count {
            return Err(DynamicsError::AgentCountMismatch {
                expected: pop.count,
                got:      rngs.len(),
                what:     "AgentRngs",
            });
        }
        let course = &self.interventions.course;
        let healthcare = &self.interventions.healthcare;
        let now = pop.frame.offset(1);
        let before = pop.state.clone();

        // ── Phases 1-2: read the start-of-tick snapshot ───────────────────
        let moves = plan_moves(pop, rngs, &self.movement);
        let index = ContactIndex::build(pop);
        let infections = find_infections(pop, rngs, &index, course, self.interventions.isolation.as_ref());

        // ── Phase 3: apply ────────────────────────────────────────────────
        apply_moves(pop, &moves);
        apply_infections(pop, rngs, course, &infections, now);
        pop.frame = now;

        // ── Phases 4-6: progression and treatment ─────────────────────────
        let mut report = TickReport { frame: now, infections, ..TickReport::default() };
        progress(pop, course, now, &mut report);
        resolve_outcomes(pop, healthcare, now, &mut report);
        admit(pop, healthcare, &mut report);
        report.counts = StateCounts::from_population(pop);

        self.verify(pop, &before)?;

        trace!(
            frame      = now.0,
            infections = report.infections.len(),
            sick       = report.became_sick.len(),
            recovered  = report.recovered.len(),
            died       = report.died.len(),
            admitted   = report.admitted.len(),
            discharged = report.discharged.len(),
            "tick stepped"
        );
        Ok(report)
    }

    /// Internal-consistency checks after a tick: every agent inside its
    /// wander bounds, only legal state transitions since `before`, and no
    /// more patients than treatment slots.
    pub fn verify(&self, pop: &Population, before: &[EpiState]) -> DynamicsResult<()> {
        if let Some(agent) = pop.first_out_of_bounds() {
            return Err(DynamicsError::OutOfBounds {
                agent,
                position: pop.position[agent.index()],
                frame:    pop.frame,
            });
        }
        for (i, (&from, &to)) in before.iter().zip(&pop.state).enumerate() {
            if !from.can_become(to) {
                return Err(DynamicsError::IllegalTransition { agent: AgentId(i as u32), from, to });
            }
        }
        let treated = pop.treated_count();
        let capacity = self.interventions.healthcare.capacity;
        if treated > capacity {
            return Err(DynamicsError::OverCapacity { treated, capacity });
        }
        Ok(())
    }
}
