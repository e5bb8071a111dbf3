//! Disease progression and treatment gating, applied after transmission.
//!
//! 1. `Infectious` agents whose incubation is over become `Sick`.
//! 2. `Sick` agents at their outcome frame resolve to `Dead` or `Immune` and
//!    free their treatment slot.
//! 3. If capacity has shrunk below the patient count, the excess patients
//!    are discharged, highest id first.  Untreated `Sick` agents are then
//!    admitted in ascending id order while a slot is free.

use epi_core::{AgentId, EpiState, Tick};
use epi_policy::{DiseaseCourse, HealthcarePolicy};
use epi_population::Population;

use crate::TickReport;

pub fn progress(pop: &mut Population, course: &DiseaseCourse, now: Tick, report: &mut TickReport) {
    for i in 0..pop.count {
        if pop.state[i] == EpiState::Infectious && course.incubation_over(pop.infection_frame[i], now) {
            pop.state[i] = EpiState::Sick;
            // An incubation lengthened after scheduling can push onset past
            // the outcome tick; the agent still spends one tick sick.
            pop.recovery[i].defer_past(now);
            report.became_sick.push(AgentId(i as u32));
        }
    }
}

pub fn resolve_outcomes(
    pop:        &mut Population,
    healthcare: &HealthcarePolicy,
    now:        Tick,
    report:     &mut TickReport,
) {
    for i in 0..pop.count {
        if pop.state[i] != EpiState::Sick || pop.recovery[i].outcome_tick > now {
            continue;
        }
        let risk = healthcare.effective_risk(pop.recovery[i].base_risk, pop.in_treatment[i]);
        let outcome = pop.recovery[i].resolve(risk);
        pop.state[i] = outcome;
        pop.in_treatment[i] = false;
        let id = AgentId(i as u32);
        if outcome == EpiState::Dead {
            pop.destination[i] = None;
            pop.at_destination[i] = false;
            report.died.push(id);
        } else {
            report.recovered.push(id);
        }
    }
}

pub fn admit(pop: &mut Population, healthcare: &HealthcarePolicy, report: &mut TickReport) {
    let mut treated = pop.treated_count();
    for i in (0..pop.count).rev() {
        if treated <= healthcare.capacity {
            break;
        }
        if pop.in_treatment[i] {
            pop.in_treatment[i] = false;
            treated -= 1;
            report.discharged.push(AgentId(i as u32));
        }
    }
    for i in 0..pop.count {
        if !healthcare.admits(treated) {
            break;
        }
        if pop.state[i] == EpiState::Sick && !pop.in_treatment[i] {
            pop.in_treatment[i] = true;
            treated += 1;
            report.admitted.push(AgentId(i as u32));
        }
    }
}
