//! Transmission phase.
//!
//! Reads positions and states as they were at the start of the tick.
//! Sources are visited in ascending id order, and each source's candidates
//! in ascending id order, so a seeded run always produces the same
//! infections.  The transmission draw comes from the *target's* RNG.
//!
//! An agent infected this tick does not act as a source until the next one.

use epi_core::{EpiState, Tick};
use epi_policy::{DiseaseCourse, SelfIsolationPolicy};
use epi_population::{AgentRngs, Population};

use crate::{ContactIndex, Infection};

/// Decide this tick's infections.  Does not modify the population.
pub fn find_infections(
    pop:       &Population,
    rngs:      &mut AgentRngs,
    index:     &ContactIndex,
    course:    &DiseaseCourse,
    isolation: Option<&SelfIsolationPolicy>,
) -> Vec<Infection> {
    let mut infected = vec![false; pop.count];
    let mut found = Vec::new();
    if index.is_empty() || course.infection_chance == 0.0 {
        return found;
    }

    for source in pop.agent_ids() {
        let s = source.index();
        if !pop.state[s].is_contagious() {
            continue;
        }
        for target in index.within(pop.position[s], course.infection_range) {
            let t = target.index();
            if infected[t] || !contact_allowed(pop, isolation, s, t) {
                continue;
            }
            if course.transmits(rngs.get_mut(target)) {
                infected[t] = true;
                found.push(Infection { source, target });
            }
        }
    }
    found
}

/// Self-isolation contact filter.  When traveling agents may not infect,
/// a pair involving an isolating agent only counts if the other agent
/// stands inside the isolating agent's bounds.
fn contact_allowed(pop: &Population, isolation: Option<&SelfIsolationPolicy>, a: usize, b: usize) -> bool {
    let Some(policy) = isolation else {
        return true;
    };
    let ok = |own: usize, other: usize| {
        !pop.self_isolating[own] || policy.permits_contact(&pop.wander_bounds[own], pop.position[other])
    };
    ok(a, b) && ok(b, a)
}

/// Turn the targets into fresh `Infectious` agents at frame `now`.
pub fn apply_infections(
    pop:        &mut Population,
    rngs:       &mut AgentRngs,
    course:     &DiseaseCourse,
    infections: &[Infection],
    now:        Tick,
) {
    for inf in infections {
        let t = inf.target.index();
        debug_assert_eq!(pop.state[t], EpiState::Healthy);
        pop.state[t]           = EpiState::Infectious;
        pop.infection_frame[t] = now;
        pop.recovery[t]        = course.schedule(now, pop.age[t], rngs.get_mut(inf.target));
    }
}
