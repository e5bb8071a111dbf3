//! Movement phase.
//!
//! Every living agent produces one [`Move`] from the start-of-tick state and
//! its own RNG.  Moves land in a separate buffer and are written back only
//! after transmission has read the old positions, so the phase is free of
//! ordering effects and can run on Rayon's pool (`parallel` feature).
//!
//! Per-agent rules, first match wins:
//!
//! | Condition                                   | Effect                          |
//! |---------------------------------------------|---------------------------------|
//! | dead                                        | frozen                          |
//! | lockdown-eligible and compliance draw hits  | stationary this tick            |
//! | destination reached                         | stationary until cleared        |
//! | active destination                          | step `speed` towards it, snap   |
//! | otherwise                                   | wander, reflect off bounds      |

use epi_core::{AgentRng, Bounds, EpiState, Vec2};
use epi_policy::LockdownPolicy;
use epi_population::{AgentRngs, Population};

/// Parameters the movement phase reads every tick.
#[derive(Copy, Clone, Debug)]
pub struct MovementRules {
    pub lockdown:              Option<LockdownPolicy>,
    pub heading_change_chance: f64,
}

/// Kinematic state of one agent after the movement phase.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Move {
    pub position:       Vec2,
    pub heading:        Vec2,
    pub at_destination: bool,
}

impl Move {
    fn stay(pop: &Population, i: usize) -> Self {
        Move {
            position:       pop.position[i],
            heading:        pop.heading[i],
            at_destination: pop.at_destination[i],
        }
    }
}

/// Compute every agent's move, in `AgentId` order.
pub fn plan_moves(pop: &Population, rngs: &mut AgentRngs, rules: &MovementRules) -> Vec<Move> {
    #[cfg(not(feature = "parallel"))]
    {
        rngs.inner
            .iter_mut()
            .enumerate()
            .map(|(i, rng)| step_agent(pop, i, rng, rules))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        rngs.inner
            .par_iter_mut()
            .enumerate()
            .map(|(i, rng)| step_agent(pop, i, rng, rules))
            .collect()
    }
}

/// Write a move buffer back into the store.
pub fn apply_moves(pop: &mut Population, moves: &[Move]) {
    for (i, m) in moves.iter().enumerate() {
        pop.position[i]       = m.position;
        pop.heading[i]        = m.heading;
        pop.at_destination[i] = m.at_destination;
    }
}

fn step_agent(pop: &Population, i: usize, rng: &mut AgentRng, rules: &MovementRules) -> Move {
    if pop.state[i] == EpiState::Dead {
        return Move::stay(pop, i);
    }
    if let Some(lockdown) = &rules.lockdown {
        if pop.lockdown_eligible[i] && lockdown.holds_still(rng) {
            return Move::stay(pop, i);
        }
    }

    let bounds = pop.wander_bounds[i];
    let speed = pop.speed[i];
    match pop.destination[i] {
        Some(_) if pop.at_destination[i] => Move::stay(pop, i),
        Some(target) => seek(pop.position[i], target, speed, &bounds),
        None => {
            let mut heading = pop.heading[i];
            if rng.gen_bool(rules.heading_change_chance) {
                heading = rng.heading();
            }
            wander(pop.position[i], heading, speed, &bounds)
        }
    }
}

/// Step towards `target`, snapping onto it when it is within one step.
pub fn seek(from: Vec2, target: Vec2, speed: f64, bounds: &Bounds) -> Move {
    let delta = target - from;
    let dist = delta.length();
    if dist <= speed {
        return Move {
            position:       bounds.clamp(target),
            heading:        delta.normalized(),
            at_destination: true,
        };
    }
    let heading = delta.normalized();
    Move {
        position: bounds.clamp(from + heading * speed),
        heading,
        at_destination: false,
    }
}

/// Step along `heading`, reflecting off the edges of `bounds` like a
/// billiard ball.  The final clamp only matters for steps longer than the
/// rectangle is wide.
pub fn wander(from: Vec2, heading: Vec2, speed: f64, bounds: &Bounds) -> Move {
    let mut heading = heading.normalized();
    let mut next = from + heading * speed;

    if next.x < bounds.min.x {
        next.x = 2.0 * bounds.min.x - next.x;
        heading.x = -heading.x;
    } else if next.x > bounds.max.x {
        next.x = 2.0 * bounds.max.x - next.x;
        heading.x = -heading.x;
    }
    if next.y < bounds.min.y {
        next.y = 2.0 * bounds.min.y - next.y;
        heading.y = -heading.y;
    } else if next.y > bounds.max.y {
        next.y = 2.0 * bounds.max.y - next.y;
        heading.y = -heading.y;
    }

    Move {
        position: bounds.clamp(next),
        heading,
        at_destination: false,
    }
}
