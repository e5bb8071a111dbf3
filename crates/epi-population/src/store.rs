//! Core agent storage: `Population` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! The movement phase needs `&mut AgentRngs` (exclusive access to each
//! agent's RNG) and `&Population` (shared read access to start-of-tick state)
//! at the same time.  Keeping the RNGs in a separate struct lets the borrow
//! checker see the two borrows as disjoint:
//!
//! ```ignore
//! let pop: &Population = &sim.population;
//! let moves = rngs.inner
//!     .par_iter_mut()
//!     .enumerate()
//!     .map(|(i, rng)| step_agent(AgentId(i as u32), pop, rng))
//!     .collect::<Vec<_>>();
//! ```

use epi_core::{AgentId, AgentRng, Bounds, EpiError, EpiResult, EpiState, RecoveryVector, Tick, Vec2};

use crate::{AgentRecord, PopulationSnapshot};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`Population`] to enable
/// simultaneous `&mut AgentRngs` + `&Population` borrows.
#[derive(Debug)]
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── Population ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for every agent.
///
/// Every `Vec` field has exactly `count` elements and the `AgentId` value is
/// the index into all of them:
///
/// ```ignore
/// let pos = pop.position[agent.index()];
/// ```
///
/// The store is only ever written by `population_init` and the stepper;
/// observers get `&Population`.
#[derive(Debug)]
pub struct Population {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// The population's own tick counter.  Infection frames and outcome
    /// ticks are expressed in it; unlike the run clock it never restarts.
    pub frame: Tick,

    /// The global seed every RNG of this population was derived from.
    pub seed: u64,

    // ── Kinematics ────────────────────────────────────────────────────────
    pub position: Vec<Vec2>,
    /// Unit direction of travel.
    pub heading: Vec<Vec2>,
    /// Displacement per tick.
    pub speed: Vec<f64>,
    /// Target point, if the agent is travelling somewhere.
    pub destination: Vec<Option<Vec2>>,
    pub at_destination: Vec<bool>,
    /// Roaming rectangle: the world, or the isolation area.
    pub wander_bounds: Vec<Bounds>,

    // ── Epidemic ──────────────────────────────────────────────────────────
    pub state: Vec<EpiState>,
    pub age: Vec<f64>,
    /// Frame at which the agent was infected; `Tick::NEVER` if never.
    pub infection_frame: Vec<Tick>,
    pub recovery: Vec<RecoveryVector>,
    pub in_treatment: Vec<bool>,

    // ── Intervention bookkeeping ──────────────────────────────────────────
    pub lockdown_eligible: Vec<bool>,
    pub self_isolating: Vec<bool>,
}

impl Population {
    /// Allocate `count` agents with sentinel values: healthy, age 0, at the
    /// world origin, never infected.
    pub(crate) fn new(count: usize, seed: u64, world: Bounds) -> Self {
        Self {
            count,
            frame: Tick::ZERO,
            seed,

            position:       vec![world.min; count],
            heading:        vec![Vec2::EAST; count],
            speed:          vec![0.0; count],
            destination:    vec![None; count],
            at_destination: vec![false; count],
            wander_bounds:  vec![world; count],

            state:           vec![EpiState::Healthy; count],
            age:             vec![0.0; count],
            infection_frame: vec![Tick::NEVER; count],
            recovery:        vec![RecoveryVector::UNSCHEDULED; count],
            in_treatment:    vec![false; count],

            lockdown_eligible: vec![false; count],
            self_isolating:    vec![false; count],
        }
    }

    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    fn check(&self, agent: AgentId) -> EpiResult<usize> {
        let i = agent.index();
        if i < self.count { Ok(i) } else { Err(EpiError::AgentNotFound(agent)) }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Number of agents currently in `state`.
    pub fn count_in(&self, state: EpiState) -> usize {
        self.state.iter().filter(|&&s| s == state).count()
    }

    /// Number of agents currently occupying a treatment slot.
    pub fn treated_count(&self) -> usize {
        self.in_treatment.iter().filter(|&&t| t).count()
    }

    /// First agent (ascending id) whose position lies outside its wander
    /// bounds, if any.
    pub fn first_out_of_bounds(&self) -> Option<AgentId> {
        self.position
            .iter()
            .zip(&self.wander_bounds)
            .position(|(p, b)| !b.contains(*p))
            .map(|i| AgentId(i as u32))
    }

    // ── Destinations ──────────────────────────────────────────────────────

    /// Send `agent` towards `target`.  The target is clamped into the
    /// agent's wander bounds, so a destination can never pull an agent out
    /// of its roaming area.  Dead agents ignore destinations.
    pub fn set_destination(&mut self, agent: AgentId, target: Vec2) -> EpiResult<()> {
        let i = self.check(agent)?;
        if self.state[i] == EpiState::Dead {
            return Ok(());
        }
        self.destination[i]    = Some(self.wander_bounds[i].clamp(target));
        self.at_destination[i] = false;
        Ok(())
    }

    /// Drop the active destination; the agent resumes wandering.
    pub fn clear_destination(&mut self, agent: AgentId) -> EpiResult<()> {
        let i = self.check(agent)?;
        self.destination[i]    = None;
        self.at_destination[i] = false;
        Ok(())
    }

    // ── Row views ─────────────────────────────────────────────────────────

    /// The 15-field row for one agent.
    pub fn record(&self, agent: AgentId) -> EpiResult<AgentRecord> {
        let i = self.check(agent)?;
        let frame = self.infection_frame[i];
        Ok(AgentRecord {
            id:                 agent,
            x:                  self.position[i].x,
            y:                  self.position[i].y,
            heading_x:          self.heading[i].x,
            heading_y:          self.heading[i].y,
            speed:              self.speed[i],
            state:              self.state[i],
            age:                self.age[i],
            infection_frame:    (!frame.is_never()).then_some(frame),
            recovery_vector:    self.recovery[i],
            in_treatment:       self.in_treatment[i],
            active_destination: self.destination[i],
            at_destination:     self.at_destination[i],
            wander_x:           self.wander_bounds[i].x_range(),
            wander_y:           self.wander_bounds[i].y_range(),
        })
    }

    /// Copy the whole table, tagged with the driver's run tick.
    pub fn snapshot(&self, tick: Tick) -> PopulationSnapshot {
        let records = self
            .agent_ids()
            .filter_map(|id| self.record(id).ok())
            .collect();
        PopulationSnapshot { tick, frame: self.frame, records }
    }
}
