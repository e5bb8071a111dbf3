//! Deterministic per-agent and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each agent gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space.
//! This means:
//!
//! - Agents never share RNG state, so the movement phase can run in parallel
//!   without changing results.
//! - Draws made for one agent never shift the stream of another agent.
//!
//! Initialization draws (ages, cohorts, placements) come from a single
//! [`SimRng`] seeded with the same global seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentId, Bounds, Vec2};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Standard normal sample from two uniforms (Box-Muller).
#[inline]
fn box_muller(rng: &mut SmallRng) -> f64 {
    let u1: f64 = rng.r#gen::<f64>().max(f64::EPSILON);
    let u2: f64 = rng.r#gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Uniform point inside `bounds`.
#[inline]
fn point_in(rng: &mut SmallRng, bounds: &Bounds) -> Vec2 {
    Vec2::new(
        rng.gen_range(bounds.min.x..=bounds.max.x),
        rng.gen_range(bounds.min.y..=bounds.max.y),
    )
}

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG.
///
/// Created once per agent by `population_init` and stored in a parallel
/// `Vec<AgentRng>` alongside the population's SoA arrays.
#[derive(Debug)]
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Random unit heading.
    #[inline]
    pub fn heading(&mut self) -> Vec2 {
        Vec2::from_angle(self.0.gen_range(0.0..std::f64::consts::TAU))
    }

    /// Uniform point inside `bounds`.
    #[inline]
    pub fn point_in(&mut self, bounds: &Bounds) -> Vec2 {
        point_in(&mut self.0, bounds)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations (cohort selection, patient-zero
/// seeding, initial placement).
///
/// Used only in single-threaded contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Draw a fresh global seed from OS entropy, for unseeded runs.
    pub fn entropy_seed() -> u64 {
        rand::random::<u64>()
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Normal sample with the given mean and standard deviation.
    #[inline]
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * box_muller(&mut self.0)
    }

    /// Random unit heading.
    #[inline]
    pub fn heading(&mut self) -> Vec2 {
        Vec2::from_angle(self.0.gen_range(0.0..std::f64::consts::TAU))
    }

    #[inline]
    pub fn point_in(&mut self, bounds: &Bounds) -> Vec2 {
        point_in(&mut self.0, bounds)
    }

    /// Pick exactly `k` distinct indices out of `0..n` (partial Fisher-Yates).
    /// `k` is capped at `n`.  The result is sorted ascending.
    pub fn sample_indices(&mut self, n: usize, k: usize) -> Vec<usize> {
        let k = k.min(n);
        let mut picked = rand::seq::index::sample(&mut self.0, n, k).into_vec();
        picked.sort_unstable();
        picked
    }
}
