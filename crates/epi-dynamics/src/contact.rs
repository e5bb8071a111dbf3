//! Proximity index over susceptible agents.
//!
//! An R-tree (via `rstar`) is bulk-loaded once per tick with the position of
//! every healthy agent.  Each contagious agent then asks for all susceptibles
//! within `infection_range`; the query compares squared distances, so the
//! radius is inclusive.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use epi_core::{AgentId, EpiState, Vec2};
use epi_population::Population;

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct Susceptible {
    point: [f64; 2],
    id:    AgentId,
}

impl RTreeObject for Susceptible {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for Susceptible {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── ContactIndex ──────────────────────────────────────────────────────────────

/// Spatial index of the agents that can still be infected.
pub struct ContactIndex {
    tree: RTree<Susceptible>,
}

impl ContactIndex {
    /// Index every `Healthy` agent at its current position.
    pub fn build(pop: &Population) -> Self {
        let entries = pop
            .state
            .iter()
            .zip(&pop.position)
            .enumerate()
            .filter(|(_, (s, _))| **s == EpiState::Healthy)
            .map(|(i, (_, p))| Susceptible { point: [p.x, p.y], id: AgentId(i as u32) })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Susceptible agents within `range` of `at`, ascending by id.
    pub fn within(&self, at: Vec2, range: f64) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self
            .tree
            .locate_within_distance([at.x, at.y], range * range)
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }
}
