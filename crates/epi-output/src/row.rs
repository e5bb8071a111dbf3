//! Plain data row types written by output backends.

use epi_core::{EpiState, Tick};
use epi_dynamics::TickReport;
use epi_population::AgentRecord;

/// One agent at a given tick, with the composite record fields flattened.
///
/// Optional values (`infection_frame`, `outcome_tick`, destination) are
/// `None` when the agent never had one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub tick:            u64,
    pub agent_id:        u32,
    pub x:               f64,
    pub y:               f64,
    pub heading_x:       f64,
    pub heading_y:       f64,
    pub speed:           f64,
    pub state:           EpiState,
    pub age:             f64,
    pub infection_frame: Option<u64>,
    pub outcome_tick:    Option<u64>,
    pub base_risk:       f64,
    pub fate_draw:       f64,
    pub in_treatment:    bool,
    pub destination_x:   Option<f64>,
    pub destination_y:   Option<f64>,
    pub at_destination:  bool,
    pub wander_x:        [f64; 2],
    pub wander_y:        [f64; 2],
}

impl AgentSnapshotRow {
    pub const HEADERS: [&'static str; 21] = [
        "tick", "agent_id", "x", "y", "heading_x", "heading_y", "speed", "state", "age",
        "infection_frame", "outcome_tick", "base_risk", "fate_draw", "in_treatment",
        "destination_x", "destination_y", "at_destination",
        "wander_x_min", "wander_x_max", "wander_y_min", "wander_y_max",
    ];

    pub fn new(tick: Tick, record: &AgentRecord) -> Self {
        let rv = record.recovery_vector;
        Self {
            tick:            tick.0,
            agent_id:        record.id.0,
            x:               record.x,
            y:               record.y,
            heading_x:       record.heading_x,
            heading_y:       record.heading_y,
            speed:           record.speed,
            state:           record.state,
            age:             record.age,
            infection_frame: record.infection_frame.map(|t| t.0),
            outcome_tick:    rv.is_scheduled().then_some(rv.outcome_tick.0),
            base_risk:       rv.base_risk,
            fate_draw:       rv.fate_draw,
            in_treatment:    record.in_treatment,
            destination_x:   record.active_destination.map(|d| d.x),
            destination_y:   record.active_destination.map(|d| d.y),
            at_destination:  record.at_destination,
            wander_x:        record.wander_x,
            wander_y:        record.wander_y,
        }
    }
}

/// Per-tick head counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:           u64,
    pub frame:          u64,
    pub healthy:        u64,
    pub infectious:     u64,
    pub sick:           u64,
    pub immune:         u64,
    pub dead:           u64,
    pub treated:        u64,
    pub new_infections: u64,
}

impl TickSummaryRow {
    pub const HEADERS: [&'static str; 9] = [
        "tick", "frame", "healthy", "infectious", "sick", "immune", "dead", "treated", "new_infections",
    ];

    pub fn new(tick: Tick, report: &TickReport) -> Self {
        let c = &report.counts;
        Self {
            tick:           tick.0,
            frame:          report.frame.0,
            healthy:        c.healthy as u64,
            infectious:     c.infectious as u64,
            sick:           c.sick as u64,
            immune:         c.immune as u64,
            dead:           c.dead as u64,
            treated:        c.treated as u64,
            new_infections: report.infections.len() as u64,
        }
    }
}
