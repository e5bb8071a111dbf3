//! Observers that turn simulation hooks into output.
//!
//! - [`SimOutputObserver`] writes snapshot and summary rows through any
//!   [`OutputWriter`].
//! - [`BucketReporter`] classifies the population into [`StateBuckets`] at the
//!   end of a run and logs the result.

use epi_core::{AgentId, EpiState, Tick};
use epi_dynamics::TickReport;
use epi_population::Population;
use epi_sim::SimObserver;
use tracing::{info, warn};

use crate::row::{AgentSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, StateBuckets};

// ── SimOutputObserver ─────────────────────────────────────────────────────────

/// A [`SimObserver`] that writes agent snapshots and tick summaries to an
/// [`OutputWriter`] backend.
///
/// Observer hooks have no return value, so writer errors are stored.  After
/// `sim.run()` returns, check for them with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            warn!(error = %e, "output write failed");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::new(tick, report));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, population: &Population) {
        let rows: Vec<AgentSnapshotRow> = population
            .agent_ids()
            .filter_map(|id| population.record(id).ok())
            .map(|r| AgentSnapshotRow::new(tick, &r))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _final_tick: Tick, _population: &Population) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}

// ── BucketReporter ────────────────────────────────────────────────────────────

/// Logs a per-state census when a run ends.
///
/// With an `exclusive` state set, the full record of every agent in that
/// state is logged as well.
///
/// ```rust,ignore
/// let mut publisher = Publisher::new();
/// publisher.subscribe(BucketReporter::new("sick").exclusive(EpiState::Sick));
/// ```
pub struct BucketReporter {
    name:      String,
    exclusive: Option<EpiState>,
    last:      Option<StateBuckets>,
}

impl BucketReporter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), exclusive: None, last: None }
    }

    pub fn exclusive(mut self, state: EpiState) -> Self {
        self.exclusive = Some(state);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Census taken at the end of the most recent run.
    pub fn last(&self) -> Option<&StateBuckets> {
        self.last.as_ref()
    }

    fn report_exclusive(&self, state: EpiState, ids: &[AgentId], population: &Population) {
        info!(reporter = %self.name, %state, agents = ids.len(), "exclusive display");
        for &id in ids {
            if let Ok(r) = population.record(id) {
                info!(
                    reporter  = %self.name,
                    id        = id.0,
                    x         = r.x,
                    y         = r.y,
                    speed     = r.speed,
                    age       = r.age,
                    infected  = ?r.infection_frame.map(|t| t.0),
                    treated   = r.in_treatment,
                    wander_x  = ?r.wander_x,
                    wander_y  = ?r.wander_y,
                    "agent"
                );
            }
        }
    }
}

impl SimObserver for BucketReporter {
    fn on_run_end(&mut self, final_tick: Tick, population: &Population) {
        let buckets = StateBuckets::from_population(population);
        info!(reporter = %self.name, tick = final_tick.0, census = %buckets, "population summary");
        if let Some(state) = self.exclusive {
            self.report_exclusive(state, buckets.ids(state), population);
        }
        self.last = Some(buckets);
    }
}
