//! CSV output backend.
//!
//! Creates two files in the output directory:
//! - `agent_snapshots.csv`
//! - `tick_summaries.csv`
//!
//! Booleans are written as `0`/`1`; missing optional values as empty fields.

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open both files and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(AgentSnapshotRow::HEADERS)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(TickSummaryRow::HEADERS)?;

        Ok(Self { snapshots, summaries, finished: false })
    }
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

fn flag(b: bool) -> String {
    (b as u8).to_string()
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.agent_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.heading_x.to_string(),
                row.heading_y.to_string(),
                row.speed.to_string(),
                row.state.as_str().to_owned(),
                row.age.to_string(),
                opt(row.infection_frame),
                opt(row.outcome_tick),
                row.base_risk.to_string(),
                row.fate_draw.to_string(),
                flag(row.in_treatment),
                opt(row.destination_x),
                opt(row.destination_y),
                flag(row.at_destination),
                row.wander_x[0].to_string(),
                row.wander_x[1].to_string(),
                row.wander_y[0].to_string(),
                row.wander_y[1].to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.frame.to_string(),
            row.healthy.to_string(),
            row.infectious.to_string(),
            row.sick.to_string(),
            row.immune.to_string(),
            row.dead.to_string(),
            row.treated.to_string(),
            row.new_infections.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
