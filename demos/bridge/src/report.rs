//! Observer wiring shared by every run of this demo: CSV output plus a
//! census reporter, with row counts for the summary table.

use std::path::Path;

use anyhow::Result;
use epi_core::{Config, EpiState, Tick};
use epi_dynamics::TickReport;
use epi_output::{BucketReporter, CsvWriter, SimOutputObserver};
use epi_population::Population;
use epi_sim::{Publisher, SimObserver};

pub struct RunObserver {
    output:            SimOutputObserver<CsvWriter>,
    reporters:         Publisher,
    pub snapshot_rows: usize,
    pub summary_rows:  usize,
}

impl RunObserver {
    /// CSV files go to `dir`; the census is logged under `name`, listing the
    /// full records of `exclusive` agents if given.
    pub fn new(dir: &Path, name: &str, exclusive: Option<EpiState>) -> Result<Self> {
        let mut reporter = BucketReporter::new(name);
        if let Some(state) = exclusive {
            reporter = reporter.exclusive(state);
        }
        let mut reporters = Publisher::new();
        reporters.subscribe(reporter);
        Ok(Self {
            output: SimOutputObserver::new(CsvWriter::new(dir)?),
            reporters,
            snapshot_rows: 0,
            summary_rows: 0,
        })
    }

    /// Surface the first output error, if any.
    pub fn finish(&mut self) -> Result<()> {
        match self.output.take_error() {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

impl SimObserver for RunObserver {
    fn on_run_start(&mut self, config: &Config, population: &Population) {
        self.reporters.on_run_start(config, population);
    }

    fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
        self.summary_rows += 1;
        self.output.on_tick_end(tick, report);
        self.reporters.on_tick_end(tick, report);
    }

    fn on_snapshot(&mut self, tick: Tick, population: &Population) {
        self.snapshot_rows += population.count;
        self.output.on_snapshot(tick, population);
    }

    fn on_run_end(&mut self, final_tick: Tick, population: &Population) {
        self.output.on_run_end(final_tick, population);
        self.reporters.on_run_end(final_tick, population);
    }
}
