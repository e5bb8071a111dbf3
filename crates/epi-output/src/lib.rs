//! `epi-output`: output writers and reporting observers for rust_epi.
//!
//! | Item                 | Role                                                      |
//! |----------------------|-----------------------------------------------------------|
//! | [`CsvWriter`]        | `agent_snapshots.csv`, `tick_summaries.csv`               |
//! | [`SimOutputObserver`]| drives any [`OutputWriter`] from the simulation hooks     |
//! | [`StateBuckets`]     | agent ids grouped by epidemic state                       |
//! | [`BucketReporter`]   | logs the census (and optionally one state's records)      |
//!
//! # Usage
//!
//! ```rust,ignore
//! use epi_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod census;
pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use census::StateBuckets;
pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::{BucketReporter, SimOutputObserver};
pub use row::{AgentSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;
