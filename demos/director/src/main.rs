//! director: canned simulation recipes built step by step.
//!
//! Runs five simulations in sequence: the default recipe, a custom builder
//! configuration, then the lockdown, self-isolation and reduced-interaction
//! recipes.  Each run writes its CSV files to `output/director/<run>/`.
//!
//! ```text
//! cargo run -p director --release -- [config.json]
//! ```
//!
//! An optional JSON file (any subset of `Config` fields) is used as the base
//! configuration of the custom run.  Set `RUST_LOG=debug` for per-tick logs.

mod report;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use epi_core::{Config, EpiState};
use epi_population::PopulationSnapshot;
use epi_sim::{Director, SimResult, SimulationBuilder};
use tracing::info;
use tracing_subscriber::EnvFilter;

use report::RunObserver;

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_ROOT: &str = "output/director";
const SEED:        u64  = 42;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config(path: Option<&str>) -> Result<Option<Config>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let config: Config = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    config.validate()?;
    Ok(Some(config))
}

struct RunSummary {
    name:    &'static str,
    last:    PopulationSnapshot,
    rows:    usize,
    elapsed: f64,
}

/// Run one recipe with fresh output under `OUTPUT_ROOT/name`.
fn run<F>(name: &'static str, exclusive: Option<EpiState>, f: F) -> Result<RunSummary>
where
    F: FnOnce(&mut RunObserver) -> SimResult<PopulationSnapshot>,
{
    let dir: PathBuf = Path::new(OUTPUT_ROOT).join(name);
    let mut obs = RunObserver::new(&dir, name, exclusive)?;

    let t0 = Instant::now();
    let last = f(&mut obs)?;
    let elapsed = t0.elapsed().as_secs_f64();
    obs.finish()?;

    info!(run = name, agents = last.len(), ticks = last.tick.0, "simulation end");
    Ok(RunSummary { name, last, rows: obs.snapshot_rows + obs.summary_rows, elapsed })
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let base = load_config(std::env::args().nth(1).as_deref())?;
    let mut summaries = Vec::new();

    // 1. Default recipe.
    let mut director = Director::new(SimulationBuilder::new());
    summaries.push(run("default", None, |obs| {
        director.configure_default().configure(|c| c.seed = Some(SEED)).result(obs)
    })?);

    // 2. Custom configuration through the builder directly.
    let mut builder = SimulationBuilder::new();
    if let Some(base) = base {
        builder.configure(|c| *c = base);
    }
    builder
        .population(50.0, 100.0, [0.0, 1.0], [0.0, 1.0])
        .fig(3.0, 5.0)
        .plot("dark", true, "deuteranopia");
    summaries.push(run("custom", Some(EpiState::Infectious), |obs| builder.result(obs))?);

    // 3-5. The intervention recipes, sharing one director.
    let mut director = Director::new(builder);
    summaries.push(run("lockdown", None, |obs| {
        director.configure_lockdown().configure(|c| c.seed = Some(SEED)).result(obs)
    })?);
    summaries.push(run("self_isolation", None, |obs| {
        director.configure_self_isolation().configure(|c| c.seed = Some(SEED)).result(obs)
    })?);
    summaries.push(run("reduced_interaction", Some(EpiState::Sick), |obs| {
        director.configure_reduced_interaction().configure(|c| c.seed = Some(SEED)).result(obs)
    })?);

    // ── Summary table ─────────────────────────────────────────────────────
    println!();
    println!(
        "{:<20} {:>7} {:>8} {:>11} {:>6} {:>7} {:>5} {:>7} {:>9}",
        "Run", "Agents", "Healthy", "Infectious", "Sick", "Immune", "Dead", "Rows", "Time (s)"
    );
    println!("{}", "-".repeat(88));
    for s in &summaries {
        println!(
            "{:<20} {:>7} {:>8} {:>11} {:>6} {:>7} {:>5} {:>7} {:>9.3}",
            s.name,
            s.last.len(),
            s.last.count_in(EpiState::Healthy),
            s.last.count_in(EpiState::Infectious),
            s.last.count_in(EpiState::Sick),
            s.last.count_in(EpiState::Immune),
            s.last.count_in(EpiState::Dead),
            s.rows,
            s.elapsed,
        );
    }
    println!("\nAll simulations ended; output in {OUTPUT_ROOT}/");

    Ok(())
}
