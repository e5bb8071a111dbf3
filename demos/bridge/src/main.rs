//! bridge: environments × scenarios.
//!
//! Pairs population environments with intervention scenarios through
//! `SimulationVariant` and runs each pairing once:
//!
//! | Run                     | Environment           | Adjustments                                   |
//! |-------------------------|-----------------------|-----------------------------------------------|
//! | `high_self_isolation`   | `HighDensity`         | self-isolation scenario                        |
//! | `low_lockdown`          | `LowDensity`          | lockdown scenario, no healthcare               |
//! | `population_display`    | `PopulationDependent` | dark plot, colorblind                          |
//! | `population_aged`       | `PopulationDependent` | 5000 agents, ages 20/80, linear risk 35→50     |
//! | `scenario_display`      | `ScenarioDependent`   | dark plot, colorblind                          |
//! | `scenario_lockdown`     | `ScenarioDependent`   | lockdown 0.5/0.9, no healthcare                |
//!
//! ```text
//! cargo run -p bridge --release -- [scenario] [config.json]
//! ```
//!
//! The optional scenario name (`lockdown`, `self-isolation`,
//! `reduced-interaction`) is added to every run on top of its own
//! adjustments; the optional JSON file is the base configuration.

mod report;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use epi_core::{Config, EpiState, RiskCurve};
use epi_output::StateBuckets;
use epi_sim::{Environment, Scenario, SimulationVariant};
use tracing::info;
use tracing_subscriber::EnvFilter;

use report::RunObserver;

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_ROOT: &str = "output/bridge";
const SEED:        u64  = 7;
/// Horizon of the two preset-environment runs.
const PRESET_STEPS: u64 = 300;
/// Horizon of the variant runs.
const VARIANT_STEPS: u64 = 10;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config(path: Option<&str>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config { seed: Some(SEED), ..Config::default() });
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let config: Config = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    config.validate()?;
    Ok(config)
}

fn instantiate(name: &str, variant: &mut SimulationVariant) -> Result<()> {
    let dir = Path::new(OUTPUT_ROOT).join(name);
    let mut obs = RunObserver::new(&dir, name, None)?;

    let t0 = Instant::now();
    let last = variant.instantiate(&mut obs)?;
    obs.finish()?;

    let census = variant
        .simulation()
        .population()
        .map(StateBuckets::from_population)
        .unwrap_or_default();
    println!(
        "{:<22} {:<20} {:>6} {:>8} {:>6} {:>7} {:>5} {:>8.3}s",
        name,
        format!("{:?}", variant.environment()),
        last.len(),
        census.len(EpiState::Healthy),
        census.len(EpiState::Sick) + census.len(EpiState::Infectious),
        census.len(EpiState::Immune),
        census.len(EpiState::Dead),
        t0.elapsed().as_secs_f64(),
    );
    info!(run = name, rows = obs.snapshot_rows + obs.summary_rows, "variant done");
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let extra: Scenario = args.next().as_deref().unwrap_or("").parse()?;
    let base = load_config(args.next().as_deref())?;
    info!(scenario = %extra, "bridge demo starting");

    println!(
        "{:<22} {:<20} {:>6} {:>8} {:>6} {:>7} {:>5} {:>9}",
        "Run", "Environment", "Agents", "Healthy", "Ill", "Immune", "Dead", "Time"
    );
    println!("{}", "-".repeat(90));

    let mut v = SimulationVariant::with_config(Environment::HighDensity, base.clone());
    v.add_scenario(Scenario::SelfIsolation).add_scenario(extra).set_simulation_steps(PRESET_STEPS);
    instantiate("high_self_isolation", &mut v)?;

    let mut v = SimulationVariant::with_config(Environment::LowDensity, base.clone());
    v.add_scenario(Scenario::Lockdown)
        .add_scenario(extra)
        .no_healthcare()
        .set_simulation_steps(PRESET_STEPS);
    instantiate("low_lockdown", &mut v)?;

    let mut v = SimulationVariant::with_config(Environment::PopulationDependent, base.clone());
    v.add_scenario(extra)
        .set_simulation_steps(VARIANT_STEPS)
        .set_plot_style("dark")
        .set_colorblind(true, "deuteranopia");
    instantiate("population_display", &mut v)?;

    let mut v = SimulationVariant::with_config(Environment::PopulationDependent, base.clone());
    v.add_scenario(extra)
        .set_simulation_steps(VARIANT_STEPS)
        .set_population_size(5_000)
        .set_population_age(20.0, 80.0)
        .enable_age_risk(35.0, 50.0, 0.3, RiskCurve::Linear);
    instantiate("population_aged", &mut v)?;

    let mut v = SimulationVariant::with_config(Environment::ScenarioDependent, base.clone());
    v.add_scenario(extra)
        .set_simulation_steps(VARIANT_STEPS)
        .set_plot_style("dark")
        .set_colorblind(true, "deuteranopia");
    instantiate("scenario_display", &mut v)?;

    let mut v = SimulationVariant::with_config(Environment::ScenarioDependent, base);
    v.add_scenario(extra)
        .set_simulation_steps(VARIANT_STEPS)
        .apply_lockdown(0.5, 0.9)
        .no_healthcare();
    instantiate("scenario_lockdown", &mut v)?;

    println!("\nAll simulations ended; output in {OUTPUT_ROOT}/");
    Ok(())
}
