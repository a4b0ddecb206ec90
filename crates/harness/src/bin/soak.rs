//! Soak runner: repeated fixed-seed scenario runs with digest checks.
//!
//! Exits non-zero on the first determinism drift, which is how CI gates
//! kernel changes.

use anyhow::Context;
use clap::Parser;
use combat_harness::{Scenario, run_scenario, verify_determinism};

#[derive(Debug, Parser)]
#[command(name = "soak", about = "Deterministic combat kernel soak runner")]
struct Args {
    /// Scenario JSON file; the built-in skirmish fixture when omitted.
    #[arg(long)]
    scenario: Option<std::path::PathBuf>,

    /// Number of consecutive seeds to sweep, starting at --seed.
    #[arg(long, default_value_t = 16)]
    seeds: u64,

    /// First seed of the sweep.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Repeated runs per seed that must agree bit-for-bit.
    #[arg(long, default_value_t = 3)]
    repeats: u32,
}

fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = Args::parse();

    let base = match &args.scenario {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("loading scenario from {}", path.display()))?,
        None => Scenario::skirmish(args.seed),
    };

    for offset in 0..args.seeds {
        let mut scenario = base.clone();
        scenario.seed = combat_core::EncounterSeed(args.seed + offset);

        let report = verify_determinism(&scenario, args.repeats)
            .with_context(|| format!("seed {}", args.seed + offset))?;

        tracing::info!(
            seed = args.seed + offset,
            cycles = report.cycles_run,
            events = report.events.len(),
            digest = %report.digest_prefix(),
            "seed stable"
        );
    }

    // One final summary run for the base seed.
    let report = run_scenario(&base);
    tracing::info!(
        scenario = %report.scenario,
        events = report.events.len(),
        "soak sweep complete, no drift"
    );

    Ok(())
}
