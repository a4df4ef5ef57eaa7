//! Replays a Lamport clock scenario and prints the trace.
//!
//! Usage: `lamport-demo [scenario.json]`. Without an argument the built-in
//! three-process reference scenario runs. Log verbosity follows `RUST_LOG`.

use anyhow::Context;
use lamport_clock::{MemoryRecorder, Scenario, Simulation};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("lamport_clock=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let scenario = match std::env::args().nth(1) {
        Some(path) => Scenario::from_path(&path).with_context(|| format!("loading scenario {}", path))?,
        None => Scenario::reference(),
    };
    info!(processes = scenario.processes.len(), steps = scenario.steps.len(), "starting simulation");

    let recorder = MemoryRecorder::new();
    let mut sim = Simulation::for_scenario(&scenario, recorder.clone())?;
    let rule = "-".repeat(50);

    println!("## Lamport clock simulation ##");
    println!("{}", rule);
    println!("Initial states: {}", sim.snapshot());
    println!("{}", rule);

    let mut shown = 0;
    for step in &scenario.steps {
        let snapshot = sim.apply(step)?;
        let records = recorder.records();
        for record in &records[shown..] {
            println!("{}", record);
        }
        shown = records.len();
        println!("States: {}", snapshot);
        println!("{}", rule);
    }

    println!("## Simulation finished ##");
    println!("Final states: {}", sim.snapshot());
    Ok(())
}
