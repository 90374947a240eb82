use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use signal_sim::{render, LaneMap, SignalConfig, SignalController, TickOutcome, View};
use tracing_subscriber::EnvFilter;

/// Runs the four-way signal controller in the terminal.
#[derive(Parser, Debug)]
struct Cli {
    /// JSON file holding the controller configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the simulated traffic; unseeded when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of ticks to run before stopping.
    #[arg(long, default_value_t = 120)]
    ticks: u64,
    /// Overrides the tick period in ms.
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Starting vehicle counts as north,south,east,west.
    #[arg(long, value_delimiter = ',')]
    counts: Option<Vec<u32>>,
    /// Runs without waiting for real time to pass.
    #[arg(long)]
    fast: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let mut ctrl = match cli.seed {
        Some(seed) => SignalController::seeded(config, seed),
        None => SignalController::new(config),
    }
    .context("invalid controller configuration")?;

    ctrl.navigate(View::Simulation);
    print!("{}{}", render::legend(), render::lane_panel(&ctrl));

    let tick = ctrl.config().tick_interval();
    let start = Instant::now();
    ctrl.start(start);

    // In fast mode the clock is simulated by stepping one tick period at a time.
    let mut clock = start;
    while ctrl.ticks() < cli.ticks {
        let now = if cli.fast {
            clock += tick;
            clock
        } else {
            let due = ctrl.next_due().unwrap_or_else(|| Instant::now() + tick);
            std::thread::sleep(due.saturating_duration_since(Instant::now()));
            Instant::now()
        };
        for outcome in ctrl.poll(now) {
            if let TickOutcome::PhaseChange(change) = outcome {
                println!(
                    "-- {} -> {} ({}s){}",
                    change.ended,
                    change.next,
                    change.duration,
                    if change.overdue { " overdue" } else { "" }
                );
            }
        }
        println!("{}", render::lane_panel(&ctrl));
    }

    ctrl.navigate(View::Dashboard);
    print!("{}", render::dashboard(&ctrl));
    Ok(())
}

fn load_config(cli: &Cli) -> Result<SignalConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SignalConfig::default(),
    };
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_ms = tick_ms;
    }
    if let Some(counts) = &cli.counts {
        let counts: [u32; 4] = counts
            .as_slice()
            .try_into()
            .context("--counts takes exactly four values")?;
        config.initial_counts = LaneMap::new(counts);
    }
    Ok(config)
}
