use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use packet_simulator_core_rs::{NetworkConfig, Orchestrator};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod report;

/// Discrete-time simulation of a dispatcher feeding parallel router buffers
#[derive(Parser, Debug, Default)]
#[command(name = "packet-sim", version)]
struct Args {
    /// Network config file (JSON); flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of intermediate routers
    #[arg(long)]
    routers: Option<usize>,

    /// Success probability of each arrival trial
    #[arg(long)]
    probability: Option<f64>,

    /// Packets each router can buffer
    #[arg(long)]
    capacity: Option<usize>,

    /// Smallest packet size in bytes (inclusive)
    #[arg(long)]
    min_size: Option<usize>,

    /// Largest packet size in bytes (exclusive)
    #[arg(long)]
    max_size: Option<usize>,

    /// Packets delivered to the sink per tick
    #[arg(long)]
    bandwidth: Option<usize>,

    /// Ticks to simulate
    #[arg(long)]
    duration: Option<usize>,

    /// Arrival trials per tick
    #[arg(long)]
    trials: Option<usize>,

    /// RNG seed (0 selects the built-in default)
    #[arg(long)]
    seed: Option<u64>,

    /// Independent runs; run i uses seed + i
    #[arg(long, default_value_t = 1)]
    runs: usize,

    /// Emit one JSON object per line instead of text
    #[arg(long)]
    json: bool,

    /// Print only the end-of-run statistics
    #[arg(long)]
    summary_only: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("packet_simulator_core_rs={level},packet_sim={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Merge the optional config file with command-line overrides
fn resolve_config(args: &Args) -> Result<NetworkConfig> {
    let base = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            Some(
                NetworkConfig::from_json(&json)
                    .with_context(|| format!("parsing config file {}", path.display()))?,
            )
        }
        None => None,
    };

    fn pick<T: Copy>(flag: Option<T>, file: Option<T>, name: &str) -> Result<T> {
        flag.or(file)
            .ok_or_else(|| anyhow!("missing --{name} (and no config file provides it)"))
    }

    let config = NetworkConfig {
        num_intermediate_routers: pick(
            args.routers,
            base.as_ref().map(|c| c.num_intermediate_routers),
            "routers",
        )?,
        arrival_probability: pick(
            args.probability,
            base.as_ref().map(|c| c.arrival_probability),
            "probability",
        )?,
        router_buffer_capacity: pick(
            args.capacity,
            base.as_ref().map(|c| c.router_buffer_capacity),
            "capacity",
        )?,
        min_packet_size: pick(
            args.min_size,
            base.as_ref().map(|c| c.min_packet_size),
            "min-size",
        )?,
        max_packet_size: pick(
            args.max_size,
            base.as_ref().map(|c| c.max_packet_size),
            "max-size",
        )?,
        bandwidth: pick(args.bandwidth, base.as_ref().map(|c| c.bandwidth), "bandwidth")?,
        duration: pick(args.duration, base.as_ref().map(|c| c.duration), "duration")?,
        arrival_trials: args
            .trials
            .or(base.as_ref().map(|c| c.arrival_trials))
            .unwrap_or(packet_simulator_core_rs::arrivals::DEFAULT_ARRIVAL_TRIALS),
        rng_seed: args
            .seed
            .or(base.as_ref().map(|c| c.rng_seed))
            .unwrap_or_default(),
    };

    config.validate().context("invalid network configuration")?;
    Ok(config)
}

fn run_once(args: &Args, run: usize, config: NetworkConfig, out: &mut impl Write) -> Result<()> {
    info!(run, seed = config.rng_seed, "starting run");
    let mut orchestrator = Orchestrator::new(config).context("building simulation")?;

    if args.runs > 1 && !args.json {
        writeln!(out, "=== Run {} (seed {}) ===", run + 1, orchestrator.config().rng_seed)?;
    }

    while !orchestrator.is_finished() {
        let report = orchestrator.tick().context("simulation step failed")?;
        if args.summary_only {
            continue;
        }
        if args.json {
            let line = serde_json::json!({ "run": run, "tick": report });
            writeln!(out, "{}", serde_json::to_string(&line)?)?;
        } else {
            write!(out, "{}", report::format_tick(&report)?)?;
        }
    }

    let stats = orchestrator.final_statistics();
    if args.json {
        let line = serde_json::json!({ "run": run, "statistics": stats });
        writeln!(out, "{}", serde_json::to_string(&line)?)?;
    } else {
        write!(out, "{}", report::format_statistics(&stats)?)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.runs == 0 {
        return Err(anyhow!("--runs must be at least 1"));
    }
    let config = resolve_config(&args)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for run in 0..args.runs {
        let mut run_config = config.clone();
        run_config.rng_seed = config.rng_seed.wrapping_add(run as u64);
        run_once(&args, run, run_config, &mut out)?;
    }
    out.flush()?;
    Ok(())
}
