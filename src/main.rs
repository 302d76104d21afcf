//! `mq-schedule` command-line entry point.
//!
//! - `run`: ingest a descriptor file, simulate the selected algorithms on
//!   every queue, and write the report.
//! - `generate`: write a random descriptor file.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mq_schedule::config::Config;
use mq_schedule::dispatching::IdleAdvance;
use mq_schedule::ingest::ingest_file;
use mq_schedule::report::{aggregate_all, MetricsSink, OutputFormat};
use mq_schedule::scheduler::{Algorithm, Simulation};
use mq_schedule::validation::validate_registry;
use mq_schedule::workload::WorkloadSpec;

/// Multi-queue CPU scheduling simulator
#[derive(Parser, Debug)]
#[command(name = "mq-schedule", version)]
#[command(about = "Simulate FCFS, SJF and priority scheduling over independent process queues")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate scheduling for a descriptor file
    Run(RunArgs),
    /// Generate a random descriptor file
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Descriptor file (`burst:priority:arrival:queue_id` per line)
    input: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Report destination (stdout when omitted)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Algorithm to run; repeat for several (default: all)
    #[arg(long = "algorithm", short = 'a')]
    algorithms: Vec<Algorithm>,

    /// Report format: text or json
    #[arg(long, short = 'f')]
    format: Option<OutputFormat>,

    /// Idle clock policy for SJF/priority: tick or next-arrival
    #[arg(long)]
    idle_advance: Option<IdleAdvance>,

    /// Refuse input with negative burst or arrival times
    #[arg(long)]
    strict: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Number of queues
    #[arg(long, default_value_t = 3)]
    queues: usize,

    /// Number of processes across all queues
    #[arg(long, default_value_t = 20)]
    processes: usize,

    /// Largest burst time
    #[arg(long, default_value_t = 10)]
    max_burst: i64,

    /// Largest priority value
    #[arg(long, default_value_t = 5)]
    max_priority: i64,

    /// Latest arrival time
    #[arg(long, default_value_t = 20)]
    max_arrival: i64,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Destination file (stdout when omitted)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => run(args),
        Command::Generate(args) => generate(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: RunArgs) -> Result<()> {
    let cfg = resolve_config(args)?;
    info!("starting mq-schedule with config {:?}", cfg);

    let Some(input) = cfg.input.as_ref() else {
        bail!("no input file given (pass INPUT or set input in the config)");
    };
    let (registry, summary) =
        ingest_file(input).with_context(|| format!("ingesting {}", input.display()))?;
    if summary.skipped > 0 {
        warn!("skipped {} malformed line(s)", summary.skipped);
    }

    if let Err(errors) = validate_registry(&registry) {
        for err in &errors {
            warn!("{:?}: {}", err.kind, err.message);
        }
        if cfg.strict {
            bail!("input failed validation with {} error(s)", errors.len());
        }
    }

    let runs = Simulation::new(&registry)
        .with_idle_advance(cfg.idle_advance)
        .run_all(&cfg.algorithms);

    let mut sink = open_sink(cfg.format, cfg.output.as_ref())?;
    aggregate_all(&runs, &mut sink).context("writing report")?;

    info!(
        queues = registry.len(),
        processes = registry.total_processes(),
        runs = runs.len(),
        "done"
    );
    Ok(())
}

fn resolve_config(args: RunArgs) -> Result<Config> {
    let mut cfg = Config::load(args.config)?;
    if let Some(input) = args.input {
        cfg.input = Some(input);
    }
    if let Some(output) = args.output {
        cfg.output = Some(output);
    }
    if !args.algorithms.is_empty() {
        let mut algorithms = Vec::new();
        for a in args.algorithms {
            if !algorithms.contains(&a) {
                algorithms.push(a);
            }
        }
        cfg.algorithms = algorithms;
    }
    if let Some(format) = args.format {
        cfg.format = format;
    }
    if let Some(idle) = args.idle_advance {
        cfg.idle_advance = idle;
    }
    cfg.strict |= args.strict;
    Ok(cfg)
}

fn open_sink(format: OutputFormat, output: Option<&PathBuf>) -> Result<Box<dyn MetricsSink>> {
    let sink = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating report {}", path.display()))?;
            format.sink(BufWriter::new(file))
        }
        None => format.sink(io::stdout()),
    };
    Ok(sink)
}

fn generate(args: GenerateArgs) -> Result<()> {
    let spec = WorkloadSpec {
        queues: args.queues,
        processes: args.processes,
        max_burst: args.max_burst,
        max_priority: args.max_priority,
        max_arrival: args.max_arrival,
        seed: args.seed,
    };
    let text = spec.render()?;

    match args.output {
        Some(path) => {
            fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), processes = spec.processes, "workload written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
