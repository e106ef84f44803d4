//! dispatch — run emergency-dispatch scenarios from the command line.
//!
//! ```text
//! dispatch run scenarios/city --out results --log results/dispatch.log -v
//! dispatch generate scenarios/random --seed 7 --nodes 200 --disasters 80
//! ```
//!
//! `run` reads `edges.csv`, `teams.csv`, `disasters.csv` and an optional
//! `road_events.csv`, dispatches every disaster, prints the report and
//! writes `report.txt`, `assignments.csv` and `summary.json`.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use er_core::{DispatchConfig, ValidationPolicy};
use er_dispatch::NoopObserver;
use er_output::{CsvWriter, NarrativeLog, RecordObserver, REPORT_FILE, RunSummary, SUMMARY_FILE};
use er_scenario::{GeneratorParams, Scenario, random_scenario};

#[derive(Parser, Debug)]
#[command(name = "dispatch", version, about, long_about = None)]
struct Cli {
    /// Verbose logging to stderr. Repeat for more (-v, -vv, -vvv).
    /// `RUST_LOG`, when set, takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a scenario directory and dispatch every disaster.
    Run(RunArgs),

    /// Write a seeded random scenario directory.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Directory holding the scenario CSVs.
    dir: PathBuf,

    /// JSON dispatch configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory for the report, CSV and JSON files.
    #[arg(long, default_value = "output")]
    out: PathBuf,

    /// Write a narrative log of the run to this file.
    #[arg(long)]
    log: Option<PathBuf>,

    /// Reject roads, teams and disasters outside the network.
    #[arg(long)]
    strict: bool,

    /// Do not print the report to stdout.
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Directory to write the scenario CSVs into.
    dir: PathBuf,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, default_value_t = GeneratorParams::default().nodes)]
    nodes: u32,

    #[arg(long, default_value_t = GeneratorParams::default().chords)]
    chords: usize,

    #[arg(long, default_value_t = GeneratorParams::default().teams_per_kind)]
    teams_per_kind: usize,

    #[arg(long, default_value_t = GeneratorParams::default().disasters)]
    disasters: usize,

    #[arg(long, default_value_t = GeneratorParams::default().blocked_roads)]
    blocked_roads: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run(args) => run(&args),
        Commands::Generate(args) => generate(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ── run ───────────────────────────────────────────────────────────────────────

fn load_config(args: &RunArgs) -> Result<DispatchConfig> {
    let mut config = match &args.config {
        Some(path) => DispatchConfig::from_json_path(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => DispatchConfig::default(),
    };
    if args.strict {
        config.validation = ValidationPolicy::Strict;
    }
    Ok(config)
}

fn run(args: &RunArgs) -> Result<()> {
    let config = load_config(args)?;
    tracing::info!(?config, dir = %args.dir.display(), "starting run");

    let scenario = Scenario::load_dir(&args.dir)
        .with_context(|| format!("loading scenario from {}", args.dir.display()))?;
    let (mut engine, events) = scenario.into_engine(config).context("building engine")?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;
    let mut records = RecordObserver::new(CsvWriter::new(&args.out)?);

    match &args.log {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut narrative = NarrativeLog::new(BufWriter::new(file));
            engine.run_with_events(&events, &mut (&mut records, &mut narrative));
            if let Some(e) = narrative.take_error() {
                tracing::warn!(error = %e, "narrative log incomplete");
            }
        }
        None => engine.run_with_events(&events, &mut (&mut records, NoopObserver)),
    }
    if let Some(e) = records.take_error() {
        return Err(e).context("writing assignments.csv");
    }

    let summary = RunSummary::from_engine(&engine);
    write_outputs(&summary, &args.out)?;
    if !args.quiet {
        print!("{summary}");
    }

    tracing::info!(
        processed = engine.processed(),
        handled = summary.handled,
        unreachable = summary.unreachable,
        "run complete",
    );
    Ok(())
}

fn write_outputs(summary: &RunSummary, out: &Path) -> Result<()> {
    let report = out.join(REPORT_FILE);
    summary
        .write_report(&report)
        .with_context(|| format!("writing {}", report.display()))?;
    let json = out.join(SUMMARY_FILE);
    summary
        .write_summary_json(&json)
        .with_context(|| format!("writing {}", json.display()))?;
    Ok(())
}

// ── generate ──────────────────────────────────────────────────────────────────

fn generate(args: &GenerateArgs) -> Result<()> {
    let params = GeneratorParams {
        nodes:          args.nodes,
        chords:         args.chords,
        teams_per_kind: args.teams_per_kind,
        disasters:      args.disasters,
        blocked_roads:  args.blocked_roads,
        ..GeneratorParams::default()
    };
    let scenario = random_scenario(&params, args.seed);
    scenario
        .write_dir(&args.dir)
        .with_context(|| format!("writing scenario to {}", args.dir.display()))?;

    println!(
        "wrote {} roads, {} teams, {} disasters, {} road events to {}",
        scenario.roads.len(),
        scenario.teams.len(),
        scenario.disasters.len(),
        scenario.events.len(),
        args.dir.display(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_run() {
        let cli = Cli::try_parse_from(["dispatch", "-vv", "run", "city", "--strict", "--out", "res"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.dir, PathBuf::from("city"));
        assert_eq!(args.out, PathBuf::from("res"));
        assert!(args.strict);
        assert!(args.log.is_none());
    }

    #[test]
    fn cli_parse_generate_defaults() {
        let cli = Cli::try_parse_from(["dispatch", "generate", "out", "--seed", "9"]).unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.seed, 9);
        assert_eq!(args.nodes, GeneratorParams::default().nodes);
    }

    #[test]
    fn strict_flag_overrides_config() {
        let cli = Cli::try_parse_from(["dispatch", "run", "x", "--strict"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert!(load_config(&args).unwrap().validation.is_strict());
    }

    #[test]
    fn generate_then_run_writes_outputs() {
        let tmp = tempfile::tempdir().unwrap();
        let scenario_dir = tmp.path().join("scenario");
        let out = tmp.path().join("out");

        generate(&GenerateArgs {
            dir:            scenario_dir.clone(),
            seed:           3,
            nodes:          20,
            chords:         10,
            teams_per_kind: 1,
            disasters:      6,
            blocked_roads:  2,
        })
        .unwrap();

        run(&RunArgs {
            dir:    scenario_dir,
            config: None,
            out:    out.clone(),
            log:    Some(tmp.path().join("dispatch.log")),
            strict: true,
            quiet:  true,
        })
        .unwrap();

        for file in [REPORT_FILE, SUMMARY_FILE, er_output::ASSIGNMENTS_FILE] {
            assert!(out.join(file).exists(), "{file} missing");
        }
        let log = std::fs::read_to_string(tmp.path().join("dispatch.log")).unwrap();
        assert!(log.contains("Handling Disaster ID"));
    }
}
