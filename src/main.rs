//! `inspect` - recommend reference records and correct inspection checklists.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use inspect::{Engine, EngineConfig, ReferenceRecord, WorkingReport};
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

/// Vehicle inspection assistant.
#[derive(Parser, Debug)]
#[command(name = "inspect")]
#[command(about = "Recommend reference records and correct inspection checklists")]
struct Args {
    /// YAML configuration file (defaults to the built-in shop policy)
    #[arg(short, long, global = true, env = "INSPECT_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank a reference catalog against a working report
    Recommend {
        /// JSON array of reference records
        #[arg(long)]
        catalog: PathBuf,

        /// JSON working report (vehicleModel, symptom, currentMileage, ...)
        #[arg(long)]
        input: PathBuf,

        /// Merge the candidate at this rank (1-based) into the report and
        /// print the merged report instead of the ranking
        #[arg(long)]
        apply: Option<usize>,
    },
    /// Apply maintenance rules to a working report's checklist
    Correct {
        /// JSON working report
        #[arg(long)]
        report: PathBuf,

        /// Calendar year used for the vehicle age (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.json_logs);

    let engine = match &args.config {
        Some(path) => {
            let cfg = EngineConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?;
            tracing::info!(config = %path.display(), name = ?cfg.name, "loaded configuration");
            Engine::new(&cfg)?
        }
        None => Engine::default(),
    };

    match args.command {
        Command::Recommend {
            catalog,
            input,
            apply,
        } => {
            let catalog: Vec<ReferenceRecord> = read_json(&catalog)?;
            let report: WorkingReport = read_json(&input)?;
            let hits = engine.recommend(&catalog, &report);
            tracing::info!(catalog = catalog.len(), hits = hits.len(), "ranked catalog");

            match apply {
                Some(rank) => {
                    let Some(candidate) = rank.checked_sub(1).and_then(|idx| hits.get(idx)) else {
                        bail!("no candidate at rank {rank} ({} returned)", hits.len());
                    };
                    print_json(&report.apply_candidate(candidate))
                }
                None => print_json(&hits),
            }
        }
        Command::Correct { report, year } => {
            let report: WorkingReport = read_json(&report)?;
            let corrected = match year {
                Some(year) => engine.correct_for_year(&report, year),
                None => engine.correct(&report),
            };
            tracing::info!(
                mileage_diff = corrected.corrections.mileage_diff,
                vehicle_age = corrected.corrections.vehicle_age,
                fired = corrected.corrections.fired.len(),
                "corrected checklist"
            );
            print_json(&corrected)
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
