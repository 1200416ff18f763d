use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Parser;
use log::info;

use mlq_sim::records;
use mlq_sim::{Sim, SimError};

/// mlq_sim: a preemptive multilevel-queue CPU scheduler simulator.
///
/// Three ready queues: level 1 is round robin with a 1-tick quantum,
/// level 2 round robin with a 3-tick quantum, level 3 shortest-job-
/// first running until completion or preemption by a higher level.
/// Reads `label;burst;arrival;level;priority` records and writes the
/// per-process timing table plus summary means.
#[derive(Debug, Parser)]
struct Opts {
    /// Input record file
    input: PathBuf,

    /// Output file (defaults to output_<input file name>, beside the input)
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Increase verbosity (-v logs every scheduling event)
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) -> Result<()> {
    let loglevel = match verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };

    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        loglevel,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}

fn default_output(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "results".to_string());
    input.with_file_name(format!("output_{name}"))
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    init_logging(opts.verbose)?;

    let records = records::load_records(&opts.input)?;
    info!("loaded {} process record(s)", records.len());

    let source = opts.input.display().to_string();
    let output = opts.output.unwrap_or_else(|| default_output(&opts.input));

    let mut sim = Sim::new(records);
    match sim.run() {
        Ok(report) => {
            records::write_report(&output, &report, &source, true)?;
            info!("results written to {}", output.display());
            Ok(())
        }
        Err(SimError::TickCeiling { ticks, partial }) => {
            records::write_report(&output, &partial, &source, false)?;
            bail!(
                "simulation aborted at t={ticks}; partial results written to {}",
                output.display()
            );
        }
        Err(e) => Err(e.into()),
    }
}
