// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap, converts them to application configs, dispatches to a
// use case and prints the result.
//
// Errors propagate out of `run` to `main`, which prints them
// on stderr and exits non-zero.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::{fs, io::Read};

use crate::application::{
    experiment_use_case::{write_grid, ExperimentPlan, ExperimentUseCase},
    partition_use_case::{PartitionConfig, PartitionOutcome, PartitionUseCase},
};
use crate::infra::{external_tool::CommandTool, metrics::MetricReport};
use commands::{Commands, MetricsArgs, RunArgs};

#[derive(Parser, Debug)]
#[command(
    name = "corpus-split",
    version,
    about = "Stratified train/test corpus splits and experiment glue for text classification."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the matching use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Partition(args) => run_partition(PartitionConfig::try_from(args)?),
            Commands::Halves(args) => run_partition(args.into()),
            Commands::Grid(args) => run_grid(args.into()),
            Commands::Run(args) => run_experiments(args),
            Commands::Metrics(args) => run_metrics(args),
        }
    }
}

fn run_partition(config: PartitionConfig) -> Result<()> {
    let outcome = PartitionUseCase::new(config).execute()?;
    print_partition_summary(&outcome);
    Ok(())
}

fn print_partition_summary(outcome: &PartitionOutcome) {
    if let Some(stats) = &outcome.stats {
        println!("Found {} categories", stats.label_count());
    }
    println!(
        "Training on {} documents -> {}",
        outcome.train_count,
        outcome.train_file.display()
    );
    println!(
        "Testing on {} documents -> {}",
        outcome.test_count,
        outcome.test_file.display()
    );
    if let Some(dropped) = outcome.stats.as_ref().map(|s| s.dropped_total()).filter(|&d| d > 0) {
        println!("Left out {dropped} documents beyond the requested counts");
    }
    println!("Seed: {}", outcome.seed);
}

fn run_grid(plan: ExperimentPlan) -> Result<()> {
    let paths = write_grid(&plan)?;
    for p in &paths {
        println!("{}", p.display());
    }
    Ok(())
}

fn run_experiments(args: RunArgs) -> Result<()> {
    // clap enforces a non-empty command
    let Some(tool) = CommandTool::from_argv(&args.command) else {
        bail!("No tool command given after `--`");
    };

    let summary = ExperimentUseCase::new(args.grid.into(), &tool).execute()?;

    for r in &summary.results {
        match (&r.report, &r.error) {
            (Some(m), _) => println!(
                "{:<40} acc={:.4} p={:.4} r={:.4} f1={:.4}",
                r.name, m.accuracy, m.precision, m.recall, m.f1
            ),
            (None, Some(e)) => println!("{:<40} FAILED: {}", r.name, e),
            (None, None) => {}
        }
    }

    if summary.failed() > 0 {
        bail!(
            "{} of {} experiments failed",
            summary.failed(),
            summary.results.len()
        );
    }
    Ok(())
}

fn run_metrics(args: MetricsArgs) -> Result<()> {
    let text = if args.input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Cannot read tool output from stdin")?;
        buf
    } else {
        fs::read_to_string(&args.input)
            .with_context(|| format!("Cannot read '{}'", args.input.display()))?
    };

    let report = MetricReport::parse(&text)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
