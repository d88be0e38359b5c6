//! Command-line interface for the harvester.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::HarvestConfig;
use crate::error::Result;
use crate::output::write_csv;
use crate::pipeline::run_harvest;

/// Default output file name.
const DEFAULT_OUTFILE: &str = "baugesuche_ZH_ZG_MFH.csv";

/// Harvest building-permit publications from the Swiss gazette portal.
#[derive(Parser)]
#[command(name = "amtsblatt-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Harvest matching publications and write them to a CSV file.
    Harvest {
        /// Output CSV path
        #[arg(short, long, default_value = DEFAULT_OUTFILE)]
        output: PathBuf,

        /// Canton codes to harvest (repeatable; default ZH and ZG)
        #[arg(long = "canton")]
        cantons: Vec<String>,

        /// Rubric codes to harvest (repeatable; default BP-ZH and BP-ZG)
        #[arg(long = "rubric")]
        rubrics: Vec<String>,

        /// Listing page size
        #[arg(long)]
        page_size: Option<usize>,

        /// Concurrent detail-fetch workers
        #[arg(long)]
        workers: Option<usize>,

        /// Sort output ascending instead of descending
        #[arg(long)]
        ascending: bool,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Harvest {
            output,
            cantons,
            rubrics,
            page_size,
            workers,
            ascending,
        } => harvest_command(&output, cantons, rubrics, page_size, workers, ascending),
    }
}

/// Build the run configuration from CLI overrides on top of the defaults.
fn build_config(
    cantons: Vec<String>,
    rubrics: Vec<String>,
    page_size: Option<usize>,
    workers: Option<usize>,
    ascending: bool,
) -> HarvestConfig {
    let mut config = HarvestConfig::default();
    if !cantons.is_empty() {
        config.cantons = cantons;
    }
    if !rubrics.is_empty() {
        config.rubrics = rubrics;
    }
    if let Some(size) = page_size {
        config.page_size = size;
    }
    if let Some(count) = workers {
        config.max_workers = count;
    }
    config.sort_descending = !ascending;
    config
}

/// Execute the harvest command.
fn harvest_command(
    output: &std::path::Path,
    cantons: Vec<String>,
    rubrics: Vec<String>,
    page_size: Option<usize>,
    workers: Option<usize>,
    ascending: bool,
) -> Result<()> {
    let config = build_config(cantons, rubrics, page_size, workers, ascending);

    println!(
        "{} cantons {} rubrics {}",
        style("Harvesting").bold(),
        style(config.cantons.join(", ")).cyan(),
        style(config.rubrics.join(", ")).cyan()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Harvesting publications...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let report = match run_harvest(&config) {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Writing CSV...");
    if let Err(e) = write_csv(&report.records, output) {
        pb.finish_and_clear();
        return Err(e);
    }

    pb.finish_and_clear();

    println!("  Discovered: {}", style(report.discovered).green());
    println!("  Matched: {}", style(report.matched).green());
    println!(
        "  Written: {} rows to {}",
        style(report.records.len()).green().bold(),
        output.display()
    );

    Ok(())
}
