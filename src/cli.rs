//! Command line interface
//!
//! Replaces the interactive prompts of a desktop tool: the adjustment is
//! given up front, validated once, then used for the whole run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use boltslot_batch::{
    group_by_thickness, run_by_thickness, run_direct, scan_input_dir, BatchError, BatchSummary,
    RunOptions, ThicknessGrouping,
};
use boltslot_core::{Adjustment, ThicknessAdjustments};
use boltslot_settings::Config;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "boltslot.toml";

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Adjust bolt slot parameters in NC1 files
#[derive(Debug, Parser)]
#[command(name = "boltslot", version, long_version = LONG_VERSION, about)]
pub struct Cli {
    /// Configuration file (.toml or .json)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Folder holding the NC1 files to adjust
    #[arg(short, long, global = true, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Folder receiving the adjusted files
    #[arg(short, long, global = true, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Write a JSON run report to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Keep existing output files instead of replacing them
    #[arg(long, global = true)]
    pub no_overwrite: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply one adjustment to every file in the input folder
    Direct {
        /// Offset added to bolt parameter values, in mm
        #[arg(short, long, allow_hyphen_values = true, value_name = "MM")]
        adjust: String,
    },

    /// Group files by plate thickness and adjust each group separately
    Thickness {
        /// Adjustment for one thickness group, e.g. `6.00=1.5`
        #[arg(
            short = 's',
            long = "set",
            value_name = "T=MM",
            allow_hyphen_values = true,
            required_unless_present = "adjustments_file"
        )]
        set: Vec<String>,

        /// File with one `thickness=adjustment` line per group
        #[arg(long, value_name = "FILE", conflicts_with = "set")]
        adjustments_file: Option<PathBuf>,
    },

    /// List thickness groups and print an adjustment template
    Scan,
}

/// Load the configuration and apply command line overrides
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Loading configuration {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            Config::load_from_file(Path::new(DEFAULT_CONFIG_FILE))
                .with_context(|| format!("Loading configuration {}", DEFAULT_CONFIG_FILE))?
        }
        None => Config::default(),
    };

    if let Some(input) = &cli.input {
        config.paths.input_dir = input.clone();
    }
    if let Some(output) = &cli.output {
        config.paths.output_dir = output.clone();
    }
    if cli.no_overwrite {
        config.output.overwrite = false;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Execute a parsed command line.
///
/// Returns `Ok(false)` when the run completed but some files failed.
pub fn run(cli: Cli) -> Result<bool> {
    let config = resolve_config(&cli)?;
    let options = RunOptions {
        overwrite: config.output.overwrite,
    };

    let summary = match &cli.command {
        Command::Direct { adjust } => {
            let adjustment = Adjustment::parse_in(adjust, &config.adjustment_range())
                .map_err(BatchError::InvalidAdjustment)?;
            let files = scan_input_dir(&config.paths.input_dir)?;
            run_direct(&files, &config.paths.output_dir, adjustment, options)?
        }
        Command::Thickness {
            set,
            adjustments_file,
        } => {
            let files = scan_input_dir(&config.paths.input_dir)?;
            let grouping = group_by_thickness(&files);
            let entries = match adjustments_file {
                Some(path) => fs::read_to_string(path)
                    .with_context(|| format!("Reading adjustments {}", path.display()))?
                    .lines()
                    .map(str::to_string)
                    .collect(),
                None => set.clone(),
            };
            let adjustments = parse_adjustments(&entries, &grouping, &config)?;
            run_by_thickness(&grouping, &adjustments, &config.paths.output_dir, options)?
        }
        Command::Scan => {
            let files = scan_input_dir(&config.paths.input_dir)?;
            let grouping = group_by_thickness(&files);
            print!("{}", describe_grouping(&grouping, config.default_adjustment()));
            return Ok(true);
        }
    };

    finish(&summary, cli.report.as_deref())
}

fn parse_adjustments(
    entries: &[String],
    grouping: &ThicknessGrouping,
    config: &Config,
) -> Result<ThicknessAdjustments> {
    let known = grouping.thicknesses();
    if known.is_empty() {
        bail!(BatchError::NoThicknessGroups);
    }

    ThicknessAdjustments::parse(entries, &known, &config.adjustment_range()).with_context(|| {
        format!(
            "Invalid adjustment values; expected one line per group:\n{}",
            ThicknessAdjustments::template(&known, config.default_adjustment())
        )
    })
}

/// Human readable listing of thickness groups followed by a template
pub fn describe_grouping(grouping: &ThicknessGrouping, default: Adjustment) -> String {
    let mut text = String::from("Thickness folders found:\n\n");
    for (thickness, files) in &grouping.groups {
        text.push_str(&format!(
            "  {}: {} file{}\n",
            thickness.folder_name(),
            files.len(),
            if files.len() == 1 { "" } else { "s" }
        ));
    }

    if !grouping.skipped.is_empty() {
        text.push_str("\nSkipped:\n");
        for skipped in &grouping.skipped {
            text.push_str(&format!("  {}: {}\n", skipped.path.display(), skipped.reason));
        }
    }

    if !grouping.groups.is_empty() {
        text.push_str("\nAdjustment template (thickness=adjustment):\n");
        text.push_str(&ThicknessAdjustments::template(
            &grouping.thicknesses(),
            default,
        ));
    }
    text
}

fn finish(summary: &BatchSummary, report: Option<&Path>) -> Result<bool> {
    println!("{}", summary);

    if let Some(path) = report {
        let json = summary.to_json().context("Serializing run report")?;
        fs::write(path, json)
            .with_context(|| format!("Writing run report {}", path.display()))?;
        tracing::info!("Run report written to {}", path.display());
    }

    Ok(summary.is_success())
}
