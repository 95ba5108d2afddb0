//! Command-line argument definitions for the results inspector
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::{CompressionAlgorithm, Config, ExportFormat, TimeUnit};
use crate::constants::DEFAULT_DISPLAY_PRECISION;
use crate::models::FileFormat;
use crate::{Result, ResultsError};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the longitudinal profile results inspector
#[derive(Debug, Clone, Parser)]
#[command(
    name = "courlis-results",
    version,
    about = "Inspect and export longitudinal profile results of 1D river simulations",
    long_about = "Loads Opthyca (.opt) and Courlis (.plong) result files, checks that every \
                  frame matches the layout of the first one, and prints summaries, profiles, \
                  time series and sediment layer volumes. Stores can be exported to Parquet \
                  or CSV for analysis."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Load result files or directories and describe their content
    Summary(SummaryArgs),
    /// Print a variable along the sections of a reach at one time
    Profile(ProfileArgs),
    /// Print a variable at one section for every frame
    Series(SeriesArgs),
    /// Print sediment layer volumes per unit width over time
    Layers(LayersArgs),
    /// Flatten a result file to Parquet or CSV
    Export(ExportArgs),
}

/// Grammar override for files whose extension is not recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Opt,
    Plong,
}

impl From<InputFormat> for FileFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Opt => FileFormat::Opt,
            InputFormat::Plong => FileFormat::Plong,
        }
    }
}

/// Output format for summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

#[derive(Debug, Clone, Parser)]
pub struct SummaryArgs {
    /// Result files, or directories searched recursively for `.opt` and
    /// `.plong` files
    #[arg(value_name = "PATHS", required = true)]
    pub paths: Vec<PathBuf>,

    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the summary"
    )]
    pub output_format: OutputFormat,

    #[arg(
        long = "input-format",
        value_enum,
        help = "Grammar to use instead of the file extension"
    )]
    pub input_format: Option<InputFormat>,
}

#[derive(Debug, Clone, Parser)]
pub struct ProfileArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[arg(long = "variable", help = "Variable name, as declared in the file")]
    pub variable: String,

    #[arg(long = "time", help = "Frame time in seconds")]
    pub time: f64,

    /// Reach name, may be omitted for single-reach files
    #[arg(long = "reach", help = "Reach name (optional for single-reach files)")]
    pub reach: Option<String>,

    #[arg(
        long = "precision",
        default_value_t = DEFAULT_DISPLAY_PRECISION,
        help = "Decimals printed for values"
    )]
    pub precision: usize,

    #[arg(long = "input-format", value_enum)]
    pub input_format: Option<InputFormat>,
}

#[derive(Debug, Clone, Parser)]
pub struct SeriesArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[arg(long = "reach", help = "Reach name")]
    pub reach: String,

    #[arg(long = "pk", help = "Section position (PK) along the reach")]
    pub pk: f64,

    #[arg(long = "variable", help = "Variable name, as declared in the file")]
    pub variable: String,

    #[arg(
        long = "time-unit",
        value_enum,
        default_value = "sec",
        help = "Unit used to print frame times"
    )]
    pub time_unit: TimeUnit,

    #[arg(
        long = "precision",
        default_value_t = DEFAULT_DISPLAY_PRECISION,
        help = "Decimals printed for values"
    )]
    pub precision: usize,

    #[arg(long = "input-format", value_enum)]
    pub input_format: Option<InputFormat>,
}

#[derive(Debug, Clone, Parser)]
pub struct LayersArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[arg(long = "reach", help = "Reach name (optional for single-reach files)")]
    pub reach: Option<String>,

    /// Print absolute volumes instead of differences from the first frame
    #[arg(long = "absolute", help = "Print absolute volumes")]
    pub absolute: bool,

    #[arg(
        long = "time-unit",
        value_enum,
        default_value = "sec",
        help = "Unit used to print frame times"
    )]
    pub time_unit: TimeUnit,

    #[arg(
        long = "precision",
        default_value_t = DEFAULT_DISPLAY_PRECISION,
        help = "Decimals printed for values"
    )]
    pub precision: usize,

    #[arg(long = "input-format", value_enum)]
    pub input_format: Option<InputFormat>,
}

#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output path for the table file"
    )]
    pub output: PathBuf,

    /// Write CSV instead of Parquet
    #[arg(long = "csv", help = "Write CSV instead of Parquet")]
    pub csv: bool,

    #[arg(
        long = "compression",
        value_enum,
        default_value = "snappy",
        help = "Parquet compression algorithm"
    )]
    pub compression: CompressionAlgorithm,

    #[arg(long = "input-format", value_enum)]
    pub input_format: Option<InputFormat>,
}

impl Args {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress spinners (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ProfileArgs {
    pub fn config(&self) -> Result<Config> {
        let config = Config::default().with_precision(self.precision);
        config.validate()?;
        Ok(config)
    }
}

impl SeriesArgs {
    pub fn config(&self) -> Result<Config> {
        let config = Config::default()
            .with_precision(self.precision)
            .with_time_unit(self.time_unit);
        config.validate()?;
        Ok(config)
    }
}

impl LayersArgs {
    pub fn config(&self) -> Result<Config> {
        let config = Config::default()
            .with_precision(self.precision)
            .with_time_unit(self.time_unit);
        config.validate()?;
        Ok(config)
    }
}

impl ExportArgs {
    /// Validate the export arguments and build the export configuration
    pub fn config(&self) -> Result<Config> {
        if let Some(parent) = self.output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(ResultsError::configuration(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        let format = if self.csv {
            ExportFormat::Csv
        } else {
            ExportFormat::Parquet
        };
        let config = Config::default().with_export(format, self.compression);
        config.validate()?;
        Ok(config)
    }
}
