//! Command implementations for the results inspector CLI
//!
//! Each command is implemented in its own module:
//! - `summary`: load files or directories and describe each store
//! - `profile`: values along a reach at one time, or at one section over time
//! - `layers`: sediment layer volumes over time
//! - `export`: flatten a store to Parquet or CSV

pub mod export;
pub mod layers;
pub mod profile;
pub mod shared;
pub mod summary;

use crate::cli::args::{Args, Commands};
use anyhow::Result;
use tracing::debug;

/// Main command runner
pub fn run(args: Args) -> Result<()> {
    shared::setup_logging(&args)?;
    debug!("Arguments: {:?}", args);

    let show_progress = args.show_progress();
    match args.command {
        Commands::Summary(summary_args) => summary::run_summary(&summary_args),
        Commands::Profile(profile_args) => profile::run_profile(&profile_args),
        Commands::Series(series_args) => profile::run_series(&series_args),
        Commands::Layers(layers_args) => layers::run_layers(&layers_args),
        Commands::Export(export_args) => export::run_export(&export_args, show_progress),
    }
}
