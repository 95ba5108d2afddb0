//! Shared components for CLI commands
//!
//! Logging setup, result file discovery and loading, and value formatting
//! used across the command implementations.

use crate::cli::args::{Args, InputFormat};
use crate::models::FileFormat;
use crate::parser::load_file;
use crate::store::ResultStore;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("courlis_results={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialise logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialise logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Expand the given paths into result files.
///
/// Files are kept as given. Directories are walked recursively and only
/// files with a recognised extension are kept, sorted by path. Entries
/// that cannot be read are skipped with a warning.
pub fn discover_result_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        debug!("Searching for result files in: {}", path.display());
        let mut found = Vec::new();
        for entry in WalkDir::new(path).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    warn!("Skipping unreadable entry in {}: {}", path.display(), error);
                    continue;
                }
            };
            if entry.file_type().is_file() && FileFormat::from_path(entry.path()).is_some() {
                found.push(entry.into_path());
            }
        }
        found.sort();
        info!("Found {} result file(s) in {}", found.len(), path.display());
        files.extend(found);
    }

    Ok(files)
}

/// Load one result file, adding the path to any error
pub fn load_store(path: &Path, input_format: Option<InputFormat>) -> Result<ResultStore> {
    load_file(path, input_format.map(FileFormat::from))
        .with_context(|| format!("Failed to load {}", path.display()))
}

/// Format a value with a fixed number of decimals
pub fn format_value(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}
