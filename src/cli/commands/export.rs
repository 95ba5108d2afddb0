//! Export command: flatten a result file to Parquet or CSV

use super::shared::load_store;
use crate::cli::args::ExportArgs;
use crate::export::write_store;
use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

pub fn run_export(args: &ExportArgs, show_progress: bool) -> Result<()> {
    let start_time = Instant::now();
    let config = args.config()?;

    let progress_bar = if show_progress {
        let progress_bar = ProgressBar::new_spinner();
        progress_bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .context("Invalid progress template")?
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
        );
        progress_bar.enable_steady_tick(Duration::from_millis(100));
        progress_bar
    } else {
        ProgressBar::hidden()
    };

    progress_bar.set_message(format!("Loading {}...", args.file.display()));
    let store = load_store(&args.file, args.input_format)?;

    progress_bar.set_message(format!("Writing {}...", args.output.display()));
    let rows = write_store(&store, &args.output, &config.export)
        .with_context(|| format!("Failed to export to {}", args.output.display()))?;
    progress_bar.finish_and_clear();

    println!(
        "{} {} rows ({} frames) to {} in {:.2}s",
        "Exported".bright_green().bold(),
        rows.to_string().bright_white().bold(),
        store.frame_count(),
        args.output.display(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
