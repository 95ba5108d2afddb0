//! Summary command: load every given file and describe its store

use super::shared::{discover_result_files, load_store};
use crate::cli::args::{OutputFormat, SummaryArgs};
use crate::models::StoreSummary;
use anyhow::{Context, Result, bail};
use colored::*;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Summary of one successfully loaded file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub summary: StoreSummary,
}

pub fn run_summary(args: &SummaryArgs) -> Result<()> {
    let files = discover_result_files(&args.paths)?;
    if files.is_empty() {
        bail!("No result file found in the given paths");
    }
    info!("Loading {} result file(s)", files.len());

    let mut reports = Vec::with_capacity(files.len());
    let mut failures = 0;
    for path in files {
        match load_store(&path, args.input_format) {
            Ok(store) => reports.push(FileReport {
                path,
                summary: store.summary(),
            }),
            Err(error) => {
                failures += 1;
                eprintln!("{} {:#}", "Error:".bright_red().bold(), error);
            }
        }
    }

    match args.output_format {
        OutputFormat::Human => print_human(&reports),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&reports)
                .context("Failed to serialise the summary")?;
            println!("{}", json);
        }
    }

    if failures > 0 {
        bail!("{} file(s) could not be loaded", failures);
    }
    Ok(())
}

fn print_human(reports: &[FileReport]) {
    for report in reports {
        println!("{}", report.path.display().to_string().bright_green().bold());
        print!("{}", report.summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReachSummary;

    #[test]
    fn test_file_report_json_is_flat() {
        let report = FileReport {
            path: PathBuf::from("run.plong"),
            summary: StoreSummary {
                reaches: vec![ReachSummary {
                    name: "reach_1".to_string(),
                    sections: 2,
                }],
                frames: 3,
                variables: 3,
                variable_names: vec!["Z_water".into(), "Z_1".into(), "Z_rb".into()],
                first_time: Some(0.0),
                last_time: Some(7200.0),
            },
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["path"], "run.plong");
        assert_eq!(json["frames"], 3);
        assert_eq!(json["reaches"][0]["sections"], 2);
    }
}
