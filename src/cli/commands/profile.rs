//! Profile and series commands
//!
//! `profile` prints one variable along the sections of a reach at a given
//! time; `series` prints one variable at a given section for every frame.

use super::shared::{format_value, load_store};
use crate::cli::args::{ProfileArgs, SeriesArgs};
use anyhow::Result;
use colored::*;

pub fn run_profile(args: &ProfileArgs) -> Result<()> {
    let config = args.config()?;
    let store = load_store(&args.file, args.input_format)?;

    let reach_index = store.resolve_reach(args.reach.as_deref())?;
    let reach = &store.schema().reaches()[reach_index];
    let values =
        store.values_across_sections(&args.variable, args.time, Some(reach.name.as_str()))?;

    println!(
        "{} at t = {} s, reach {}",
        args.variable.bright_green().bold(),
        args.time,
        reach.name.bright_white().bold()
    );
    println!("{:>14} {:>16}", "PK", args.variable);
    for (pk, value) in reach.sections.iter().zip(values) {
        println!(
            "{:>14} {:>16}",
            pk,
            format_value(value, config.display.precision)
        );
    }
    Ok(())
}

pub fn run_series(args: &SeriesArgs) -> Result<()> {
    let config = args.config()?;
    let store = load_store(&args.file, args.input_format)?;

    let values = store.values_across_time(&args.reach, args.pk, &args.variable)?;
    let time_unit = config.display.time_unit;

    println!(
        "{} at PK {}, reach {}",
        args.variable.bright_green().bold(),
        args.pk,
        args.reach.bright_white().bold()
    );
    println!(
        "{:>14} {:>16}",
        format!("time ({})", time_unit.label()),
        args.variable
    );
    for (time, value) in store.times().into_iter().zip(values) {
        println!(
            "{:>14} {:>16}",
            format_value(time / time_unit.factor(), config.display.precision),
            format_value(value, config.display.precision)
        );
    }
    Ok(())
}
