//! Layers command: sediment layer volumes per unit width over time

use super::shared::{format_value, load_store};
use crate::cli::args::LayersArgs;
use crate::constants::{PLONG_INTERFACE_PREFIX, PLONG_RIGID_BOTTOM, PLONG_WATER_LEVEL};
use anyhow::{Result, bail};
use colored::*;

pub fn run_layers(args: &LayersArgs) -> Result<()> {
    let config = args.config()?;
    let store = load_store(&args.file, args.input_format)?;

    let volumes = store.layer_volumes(args.reach.as_deref(), !args.absolute)?;
    if volumes.layers.is_empty() {
        bail!(
            "No layer could be found in {}: variables {}, {}1 and {} are needed",
            args.file.display(),
            PLONG_WATER_LEVEL,
            PLONG_INTERFACE_PREFIX,
            PLONG_RIGID_BOTTOM
        );
    }

    let kind = if volumes.relative {
        "Volume change since the first frame"
    } else {
        "Volume"
    };
    println!(
        "{} per unit width, reach {}",
        kind.bright_green().bold(),
        volumes.reach.bright_white().bold()
    );
    for (index, layer) in volumes.layers.iter().enumerate() {
        println!("  [{}] {}", index + 1, layer.name);
    }

    let time_unit = config.display.time_unit;
    let mut header = format!("{:>14}", format!("time ({})", time_unit.label()));
    for index in 0..volumes.layers.len() {
        header.push_str(&format!(" {:>14}", format!("[{}]", index + 1)));
    }
    println!("{}", header);

    for (frame, time) in volumes.times.iter().enumerate() {
        let mut line = format!(
            "{:>14}",
            format_value(time / time_unit.factor(), config.display.precision)
        );
        for layer_values in &volumes.values {
            line.push_str(&format!(
                " {:>14}",
                format_value(layer_values[frame], config.display.precision)
            ));
        }
        println!("{}", line);
    }
    Ok(())
}
