//! Sediment layer volumes derived from interface elevations.
//!
//! Longitudinal profile files carry the water level, the elevation of each
//! interface between sediment layers and the rigid bottom. Layer `i` lies
//! between `Z_i` and `Z_{i+1}` (the last one between `Z_K` and `Z_rb`).
//! Its volume per unit width is the trapezoidal integral of the thickness
//! over the section positions.

use super::ResultStore;
use crate::constants::{PLONG_INTERFACE_PREFIX, PLONG_RIGID_BOTTOM, PLONG_WATER_LEVEL};
use crate::error::Result;
use crate::models::{LayerDefinition, LayerVolumes};

impl ResultStore {
    /// Sediment layers described by the variable list.
    ///
    /// Empty unless the store holds `Z_water`, `Z_1` and `Z_rb`.
    pub fn layers(&self) -> Vec<LayerDefinition> {
        let variables = self.schema.variables();
        let first_interface = format!("{}1", PLONG_INTERFACE_PREFIX);
        let has = |name: &str| variables.iter().any(|v| v == name);
        if !(has(PLONG_WATER_LEVEL) && has(&first_interface) && has(PLONG_RIGID_BOTTOM)) {
            return Vec::new();
        }

        let nb_layers = variables.len() - 2;
        (1..=nb_layers)
            .map(|layer| {
                let upper = format!("{}{}", PLONG_INTERFACE_PREFIX, layer);
                let lower = if layer == nb_layers {
                    PLONG_RIGID_BOTTOM.to_string()
                } else {
                    format!("{}{}", PLONG_INTERFACE_PREFIX, layer + 1)
                };
                LayerDefinition {
                    name: format!("Layer {} ({} - {})", layer, upper, lower),
                    upper,
                    lower,
                }
            })
            .collect()
    }

    /// Volume per unit width of every layer at every frame.
    ///
    /// With `relative`, the first frame's volume is subtracted from each
    /// frame so the series starts at zero.
    pub fn layer_volumes(&self, reach: Option<&str>, relative: bool) -> Result<LayerVolumes> {
        let reach_index = self.resolve_reach(reach)?;
        let reach = &self.schema.reaches()[reach_index];
        let layers = self.layers();

        let mut values = Vec::with_capacity(layers.len());
        for layer in &layers {
            let upper = self.variable_column(&layer.upper)?;
            let lower = self.variable_column(&layer.lower)?;

            let mut volumes: Vec<f64> = self
                .frames
                .iter()
                .filter_map(|frame| frame.values(reach_index))
                .map(|matrix| {
                    let thickness = (&matrix.column(upper) - &matrix.column(lower)).to_vec();
                    trapezoid(&thickness, &reach.sections)
                })
                .collect();

            if relative {
                if let Some(&initial) = volumes.first() {
                    volumes.iter_mut().for_each(|volume| *volume -= initial);
                }
            }
            values.push(volumes);
        }

        Ok(LayerVolumes {
            reach: reach.name.clone(),
            times: self.times(),
            layers,
            values,
            relative,
        })
    }
}

/// Trapezoidal integral of `y` over abscissae `x`
fn trapezoid(y: &[f64], x: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(dx, dy)| (dx[1] - dx[0]) * (dy[0] + dy[1]) / 2.0)
        .sum()
}
