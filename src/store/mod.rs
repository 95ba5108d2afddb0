//! Validated in-memory result store
//!
//! The store owns a frozen [`Schema`] and a chronological list of frames.
//! Each frame holds one `sections x variables` matrix per reach, rows in
//! section order and columns in variable order.
//!
//! ## Invariants
//!
//! - Variable and reach names are unique (enforced by [`SchemaBuilder`])
//! - Frame times are pairwise distinct
//! - Every matrix has exactly as many rows as its reach has sections and
//!   as many columns as there are variables
//! - The schema never changes once the store exists

pub mod layers;
pub mod query;
pub mod schema;

pub use schema::{Reach, Schema, SchemaBuilder};

use crate::error::{Result, ResultsError};
use ndarray::Array2;
use tracing::trace;

/// All values recorded at one simulation time step
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    time: f64,
    /// One matrix per reach, in schema order
    values: Vec<Array2<f64>>,
}

impl Frame {
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Matrix of the reach at `reach_index`
    pub fn values(&self, reach_index: usize) -> Option<&Array2<f64>> {
        self.values.get(reach_index)
    }
}

#[derive(Debug, Clone)]
pub struct ResultStore {
    schema: Schema,
    frames: Vec<Frame>,
}

impl ResultStore {
    /// Create an empty store over a frozen schema
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            frames: Vec::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Append a frame after checking its time and matrix shapes
    pub fn add_frame(&mut self, time: f64, values: Vec<Array2<f64>>) -> Result<()> {
        if self.frames.iter().any(|frame| frame.time == time) {
            return Err(ResultsError::validation(
                format!("Time {} already exists", time),
                None,
            ));
        }

        let reaches = self.schema.reaches();
        if values.len() != reaches.len() {
            return Err(ResultsError::validation(
                format!(
                    "Frame at time {} holds {} reach(es) instead of {}",
                    time,
                    values.len(),
                    reaches.len()
                ),
                None,
            ));
        }

        let nb_variables = self.schema.variable_count();
        for (reach, matrix) in reaches.iter().zip(&values) {
            let expected = (reach.sections.len(), nb_variables);
            if matrix.dim() != expected {
                return Err(ResultsError::validation(
                    format!(
                        "Frame at time {} has shape {:?} for reach `{}` instead of {:?}",
                        time,
                        matrix.dim(),
                        reach.name,
                        expected
                    ),
                    None,
                ));
            }
        }

        trace!("Added frame at time {}", time);
        self.frames.push(Frame { time, values });
        Ok(())
    }

    pub(crate) fn frame_index(&self, time: f64) -> Option<usize> {
        self.frames.iter().position(|frame| frame.time == time)
    }
}

/// Stack value rows into a `rows x nb_variables` matrix
pub(crate) fn matrix_from_rows(rows: Vec<Vec<f64>>, nb_variables: usize) -> Result<Array2<f64>> {
    let nb_rows = rows.len();
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((nb_rows, nb_variables), flat).map_err(|e| {
        ResultsError::validation(
            format!(
                "Cannot build a {}x{} value matrix: {}",
                nb_rows, nb_variables, e
            ),
            None,
        )
    })
}
