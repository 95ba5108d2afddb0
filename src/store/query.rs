//! Read-only accessors used by plotting and export consumers

use super::{Frame, ResultStore};
use crate::error::{Result, ResultsError};
use crate::models::{ReachSummary, StoreSummary};

impl ResultStore {
    pub fn variables(&self) -> &[String] {
        self.schema.variables()
    }

    pub fn reach_names(&self) -> Vec<&str> {
        self.schema
            .reaches()
            .iter()
            .map(|reach| reach.name.as_str())
            .collect()
    }

    /// Frozen section positions of a reach
    pub fn sections(&self, reach: &str) -> Result<&[f64]> {
        self.schema
            .reach(reach)
            .map(|reach| reach.sections.as_slice())
            .ok_or_else(|| ResultsError::UnknownReach {
                name: reach.to_string(),
            })
    }

    /// Frame times in insertion (chronological) order
    pub fn times(&self) -> Vec<f64> {
        self.frames.iter().map(Frame::time).collect()
    }

    pub fn frame(&self, time: f64) -> Result<&Frame> {
        self.frame_index(time)
            .map(|index| &self.frames[index])
            .ok_or(ResultsError::UnknownTime { time })
    }

    /// Values of `variable` at every section of a reach, at one time.
    ///
    /// `reach` may be omitted when the store holds a single reach.
    pub fn values_across_sections(
        &self,
        variable: &str,
        time: f64,
        reach: Option<&str>,
    ) -> Result<Vec<f64>> {
        let column = self.variable_column(variable)?;
        let frame = self.frame(time)?;
        let reach_index = self.resolve_reach(reach)?;

        let matrix = frame
            .values(reach_index)
            .ok_or_else(|| ResultsError::UnknownReach {
                name: reach.unwrap_or_default().to_string(),
            })?;
        Ok(matrix.column(column).to_vec())
    }

    /// Values of `variable` at one section, for every frame in time order
    pub fn values_across_time(&self, reach: &str, pk: f64, variable: &str) -> Result<Vec<f64>> {
        let reach_index = self
            .schema
            .reach_index(reach)
            .ok_or_else(|| ResultsError::UnknownReach {
                name: reach.to_string(),
            })?;
        let row = self.schema.reaches()[reach_index]
            .section_index(pk)
            .ok_or_else(|| ResultsError::UnknownSection {
                reach: reach.to_string(),
                pk,
            })?;
        let column = self.variable_column(variable)?;

        Ok(self
            .frames
            .iter()
            .filter_map(|frame| frame.values(reach_index))
            .map(|matrix| matrix[[row, column]])
            .collect())
    }

    /// Section counts per reach, frame count and variable count
    pub fn summary(&self) -> StoreSummary {
        StoreSummary {
            reaches: self
                .schema
                .reaches()
                .iter()
                .map(|reach| ReachSummary {
                    name: reach.name.clone(),
                    sections: reach.sections.len(),
                })
                .collect(),
            frames: self.frames.len(),
            variables: self.schema.variable_count(),
            variable_names: self.schema.variables().to_vec(),
            first_time: self.frames.first().map(Frame::time),
            last_time: self.frames.last().map(Frame::time),
        }
    }

    pub(crate) fn variable_column(&self, variable: &str) -> Result<usize> {
        self.schema
            .variable_index(variable)
            .ok_or_else(|| ResultsError::UnknownVariable {
                name: variable.to_string(),
            })
    }

    /// Index of the named reach, or of the sole reach when none is named
    pub(crate) fn resolve_reach(&self, reach: Option<&str>) -> Result<usize> {
        match reach {
            Some(name) => self
                .schema
                .reach_index(name)
                .ok_or_else(|| ResultsError::UnknownReach {
                    name: name.to_string(),
                }),
            None => match self.schema.reaches().len() {
                1 => Ok(0),
                count => Err(ResultsError::AmbiguousReach { count }),
            },
        }
    }
}
