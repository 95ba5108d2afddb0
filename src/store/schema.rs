//! Schema discovery and the frozen schema.
//!
//! A [`SchemaBuilder`] collects variables, reaches and section positions
//! while a loader reads the header and the first frame. Freezing it yields
//! an immutable [`Schema`] that every later frame is validated against.

use crate::error::{Result, ResultsError};

/// A named sub-network and its ordered section positions (PK)
#[derive(Debug, Clone, PartialEq)]
pub struct Reach {
    pub name: String,
    pub sections: Vec<f64>,
}

impl Reach {
    /// Row index of the section at `pk`
    pub fn section_index(&self, pk: f64) -> Option<usize> {
        self.sections.iter().position(|&section| section == pk)
    }
}

/// Frozen reaches, section lists and variable names
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    variables: Vec<String>,
    reaches: Vec<Reach>,
}

impl Schema {
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn reaches(&self) -> &[Reach] {
        &self.reaches
    }

    pub fn variable_index(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|variable| variable == name)
    }

    pub fn reach_index(&self, name: &str) -> Option<usize> {
        self.reaches.iter().position(|reach| reach.name == name)
    }

    pub fn reach(&self, name: &str) -> Option<&Reach> {
        self.reaches.iter().find(|reach| reach.name == name)
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Total number of sections over all reaches
    pub fn section_count(&self) -> usize {
        self.reaches.iter().map(|reach| reach.sections.len()).sum()
    }
}

/// Mutable schema under discovery
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    variables: Vec<String>,
    reaches: Vec<Reach>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable; names are unique
    pub fn add_variable(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.variables.contains(&name) {
            return Err(ResultsError::validation(
                format!("Variable `{}` already exists", name),
                None,
            ));
        }
        self.variables.push(name);
        Ok(())
    }

    /// Open a new reach; later sections are appended to it
    pub fn add_reach(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.reaches.iter().any(|reach| reach.name == name) {
            return Err(ResultsError::validation(
                format!("Reach `{}` already exists", name),
                None,
            ));
        }
        self.reaches.push(Reach {
            name,
            sections: Vec::new(),
        });
        Ok(())
    }

    /// Append a section position to the most recently opened reach
    pub fn add_section(&mut self, pk: f64) -> Result<()> {
        let reach = self.reaches.last_mut().ok_or_else(|| {
            ResultsError::structural("A section was given before any reach", None)
        })?;
        reach.sections.push(pk);
        Ok(())
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn freeze(self) -> Schema {
        Schema {
            variables: self.variables,
            reaches: self.reaches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_duplicate_variable_rejected() {
        let mut builder = SchemaBuilder::new();
        builder.add_variable("Depth").unwrap();
        let error = builder.add_variable("Depth").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert!(error.to_string().contains("Depth"));
    }

    #[test]
    fn test_sections_follow_latest_reach() {
        let mut builder = SchemaBuilder::new();
        assert!(builder.add_section(0.0).is_err());

        builder.add_reach("b1").unwrap();
        builder.add_section(0.0).unwrap();
        builder.add_section(10.0).unwrap();
        builder.add_reach("b2").unwrap();
        builder.add_section(5.0).unwrap();
        assert!(builder.add_reach("b1").is_err());

        let schema = builder.freeze();
        assert_eq!(schema.reaches()[0].sections, vec![0.0, 10.0]);
        assert_eq!(schema.reaches()[1].sections, vec![5.0]);
        assert_eq!(schema.section_count(), 3);
        assert_eq!(schema.reach_index("b2"), Some(1));
        assert_eq!(schema.reach("b1").unwrap().section_index(10.0), Some(1));
    }
}
