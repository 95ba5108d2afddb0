//! Courlis longitudinal profile files (`*.plong`)
//!
//! ```text
//! 2                      number of sections
//! 0.0                    time of the first frame
//! 1 0.0 10.0 5.0 0.0     section id, PK, water level, interfaces..., rigid bottom
//! 2 10.0 9.0 4.5 -1.0
//! 3600.0                 next frame
//! ...
//! ```
//!
//! The file describes a single reach. The first row of the first frame
//! fixes the number of interfaces and therefore the variable names:
//! `Z_water`, `Z_1` .. `Z_K`, `Z_rb`.

use super::{ResultParser, check_value_count, parse_finite, parse_float};
use crate::constants::{
    DEFAULT_REACH_NAME, PLONG_INTERFACE_PREFIX, PLONG_MIN_ROW_TOKENS, PLONG_MIN_SECTIONS,
    PLONG_RIGID_BOTTOM, PLONG_WATER_LEVEL,
};
use crate::error::{Result, ResultsError};
use crate::models::FileFormat;
use crate::source::LineSource;
use crate::store::{ResultStore, SchemaBuilder, matrix_from_rows};
use tracing::debug;

/// One parsed section row
#[derive(Debug, Clone, PartialEq)]
struct SectionRow {
    id: i64,
    pk: f64,
    values: Vec<f64>,
}

/// Parser for the single-reach, whitespace-delimited grammar
#[derive(Debug, Default, Clone, Copy)]
pub struct PlongParser;

impl PlongParser {
    pub fn new() -> Self {
        Self
    }
}

impl ResultParser for PlongParser {
    fn format(&self) -> FileFormat {
        FileFormat::Plong
    }

    fn parse(&self, source: &mut LineSource) -> Result<ResultStore> {
        let parsed = parse_section_count(source.next_line()?);
        let nb_sections = parsed.map_err(|e| e.at_line(source.context()))?;
        debug!("Announced {} sections", nb_sections);

        let mut store = read_first_frame(source, nb_sections)?;
        let sections = store.schema().reaches()[0].sections.clone();
        let nb_variables = store.schema().variable_count();

        // End of input is only clean where a time line is expected
        while !source.is_exhausted() {
            let time = read_time(source)?;
            let time_line = source.cursor();

            let mut rows = Vec::with_capacity(sections.len());
            for (index, &expected_pk) in sections.iter().enumerate() {
                let row = read_row(source)?;
                check_row(source, &row, index + 1, nb_variables)?;
                if row.pk != expected_pk {
                    return Err(ResultsError::validation(
                        format!("Unexpected PK: {} (instead of {})", row.pk, expected_pk),
                        Some(source.context()),
                    ));
                }
                rows.push(row.values);
            }

            let values = matrix_from_rows(rows, nb_variables)?;
            store
                .add_frame(time, vec![values])
                .map_err(|e| e.at_line(source.context_at(time_line)))?;
        }

        Ok(store)
    }
}

/// Variable names for `nb_values` values per row: `Z_water`, the interior
/// interfaces `Z_1` .. `Z_K`, then `Z_rb`
pub fn interface_names(nb_values: usize) -> Result<Vec<String>> {
    let nb_interfaces = nb_values.saturating_sub(2);
    if nb_interfaces < 1 {
        return Err(ResultsError::validation(
            format!(
                "No layer could be found: {} value(s) per section, at least 3 are needed",
                nb_values
            ),
            None,
        ));
    }

    let mut names = Vec::with_capacity(nb_values);
    names.push(PLONG_WATER_LEVEL.to_string());
    names.extend((1..=nb_interfaces).map(|k| format!("{}{}", PLONG_INTERFACE_PREFIX, k)));
    names.push(PLONG_RIGID_BOTTOM.to_string());
    Ok(names)
}

fn parse_section_count(line: &str) -> Result<usize> {
    let count = line.trim().parse::<i64>().map_err(|e| {
        ResultsError::structural(
            format!("Number of sections `{}` is not an integer: {}", line.trim(), e),
            None,
        )
    })?;
    if count < PLONG_MIN_SECTIONS as i64 {
        return Err(ResultsError::structural(
            format!(
                "Number of sections has to be at least {} (found {})",
                PLONG_MIN_SECTIONS, count
            ),
            None,
        ));
    }
    Ok(count as usize)
}

fn parse_row(line: &str) -> Result<SectionRow> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < PLONG_MIN_ROW_TOKENS {
        return Err(ResultsError::validation(
            format!(
                "Number of values (separated by whitespace) has to be at least {}, found {}",
                PLONG_MIN_ROW_TOKENS,
                tokens.len()
            ),
            None,
        ));
    }

    let id = tokens[0].parse::<i64>().map_err(|e| {
        ResultsError::validation(format!("Invalid section number `{}`: {}", tokens[0], e), None)
    })?;
    let pk = parse_finite(tokens[1], "PK")?;
    let values = tokens[2..]
        .iter()
        .map(|value| parse_float(value, "value"))
        .collect::<Result<Vec<f64>>>()?;

    Ok(SectionRow { id, pk, values })
}

fn read_time(source: &mut LineSource) -> Result<f64> {
    let parsed = parse_finite(source.next_line()?, "time");
    parsed.map_err(|e| e.at_line(source.context()))
}

fn read_row(source: &mut LineSource) -> Result<SectionRow> {
    let parsed = parse_row(source.next_line()?);
    parsed.map_err(|e| e.at_line(source.context()))
}

/// Check the section number and value count of the row just read
fn check_row(
    source: &LineSource,
    row: &SectionRow,
    expected_id: usize,
    nb_variables: usize,
) -> Result<()> {
    if row.id != expected_id as i64 {
        return Err(ResultsError::validation(
            format!("Unexpected section number: {} (instead of {})", row.id, expected_id),
            Some(source.context()),
        ));
    }
    check_value_count(row.values.len(), nb_variables).map_err(|e| e.at_line(source.context()))
}

/// Read the first frame, deriving variable names from its first row and
/// freezing the section positions
fn read_first_frame(source: &mut LineSource, nb_sections: usize) -> Result<ResultStore> {
    let time = read_time(source)?;
    let time_line = source.cursor();

    let mut builder = SchemaBuilder::new();
    builder.add_reach(DEFAULT_REACH_NAME)?;

    // The announced count is untrusted, each section needs one line
    let mut rows = Vec::with_capacity(nb_sections.min(source.line_count()));
    for index in 1..=nb_sections {
        let row = read_row(source)?;
        if index == 1 {
            let names = interface_names(row.values.len())
                .map_err(|e| e.at_line(source.context()))?;
            debug!("Derived variables: {}", names.join(", "));
            for name in names {
                builder.add_variable(name)?;
            }
        }
        check_row(source, &row, index, builder.variable_count())?;
        builder.add_section(row.pk)?;
        rows.push(row.values);
    }

    let nb_variables = builder.variable_count();
    let values = matrix_from_rows(rows, nb_variables)?;
    let mut store = ResultStore::new(builder.freeze());
    store
        .add_frame(time, vec![values])
        .map_err(|e| e.at_line(source.context_at(time_line)))?;
    Ok(store)
}
