//! Opthyca result files (`*.opt`, `*_ecr.opt`)
//!
//! ```text
//! # optional comment lines
//! [variables]
//! "Cote de l eau";"Z";"m";3
//! "Debit";"Q";"m3/s";3
//! [resultats]
//! 0.0;"b1";1;0.0;102.5;35.0
//! 0.0;"b1";2;150.0;102.1;35.0
//! 0.0;"b2";1;0.0;98.7;12.0
//! 60.0;"b1";1;0.0;102.6;36.0
//! ...
//! ```
//!
//! A result row is `time;reach;profile;pk;v1;...;vN`. The rows sharing the
//! first time value form the first frame and define the reaches (a change
//! of reach name opens a new reach) and their section positions. Every
//! later frame must list the same reaches and PKs in the same order.

use super::{ResultParser, check_value_count, parse_finite, parse_float};
use crate::constants::{
    OPT_DECLARATION_FIELDS, OPT_RESULTS_MARKER, OPT_ROW_FIELDS, OPT_SEPARATOR,
    OPT_VARIABLES_MARKER,
};
use crate::error::{Result, ResultsError};
use crate::models::FileFormat;
use crate::source::LineSource;
use crate::store::{ResultStore, Schema, SchemaBuilder, matrix_from_rows};
use ndarray::Array2;
use tracing::debug;

/// One parsed `[resultats]` row
#[derive(Debug, Clone, PartialEq)]
struct ResultRow {
    time: f64,
    reach: String,
    pk: f64,
    values: Vec<f64>,
    /// 1-based line number
    line: usize,
}

/// Parser for the multi-reach, semicolon-delimited grammar
#[derive(Debug, Default, Clone, Copy)]
pub struct OptParser;

impl OptParser {
    pub fn new() -> Self {
        Self
    }
}

impl ResultParser for OptParser {
    fn format(&self) -> FileFormat {
        FileFormat::Opt
    }

    fn parse(&self, source: &mut LineSource) -> Result<ResultStore> {
        let mut builder = SchemaBuilder::new();
        read_declarations(source, &mut builder)?;
        debug!("Declared {} variables", builder.variable_count());

        let mut store = read_first_frame(source, builder)?;
        let schema = store.schema().clone();
        debug!(
            "First frame defines {} reach(es) and {} section(s)",
            schema.reaches().len(),
            schema.section_count()
        );

        while !source.is_exhausted() {
            let (time, values, line) = read_frame(source, &schema)?;
            store
                .add_frame(time, values)
                .map_err(|e| e.at_line(source.context_at(line)))?;
        }

        Ok(store)
    }
}

/// Skip leading lines up to `[variables]`, then read declarations up to
/// `[resultats]`
fn read_declarations(source: &mut LineSource, builder: &mut SchemaBuilder) -> Result<()> {
    while source.next_line()? != OPT_VARIABLES_MARKER {}

    loop {
        let line = source.next_line()?;
        if line == OPT_RESULTS_MARKER {
            return Ok(());
        }
        let declared = parse_declaration(line);
        let name = declared.map_err(|e| e.at_line(source.context()))?;
        builder
            .add_variable(name)
            .map_err(|e| e.at_line(source.context()))?;
    }
}

/// Variable name of a `"name";"abbreviation";"unit";flag` line
fn parse_declaration(line: &str) -> Result<String> {
    let fields: Vec<&str> = line.split(OPT_SEPARATOR).collect();
    if fields.len() != OPT_DECLARATION_FIELDS {
        return Err(ResultsError::structural(
            format!(
                "Variable description is not readable: {} fields instead of {}",
                fields.len(),
                OPT_DECLARATION_FIELDS
            ),
            None,
        ));
    }
    Ok(fields[0].trim_matches('"').to_string())
}

fn parse_row(line: &str, nb_variables: usize) -> Result<ResultRow> {
    let fields: Vec<&str> = line.splitn(OPT_ROW_FIELDS, OPT_SEPARATOR).collect();
    if fields.len() < OPT_ROW_FIELDS {
        return Err(ResultsError::structural(
            format!(
                "Number of values (separated by a semicolon) has to be more than {}",
                OPT_ROW_FIELDS - 1
            ),
            None,
        ));
    }

    let time = parse_finite(fields[0], "time")?;
    let pk = parse_finite(fields[3], "PK")?;
    let values = fields[4]
        .split(OPT_SEPARATOR)
        .map(|value| parse_float(value, "value"))
        .collect::<Result<Vec<f64>>>()?;
    check_value_count(values.len(), nb_variables)?;

    Ok(ResultRow {
        time,
        reach: fields[1].trim().trim_matches('"').to_string(),
        pk,
        values,
        line: 0,
    })
}

fn read_row(source: &mut LineSource, nb_variables: usize) -> Result<ResultRow> {
    let parsed = parse_row(source.next_line()?, nb_variables);
    let mut row = parsed.map_err(|e| e.at_line(source.context()))?;
    row.line = source.cursor();
    Ok(row)
}

/// Read the rows sharing the first time value, discover reaches and
/// sections from them and freeze the schema.
///
/// The first row of the next frame is read to detect the time change, then
/// handed back to the source. Reaching the end of input closes the frame.
fn read_first_frame(source: &mut LineSource, mut builder: SchemaBuilder) -> Result<ResultStore> {
    let nb_variables = builder.variable_count();
    let first = read_row(source, nb_variables)?;
    let first_time = first.time;
    let first_line = first.line;

    let mut rows = vec![first];
    while !source.is_exhausted() {
        let row = read_row(source, nb_variables)?;
        if row.time != first_time {
            source.rewind();
            break;
        }
        rows.push(row);
    }

    let mut reach_rows: Vec<Vec<Vec<f64>>> = Vec::new();
    let mut previous_reach: Option<String> = None;
    for row in rows {
        if previous_reach.as_deref() != Some(row.reach.as_str()) {
            builder
                .add_reach(row.reach.as_str())
                .map_err(|e| e.at_line(source.context_at(row.line)))?;
            reach_rows.push(Vec::new());
            previous_reach = Some(row.reach);
        }
        builder
            .add_section(row.pk)
            .map_err(|e| e.at_line(source.context_at(row.line)))?;
        if let Some(current) = reach_rows.last_mut() {
            current.push(row.values);
        }
    }

    let values = reach_rows
        .into_iter()
        .map(|rows| matrix_from_rows(rows, nb_variables))
        .collect::<Result<Vec<Array2<f64>>>>()?;

    let mut store = ResultStore::new(builder.freeze());
    store
        .add_frame(first_time, values)
        .map_err(|e| e.at_line(source.context_at(first_line)))?;
    Ok(store)
}

/// Read one frame laid out exactly as the frozen schema.
///
/// Returns the frame time, one matrix per reach and the line number of the
/// frame's first row.
fn read_frame(source: &mut LineSource, schema: &Schema) -> Result<(f64, Vec<Array2<f64>>, usize)> {
    let nb_variables = schema.variable_count();
    let mut frame_start: Option<(f64, usize)> = None;
    let mut values = Vec::with_capacity(schema.reaches().len());

    for reach in schema.reaches() {
        let mut rows = Vec::with_capacity(reach.sections.len());
        for &expected_pk in &reach.sections {
            let row = read_row(source, nb_variables)?;
            let (time, _) = *frame_start.get_or_insert((row.time, row.line));

            let mismatch = if row.time != time {
                Some(format!("Unexpected time: {} (instead of {})", row.time, time))
            } else if row.reach != reach.name {
                Some(format!(
                    "Unexpected reach: {} (instead of {})",
                    row.reach, reach.name
                ))
            } else if row.pk != expected_pk {
                Some(format!("Unexpected PK: {} (instead of {})", row.pk, expected_pk))
            } else {
                None
            };
            if let Some(message) = mismatch {
                return Err(ResultsError::validation(
                    message,
                    Some(source.context_at(row.line)),
                ));
            }
            rows.push(row.values);
        }
        values.push(matrix_from_rows(rows, nb_variables)?);
    }

    let (time, line) = frame_start
        .ok_or_else(|| ResultsError::structural("The schema holds no section", None))?;
    Ok((time, values, line))
}
