//! Loaders for longitudinal profile result files
//!
//! Two grammars describe the same frames-of-sections data:
//!
//! - [`opt`] - Opthyca files: `[variables]` declarations, then
//!   semicolon-delimited `[resultats]` rows, several reaches per frame
//! - [`plong`] - Courlis files: a section count, then blocks of a time line
//!   followed by one whitespace-delimited row per section, a single reach
//!
//! Both parsers discover the schema from the data, freeze it once the first
//! frame is complete, and check every later frame against it. The first
//! violation aborts the load with an error pointing at the offending line.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use courlis_results::parser::load_file;
//! use std::path::Path;
//!
//! # fn example() -> courlis_results::Result<()> {
//! let store = load_file(Path::new("mascaret.opt"), None)?;
//! println!("{}", store.summary());
//! # Ok(())
//! # }
//! ```

pub mod opt;
pub mod plong;

#[cfg(test)]
pub mod tests;

pub use opt::OptParser;
pub use plong::PlongParser;

use crate::error::{Result, ResultsError};
use crate::models::{FileFormat, TextEncoding};
use crate::source::LineSource;
use crate::store::ResultStore;
use std::path::Path;
use tracing::info;

/// A grammar able to turn a line source into a validated store
pub trait ResultParser {
    fn format(&self) -> FileFormat;

    /// Consume `source` from its current position to the end
    fn parse(&self, source: &mut LineSource) -> Result<ResultStore>;
}

/// Parser implementing `format`
pub fn parser_for(format: FileFormat) -> Box<dyn ResultParser> {
    match format {
        FileFormat::Opt => Box::new(OptParser::new()),
        FileFormat::Plong => Box::new(PlongParser::new()),
    }
}

/// Load a result file into a new store.
///
/// The grammar is `format` when given, otherwise it follows the file
/// extension.
pub fn load_file(path: &Path, format: Option<FileFormat>) -> Result<ResultStore> {
    let format = match format {
        Some(format) => format,
        None => FileFormat::from_path(path).ok_or_else(|| ResultsError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?,
    };

    info!("Loading {} result file: {}", format, path.display());
    let mut source = LineSource::open(path)?;
    let parser = parser_for(format);
    let store = parser.parse(&mut source)?;

    info!(
        "Loaded {} {} frames of {} sections and {} variables from {} lines",
        store.frame_count(),
        parser.format(),
        store.schema().section_count(),
        store.schema().variable_count(),
        source.line_count()
    );
    Ok(store)
}

/// Parse already decoded text
pub fn load_str(text: &str, format: FileFormat) -> Result<ResultStore> {
    let mut source = LineSource::from_text(text, TextEncoding::Utf8);
    parser_for(format).parse(&mut source)
}

/// Parse a floating point field, naming it in the error
pub(crate) fn parse_float(text: &str, field: &str) -> Result<f64> {
    text.trim().parse::<f64>().map_err(|e| {
        ResultsError::validation(
            format!("Invalid {} `{}`: {}", field, text.trim(), e),
            None,
        )
    })
}

/// Parse a time or PK field, which must be finite to be matched exactly
pub(crate) fn parse_finite(text: &str, field: &str) -> Result<f64> {
    let value = parse_float(text, field)?;
    if !value.is_finite() {
        return Err(ResultsError::validation(
            format!("Invalid {} `{}`: not a finite number", field, text.trim()),
            None,
        ));
    }
    Ok(value)
}

/// Check a row's value count against the variable count
pub(crate) fn check_value_count(found: usize, expected: usize) -> Result<()> {
    if found != expected {
        return Err(ResultsError::validation(
            format!("Number of values not coherent: {} instead of {}", found, expected),
            None,
        ));
    }
    Ok(())
}
