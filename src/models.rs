//! Core data structures shared across the crate.
//!
//! Defines the supported file formats, text encodings, store summaries
//! and sediment layer descriptions.

use crate::constants::{OPT_EXTENSION, PLONG_EXTENSION};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Result file grammars understood by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileFormat {
    /// Sectioned, semicolon-delimited, multi-reach (`*.opt`, `*_ecr.opt`)
    Opt,
    /// Line-count-prefixed, whitespace-delimited, single reach (`*.plong`)
    Plong,
}

impl FileFormat {
    /// Detect the format from the file extension.
    ///
    /// The grammar is never guessed from content: an `.opt` file is always
    /// read with the multi-reach grammar.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            OPT_EXTENSION => Some(FileFormat::Opt),
            PLONG_EXTENSION => Some(FileFormat::Plong),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FileFormat::Opt => "opt",
            FileFormat::Plong => "plong",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bytes the Windows-1252 code page leaves undefined
const CP1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// Candidate text encodings for result files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    Utf8,
    Windows1252,
    Latin1,
}

impl TextEncoding {
    /// Decode the whole buffer, or `None` if any byte sequence is invalid
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => encoding_rs::UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned()),
            TextEncoding::Windows1252 => {
                if bytes.iter().any(|b| CP1252_UNDEFINED.contains(b)) {
                    return None;
                }
                encoding_rs::WINDOWS_1252
                    .decode_without_bom_handling_and_without_replacement(bytes)
                    .map(|text| text.into_owned())
            }
            TextEncoding::Latin1 => Some(encoding_rs::mem::decode_latin1(bytes).into_owned()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Windows1252 => "cp1252",
            TextEncoding::Latin1 => "latin-1",
        }
    }
}

/// Section count of one reach
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReachSummary {
    pub name: String,
    pub sections: usize,
}

/// Diagnostic description of a loaded store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSummary {
    pub reaches: Vec<ReachSummary>,
    pub frames: usize,
    pub variables: usize,
    pub variable_names: Vec<String>,
    pub first_time: Option<f64>,
    pub last_time: Option<f64>,
}

impl fmt::Display for StoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} reach(es), {} frame(s), {} variable(s)",
            self.reaches.len(),
            self.frames,
            self.variables
        )?;
        if let (Some(first), Some(last)) = (self.first_time, self.last_time) {
            writeln!(f, "  times: {} .. {}", first, last)?;
        }
        writeln!(f, "  variables: {}", self.variable_names.join(", "))?;
        for reach in &self.reaches {
            writeln!(f, "  reach {}: {} section(s)", reach.name, reach.sections)?;
        }
        Ok(())
    }
}

/// A sediment layer bounded by two interface elevations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerDefinition {
    /// Display label, e.g. `Layer 1 (Z_1 - Z_2)`
    pub name: String,
    /// Variable holding the upper interface
    pub upper: String,
    /// Variable holding the lower interface
    pub lower: String,
}

/// Volume per unit width of every layer at every frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerVolumes {
    pub reach: String,
    /// Frame times, in store order
    pub times: Vec<f64>,
    pub layers: Vec<LayerDefinition>,
    /// `values[layer][frame]`
    pub values: Vec<Vec<f64>>,
    /// Whether values are differences from the first frame
    pub relative: bool,
}
