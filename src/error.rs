//! Error handling for result-file loading and store queries.
//!
//! Every parse failure is fatal to the load in progress. Line-anchored
//! failures carry the 1-based line number and the raw offending line so
//! callers can surface an actionable message.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Position and raw text of the line a parse failure is anchored to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineContext {
    /// 1-based line number
    pub number: usize,
    /// Raw line text, without its newline
    pub text: String,
}

impl LineContext {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

impl fmt::Display for LineContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Offending line {}:\n{}", self.number, self.text)
    }
}

/// Broad classification of a [`ResultsError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Encoding,
    Structural,
    Validation,
    PrematureEndOfInput,
    Query,
    Io,
    Export,
    Configuration,
}

#[derive(Error, Debug)]
pub enum ResultsError {
    #[error("Encoding not supported for file {path}: {reason}")]
    Encoding { path: PathBuf, reason: String },

    #[error("{}{}", .message, context_suffix(.context))]
    Structural {
        message: String,
        context: Option<LineContext>,
    },

    #[error("{}{}", .message, context_suffix(.context))]
    Validation {
        message: String,
        context: Option<LineContext>,
    },

    #[error("End of file reached suddenly after line {line}")]
    PrematureEndOfInput { line: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported result file format: {path} (expected *.opt or *.plong)")]
    UnsupportedFormat { path: PathBuf },

    #[error("Unknown variable: {name}")]
    UnknownVariable { name: String },

    #[error("Unknown time: {time}")]
    UnknownTime { time: f64 },

    #[error("Unknown reach: {name}")]
    UnknownReach { name: String },

    #[error("Unknown section: PK {pk} in reach {reach}")]
    UnknownSection { reach: String, pk: f64 },

    #[error("A reach has to be given, the store holds {count} reaches")]
    AmbiguousReach { count: usize },

    #[error("Export error: {0}")]
    Export(#[from] polars::error::PolarsError),

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

fn context_suffix(context: &Option<LineContext>) -> String {
    match context {
        Some(context) => format!("\n{}", context),
        None => String::new(),
    }
}

impl ResultsError {
    /// Create a structural error anchored to a line
    pub fn structural(message: impl Into<String>, context: Option<LineContext>) -> Self {
        Self::Structural {
            message: message.into(),
            context,
        }
    }

    /// Create a validation error anchored to a line
    pub fn validation(message: impl Into<String>, context: Option<LineContext>) -> Self {
        Self::Validation {
            message: message.into(),
            context,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Anchor an unanchored structural or validation error to a line.
    ///
    /// Store invariants are checked without knowledge of the source file,
    /// the parser attaches the line that triggered them.
    pub fn at_line(self, line: LineContext) -> Self {
        match self {
            Self::Structural {
                message,
                context: None,
            } => Self::Structural {
                message,
                context: Some(line),
            },
            Self::Validation {
                message,
                context: None,
            } => Self::Validation {
                message,
                context: Some(line),
            },
            other => other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Encoding { .. } => ErrorKind::Encoding,
            Self::Structural { .. } => ErrorKind::Structural,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::PrematureEndOfInput { .. } => ErrorKind::PrematureEndOfInput,
            Self::UnknownVariable { .. }
            | Self::UnknownTime { .. }
            | Self::UnknownReach { .. }
            | Self::UnknownSection { .. }
            | Self::AmbiguousReach { .. } => ErrorKind::Query,
            Self::Io(_) | Self::FileNotFound { .. } | Self::UnsupportedFormat { .. } => {
                ErrorKind::Io
            }
            Self::Export(_) => ErrorKind::Export,
            Self::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    /// 1-based line number the error is anchored to, if any
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::Structural { context, .. } | Self::Validation { context, .. } => {
                context.as_ref().map(|c| c.number)
            }
            Self::PrematureEndOfInput { line } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ResultsError>;
