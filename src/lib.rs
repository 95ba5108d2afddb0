//! Courlis Results Library
//!
//! Loads the longitudinal profile results written by 1D hydraulic and
//! sediment simulation codes into a validated in-memory store.
//!
//! This library provides tools for:
//! - Decoding result files in UTF-8 or legacy single-byte encodings
//! - Parsing Opthyca (`.opt`) multi-reach files and Courlis (`.plong`)
//!   single-reach layer files
//! - Checking every frame against the schema fixed by the first one, with
//!   errors that point at the offending line
//! - Querying values across sections or across time, and layer volumes
//! - Exporting a store to Parquet or CSV

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod models;
pub mod parser;
pub mod source;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::{ErrorKind, LineContext, Result, ResultsError};
pub use models::FileFormat;
pub use parser::{load_file, load_str};
pub use store::ResultStore;
