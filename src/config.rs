//! Configuration management and validation.
//!
//! Provides the export settings (Parquet compression, output format) and
//! the display settings (time unit, precision) used by the CLI.

use crate::constants::{DEFAULT_DISPLAY_PRECISION, MAX_DISPLAY_PRECISION};
use crate::error::{Result, ResultsError};
use clap::ValueEnum;
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub export: ExportConfig,
    pub display: DisplayConfig,
}

/// Settings for flattening a store to a table file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Compression algorithm selection (Parquet only)
    pub compression: CompressionAlgorithm,

    /// Output table format
    pub format: ExportFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            compression: CompressionAlgorithm::Snappy,
            format: ExportFormat::Parquet,
        }
    }
}

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(&self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

/// Table file formats for exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Parquet,
    Csv,
}

/// Settings for printing times and values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub time_unit: TimeUnit,
    /// Decimals printed for values
    pub precision: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time_unit: TimeUnit::Sec,
            precision: DEFAULT_DISPLAY_PRECISION,
        }
    }
}

/// Units for displaying frame times.
///
/// Stored times are always in seconds; callers divide by [`TimeUnit::factor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum TimeUnit {
    Sec,
    Min,
    Hour,
    Day,
}

impl TimeUnit {
    /// Number of seconds in one unit
    pub fn factor(&self) -> f64 {
        match self {
            TimeUnit::Sec => 1.0,
            TimeUnit::Min => 60.0,
            TimeUnit::Hour => 3600.0,
            TimeUnit::Day => 24.0 * 3600.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeUnit::Sec => "sec",
            TimeUnit::Min => "min",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
        }
    }
}

impl Config {
    pub fn with_time_unit(mut self, time_unit: TimeUnit) -> Self {
        self.display.time_unit = time_unit;
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.display.precision = precision;
        self
    }

    pub fn with_export(mut self, format: ExportFormat, compression: CompressionAlgorithm) -> Self {
        self.export = ExportConfig {
            compression,
            format,
        };
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.display.precision > MAX_DISPLAY_PRECISION {
            return Err(ResultsError::configuration(format!(
                "Display precision {} exceeds the maximum of {}",
                self.display.precision, MAX_DISPLAY_PRECISION
            )));
        }

        debug!(
            "Configuration validated: {:?} export, {} time unit",
            self.export.format,
            self.display.time_unit.label()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.export.compression, CompressionAlgorithm::Snappy);
        assert_eq!(config.display.time_unit, TimeUnit::Sec);
    }

    #[test]
    fn test_precision_bound() {
        let config = Config::default().with_precision(MAX_DISPLAY_PRECISION + 1);
        let error = config.validate().unwrap_err();
        assert!(matches!(error, ResultsError::Configuration { .. }));
    }

    #[test]
    fn test_time_unit_factors() {
        assert_eq!(TimeUnit::Sec.factor(), 1.0);
        assert_eq!(TimeUnit::Min.factor(), 60.0);
        assert_eq!(TimeUnit::Hour.factor(), 3600.0);
        assert_eq!(TimeUnit::Day.factor(), 86400.0);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default().with_time_unit(TimeUnit::Hour);
        let json = serde_json::to_string(&config).unwrap();
        let restored: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.display.time_unit, TimeUnit::Hour);
        assert_eq!(restored.export.format, ExportFormat::Parquet);
    }
}
