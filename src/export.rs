//! Table export of a result store
//!
//! A store is flattened into a long-format polars `DataFrame` with one row
//! per (frame, reach, section): `time`, `reach`, `pk`, then one column per
//! variable in declaration order. The frame can then be written to Parquet
//! or CSV.

use crate::config::{ExportConfig, ExportFormat};
use crate::error::Result;
use crate::store::ResultStore;
use polars::prelude::{Column, CsvWriter, DataFrame, ParquetWriter, SerWriter};
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

pub const TIME_COLUMN: &str = "time";
pub const REACH_COLUMN: &str = "reach";
pub const PK_COLUMN: &str = "pk";

/// Flatten every frame of `store` into a long-format frame
pub fn store_to_dataframe(store: &ResultStore) -> Result<DataFrame> {
    let schema = store.schema();
    let nb_rows = store.frame_count() * schema.section_count();

    let mut times = Vec::with_capacity(nb_rows);
    let mut reaches = Vec::with_capacity(nb_rows);
    let mut pks = Vec::with_capacity(nb_rows);
    let mut values: Vec<Vec<f64>> = vec![Vec::with_capacity(nb_rows); schema.variable_count()];

    for frame in store.frames() {
        for (reach_index, reach) in schema.reaches().iter().enumerate() {
            let Some(matrix) = frame.values(reach_index) else {
                continue;
            };
            for (row, &pk) in matrix.rows().into_iter().zip(&reach.sections) {
                times.push(frame.time());
                reaches.push(reach.name.clone());
                pks.push(pk);
                for (column, &value) in values.iter_mut().zip(row.iter()) {
                    column.push(value);
                }
            }
        }
    }

    let mut columns = Vec::with_capacity(3 + values.len());
    columns.push(Column::new(TIME_COLUMN.into(), times));
    columns.push(Column::new(REACH_COLUMN.into(), reaches));
    columns.push(Column::new(PK_COLUMN.into(), pks));
    for (name, column) in schema.variables().iter().zip(values) {
        columns.push(Column::new(name.as_str().into(), column));
    }

    let df = DataFrame::new(columns)?;
    debug!("Flattened store into {} rows x {} columns", df.height(), df.width());
    Ok(df)
}

/// Write `store` to `path` in the configured format, returning the number
/// of rows written
pub fn write_store(store: &ResultStore, path: &Path, config: &ExportConfig) -> Result<usize> {
    let mut df = store_to_dataframe(store)?;
    let file = File::create(path)?;

    match config.format {
        ExportFormat::Parquet => {
            ParquetWriter::new(file)
                .with_compression(config.compression.to_polars_compression())
                .finish(&mut df)?;
        }
        ExportFormat::Csv => {
            CsvWriter::new(file).include_header(true).finish(&mut df)?;
        }
    }

    info!(
        "Wrote {} rows to {} ({:?})",
        df.height(),
        path.display(),
        config.format
    );
    Ok(df.height())
}
