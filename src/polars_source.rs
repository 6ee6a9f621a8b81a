#![cfg(feature = "polars")]

//! Building plot tables from polars DataFrames.

use crate::data_types::{Column, ColumnData, Table};
use eyre::{Result, WrapErr};
use polars::prelude::{DataFrame, DataType, Series};
use tracing::debug;

impl Table {
    /// Copies the numeric columns of `df` into a new table.
    ///
    /// Boolean and 8-bit integer columns keep 8-bit storage so they can act
    /// as valid-point masks; nulls in them read as "invalid". Every other
    /// numeric column becomes `f64` with nulls as NaN. Non-numeric columns
    /// are skipped.
    pub fn from_dataframe(df: &DataFrame) -> Result<Table> {
        let mut table = Table::new();
        for column in df.get_columns() {
            let series = column.as_materialized_series();
            let name = series.name().to_string();
            match column_data(series).wrap_err_with(|| format!("failed to import column {name:?}"))? {
                Some(data) => {
                    table.add_column(Column::from_data(name, data));
                }
                None => debug!(column = %name, dtype = %series.dtype(), "skipping non-numeric column"),
            }
        }
        Ok(table)
    }
}

fn column_data(series: &Series) -> Result<Option<ColumnData>> {
    let data = match series.dtype() {
        DataType::Boolean => ColumnData::I8(
            series
                .bool()?
                .iter()
                .map(|v| v.map(i8::from).unwrap_or(0))
                .collect(),
        ),
        DataType::Int8 => ColumnData::I8(series.i8()?.iter().map(|v| v.unwrap_or(0)).collect()),
        DataType::UInt8 => ColumnData::U8(series.u8()?.iter().map(|v| v.unwrap_or(0)).collect()),
        DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float32
        | DataType::Float64 => {
            let cast = series.cast(&DataType::Float64)?;
            ColumnData::F64(cast.f64()?.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
        }
        _ => return Ok(None),
    };
    Ok(Some(data))
}
