//! Tabular series data for forecasting

use crate::error::{ForecastDashError, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// A table of named, equal-length columns with a designated forecast target
///
/// The target column is validated at construction, so a missing or
/// non-numeric column surfaces as a `DataError` before any modeling starts.
#[derive(Debug, Clone)]
pub struct SeriesTable {
    /// Backing data frame
    df: DataFrame,
    /// Name of the column the pipeline forecasts
    target_column: String,
}

/// Loader for tabular series files
#[derive(Debug)]
pub struct TableLoader;

impl TableLoader {
    /// Load a table from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P, target_column: &str) -> Result<SeriesTable> {
        let file = File::open(path)?;
        // Use polars DataFrame reader directly
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        SeriesTable::from_dataframe(df, target_column)
    }
}

impl SeriesTable {
    /// Create a table from an existing DataFrame, validating the target column
    pub fn from_dataframe(df: DataFrame, target_column: &str) -> Result<Self> {
        if df.height() == 0 {
            return Err(ForecastDashError::DataError(
                "Table has no rows".to_string(),
            ));
        }

        let table = Self {
            df,
            target_column: target_column.to_string(),
        };
        table.target_values()?;

        Ok(table)
    }

    /// Create a single-column table from raw values (for testing)
    pub fn from_values(name: &str, values: Vec<f64>) -> Result<Self> {
        let series = Series::new(name, values);
        let df = DataFrame::new(vec![series])?;

        Self::from_dataframe(df, name)
    }

    /// Get the DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Get the target column name
    pub fn target_column(&self) -> &str {
        &self.target_column
    }

    /// Names of all columns, in upload order
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Name of the rightmost column
    ///
    /// Callers that want the forecast-the-last-column convention can use this
    /// to build their configuration; the pipeline itself never falls back to
    /// it.
    pub fn last_column_name(&self) -> Option<String> {
        self.df
            .get_column_names()
            .last()
            .map(|name| name.to_string())
    }

    /// Get the target column as a vector
    pub fn target_values(&self) -> Result<Vec<f64>> {
        self.column_as_f64(&self.target_column)
    }

    /// Derived table with the target column replaced by new values
    ///
    /// Used by representation selection to build the log-transformed table
    /// without touching the other columns.
    pub fn with_target_values(&self, values: Vec<f64>) -> Result<Self> {
        if values.len() != self.len() {
            return Err(ForecastDashError::DataError(format!(
                "Replacement column has {} values, table has {} rows",
                values.len(),
                self.len()
            )));
        }

        let mut df = self.df.clone();
        df.replace(&self.target_column, Series::new(&self.target_column, values))?;

        Ok(Self {
            df,
            target_column: self.target_column.clone(),
        })
    }

    /// Rolling mean of the target column, aligned to the raw series
    ///
    /// The first `window - 1` positions have no full window and are NaN, the
    /// same alignment the dashboard chart expects.
    pub fn rolling_mean(&self, window: usize) -> Result<Vec<f64>> {
        if window == 0 {
            return Err(ForecastDashError::InvalidParameter(
                "Rolling mean window must be at least 1".to_string(),
            ));
        }

        let values = self.target_values()?;
        if window > values.len() {
            return Ok(vec![f64::NAN; values.len()]);
        }

        let mut means = vec![f64::NAN; window - 1];
        for frame in values.windows(window) {
            means.push(frame.iter().sum::<f64>() / window as f64);
        }

        Ok(means)
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.df.height()
    }

    /// Helper method to get a column as f64 values
    fn column_as_f64(&self, column_name: &str) -> Result<Vec<f64>> {
        let col = self.df.column(column_name).map_err(|e| {
            ForecastDashError::DataError(format!("Column '{}' not found: {}", column_name, e))
        })?;

        if col.null_count() > 0 {
            return Err(ForecastDashError::DataError(format!(
                "Column '{}' contains missing values",
                column_name
            )));
        }

        match col.dtype() {
            DataType::Float64 => Ok(col.f64().unwrap().into_iter().flatten().collect()),
            DataType::Float32 => Ok(col
                .f32()
                .unwrap()
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect()),
            DataType::Int64 => Ok(col
                .i64()
                .unwrap()
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect()),
            DataType::Int32 => Ok(col
                .i32()
                .unwrap()
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect()),
            DataType::UInt64 => Ok(col
                .u64()
                .unwrap()
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect()),
            DataType::UInt32 => Ok(col
                .u32()
                .unwrap()
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect()),
            _ => Err(ForecastDashError::DataError(format!(
                "Column '{}' cannot be converted to f64",
                column_name
            ))),
        }
    }
}
