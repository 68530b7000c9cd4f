//! Upload decoding for the dashboard boundary
//!
//! The upload widget hands over a data-URL string: a content-type prefix, a
//! comma, then the base64-encoded file body. The decoder is chosen from the
//! filename-extension hint; that hint is the entire "schema" of an upload.

use crate::data::SeriesTable;
use crate::error::{ForecastDashError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use polars::prelude::*;
use std::io::Cursor;

/// Decode an uploaded file into a table
pub fn decode_upload(contents: &str, filename: &str, target_column: &str) -> Result<SeriesTable> {
    let payload = contents.split_once(',').map(|(_, body)| body).ok_or_else(|| {
        ForecastDashError::DataError(format!(
            "Upload '{}' is not a data-URL payload",
            filename
        ))
    })?;

    let decoded = BASE64_STANDARD.decode(payload.trim()).map_err(|e| {
        ForecastDashError::DataError(format!("Upload '{}' is not valid base64: {}", filename, e))
    })?;

    let hint = filename.to_lowercase();
    if hint.contains("csv") {
        let df = CsvReader::new(Cursor::new(decoded))
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        SeriesTable::from_dataframe(df, target_column)
    } else if hint.contains("xls") {
        Err(ForecastDashError::UnsupportedFormatError(format!(
            "Spreadsheet upload '{}' is not supported; convert it to CSV",
            filename
        )))
    } else {
        Err(ForecastDashError::UnsupportedFormatError(format!(
            "Cannot determine the format of upload '{}'",
            filename
        )))
    }
}
