//! Per-upload request handling for the dashboard boundary
//!
//! This is the only layer that catches errors: whatever goes wrong while
//! decoding or forecasting an upload becomes a generic user-visible notice,
//! with the cause logged for the operator.

use crate::config::{ForecastConfig, ROLLING_MEAN_WINDOW};
use crate::error::Result;
use crate::forecast::{ForecastOutcome, StationaryForecaster};
use crate::ingest::decode_upload;
use serde::Serialize;

/// Message shown to the user when an upload cannot be processed
pub const UPLOAD_ERROR_NOTICE: &str = "There was an error processing this file.";

/// Everything the presentation layer needs to render one processed upload
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedUpload {
    /// Original filename
    pub filename: String,
    /// Raw target series, in upload order
    pub series: Vec<f64>,
    /// Rolling-mean overlay of the raw series (NaN where no full window fits)
    pub rolling_mean: Vec<f64>,
    /// Forecast for positions 1..2N
    pub forecast: ForecastOutcome,
}

/// Result of handling one upload
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum UploadOutcome {
    /// The upload decoded and forecast cleanly
    Processed(ProcessedUpload),
    /// Something failed; the user sees a generic notice
    Failed {
        /// Original filename
        filename: String,
        /// User-visible message
        message: String,
    },
}

/// Request handler with its dependencies injected at construction
///
/// Holds no mutable state: every upload is processed on its own freshly
/// decoded table, so callers may handle simultaneous uploads from separate
/// threads.
#[derive(Debug, Clone)]
pub struct UploadHandler {
    forecaster: StationaryForecaster,
}

impl UploadHandler {
    /// Create a handler for the given configuration
    pub fn new(config: ForecastConfig) -> Self {
        Self {
            forecaster: StationaryForecaster::new(config),
        }
    }

    /// Handle one upload, converting any failure into a user-visible notice
    pub fn handle(&self, contents: &str, filename: &str) -> UploadOutcome {
        match self.process(contents, filename) {
            Ok(processed) => UploadOutcome::Processed(processed),
            Err(err) => {
                log::error!("Upload '{}' failed: {}", filename, err);
                UploadOutcome::Failed {
                    filename: filename.to_string(),
                    message: UPLOAD_ERROR_NOTICE.to_string(),
                }
            }
        }
    }

    /// Handle several uploads; each is processed independently
    pub fn handle_many<'a, I>(&self, uploads: I) -> Vec<UploadOutcome>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        uploads
            .into_iter()
            .map(|(contents, filename)| self.handle(contents, filename))
            .collect()
    }

    fn process(&self, contents: &str, filename: &str) -> Result<ProcessedUpload> {
        let table = decode_upload(
            contents,
            filename,
            &self.forecaster.config().target_column,
        )?;

        Ok(ProcessedUpload {
            filename: filename.to_string(),
            series: table.target_values()?,
            rolling_mean: table.rolling_mean(ROLLING_MEAN_WINDOW)?,
            forecast: self.forecaster.forecast_table(&table)?,
        })
    }
}
