//! Stationarity-aware forecasting pipeline
//!
//! One strict sequence per table: classify the target, select a
//! representation, fit a fixed-order ARIMA, predict positions 1..2N, undo the
//! transform. Nothing is retried and nothing is cached; errors propagate to
//! the boundary untouched.

use crate::config::ForecastConfig;
use crate::data::SeriesTable;
use crate::error::{ForecastDashError, Result};
use crate::models::arima::ArimaModel;
use crate::models::{ForecastModel, TrainedForecastModel};
use crate::representation::{select_representation, Representation};
use crate::stationarity::{AdfTest, StationarityReport};
use serde::Serialize;

/// Forecast produced for one uploaded series
#[derive(Debug, Clone, Serialize)]
pub struct ForecastOutcome {
    /// Predicted values for positions 1..2N, on the raw series' scale
    pub values: Vec<f64>,
    /// Representation the model was fit on
    pub representation: Representation,
    /// Stationarity reports, in the order the tests ran
    pub reports: Vec<StationarityReport>,
    /// Name of the fitted model
    pub model: String,
}

impl ForecastOutcome {
    /// Serialize the outcome for the dashboard boundary
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            ForecastDashError::DataError(format!("Cannot serialize forecast: {}", e))
        })
    }
}

/// Pipeline that picks a stationary representation and fits a fixed-order ARIMA
#[derive(Debug, Clone)]
pub struct StationaryForecaster {
    config: ForecastConfig,
}

impl StationaryForecaster {
    /// Create a forecaster from a configuration
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    /// Get the active configuration
    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast the table's target column
    ///
    /// Returns in-sample predictions for the observed positions followed by an
    /// equal-length extrapolation. When the model was fit on the logged
    /// series, the predictions are exponentiated back to the raw scale.
    pub fn forecast_table(&self, table: &SeriesTable) -> Result<ForecastOutcome> {
        let classifier = AdfTest::new(self.config.stationarity_threshold);
        let choice = select_representation(table, &classifier)?;

        let series = choice.table.target_values()?;
        let trained = ArimaModel::new(self.config.order).fit(&series)?;

        let mut values = trained.predict_in_sample()?;
        values.extend(trained.forecast(series.len())?);

        Ok(ForecastOutcome {
            values: choice.representation.invert(values),
            representation: choice.representation,
            reports: choice.reports,
            model: trained.name().to_string(),
        })
    }
}
