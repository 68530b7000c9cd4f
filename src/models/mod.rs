//! Forecasting models

use crate::error::Result;
use std::fmt::Debug;

/// Forecast model that can be fit to a numeric series
pub trait ForecastModel: Debug + Clone {
    /// The type of fitted model produced
    type Trained: TrainedForecastModel;

    /// Fit the model to a series
    fn fit(&self, series: &[f64]) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// Fitted forecast model
pub trait TrainedForecastModel: Debug {
    /// One-step-ahead fitted values for the observed positions
    fn predict_in_sample(&self) -> Result<Vec<f64>>;

    /// Iterated forecasts for positions beyond the observed range
    fn forecast(&self, horizon: usize) -> Result<Vec<f64>>;

    /// Name of the model
    fn name(&self) -> &str;
}

pub mod arima;
