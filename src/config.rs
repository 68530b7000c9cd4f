//! Configuration for the forecasting pipeline
//!
//! The model order and decision threshold live here as named constants, so
//! the pipeline can be exercised against alternate parameterizations without
//! code changes.

use crate::error::{ForecastDashError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Model order fitted when none is configured
pub const DEFAULT_ARIMA_ORDER: ArimaOrder = ArimaOrder { p: 2, d: 0, q: 1 };

/// A series counts as stationary when its test score is strictly below this
pub const STATIONARITY_THRESHOLD: f64 = 0.05;

/// Window of the rolling-mean overlay shown next to the raw series
pub const ROLLING_MEAN_WINDOW: usize = 3;

/// ARIMA model order (p, d, q)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArimaOrder {
    /// AR order (p)
    pub p: usize,
    /// Differencing order (d)
    pub d: usize,
    /// MA order (q)
    pub q: usize,
}

impl ArimaOrder {
    /// Create a new order, validating the bounds the estimator supports
    pub fn new(p: usize, d: usize, q: usize) -> Result<Self> {
        if p > 10 {
            return Err(ForecastDashError::InvalidParameter(
                "AR order must be <= 10".to_string(),
            ));
        }
        if d > 2 {
            return Err(ForecastDashError::InvalidParameter(
                "Differencing order must be <= 2".to_string(),
            ));
        }
        if q > 10 {
            return Err(ForecastDashError::InvalidParameter(
                "MA order must be <= 10".to_string(),
            ));
        }

        Ok(Self { p, d, q })
    }

    /// Fewest observations a series needs for this order to be estimable
    pub fn min_observations(&self) -> usize {
        self.p + self.d + self.q + 1
    }
}

impl fmt::Display for ArimaOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ARIMA({},{},{})", self.p, self.d, self.q)
    }
}

/// Configuration for a forecasting run
///
/// The target column is named explicitly; nothing falls back to a
/// rightmost-column convention, so reordering upload columns cannot silently
/// change what gets forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Name of the column to forecast
    pub target_column: String,
    /// Model order
    pub order: ArimaOrder,
    /// Decision threshold for the stationarity test score
    pub stationarity_threshold: f64,
}

impl ForecastConfig {
    /// Create a configuration with the default order and threshold
    pub fn new(target_column: impl Into<String>) -> Self {
        Self {
            target_column: target_column.into(),
            order: DEFAULT_ARIMA_ORDER,
            stationarity_threshold: STATIONARITY_THRESHOLD,
        }
    }

    /// Override the model order
    pub fn with_order(mut self, order: ArimaOrder) -> Self {
        self.order = order;
        self
    }

    /// Override the stationarity threshold
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self> {
        if threshold <= 0.0 || threshold >= 1.0 {
            return Err(ForecastDashError::InvalidParameter(
                "Stationarity threshold must be between 0 and 1".to_string(),
            ));
        }

        self.stationarity_threshold = threshold;
        Ok(self)
    }
}
