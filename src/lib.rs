//! # Forecast Dash
//!
//! The data-processing core of a small upload-and-forecast dashboard.
//!
//! A user uploads a tabular file containing a time series; this crate decodes
//! it, determines whether the target series is stationary (directly, or after
//! a natural-log transform), fits a fixed-order ARIMA model on whichever
//! representation is stationary, and returns in-sample predictions plus an
//! equal-length extrapolation, undoing the log transform if one was applied.
//!
//! ## Features
//!
//! - Upload decoding from the dashboard widget's base64 data-URL payloads
//! - Stationarity classification with a Dickey-Fuller unit-root test
//! - Automatic selection between the raw and log-transformed series
//! - Closed-form ARIMA estimation with deterministic output
//! - A request handler that turns failures into user-visible notices
//!
//! ## Quick Start
//!
//! ```
//! use forecast_dash::config::ForecastConfig;
//! use forecast_dash::data::SeriesTable;
//! use forecast_dash::forecast::StationaryForecaster;
//!
//! # fn main() -> forecast_dash::error::Result<()> {
//! let table = SeriesTable::from_values(
//!     "riders",
//!     vec![112.0, 118.0, 132.0, 129.0, 121.0, 135.0, 148.0, 148.0, 136.0, 119.0],
//! )?;
//!
//! let forecaster = StationaryForecaster::new(ForecastConfig::new("riders"));
//! let outcome = forecaster.forecast_table(&table)?;
//!
//! // In-sample fit for the 10 observed positions, then 10 extrapolated ones
//! assert_eq!(outcome.values.len(), 2 * table.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod forecast;
pub mod handler;
pub mod ingest;
pub mod models;
pub mod representation;
pub mod stationarity;

// Re-export commonly used types
pub use crate::config::{ArimaOrder, ForecastConfig};
pub use crate::data::{SeriesTable, TableLoader};
pub use crate::error::ForecastDashError;
pub use crate::forecast::{ForecastOutcome, StationaryForecaster};
pub use crate::handler::{ProcessedUpload, UploadHandler, UploadOutcome};
pub use crate::representation::Representation;
pub use crate::stationarity::{AdfTest, StationarityClassifier, StationarityReport};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
