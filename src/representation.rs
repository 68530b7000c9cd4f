//! Representation selection between the raw and log-transformed series

use crate::data::SeriesTable;
use crate::error::Result;
use crate::stationarity::{StationarityClassifier, StationarityReport};
use serde::{Deserialize, Serialize};

/// Which transform of the target series the model was fit on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    /// Series unmodified
    Original,
    /// Series replaced elementwise by its natural logarithm
    Log,
}

impl Representation {
    /// Undo the transform on a prediction series
    pub fn invert(&self, values: Vec<f64>) -> Vec<f64> {
        match self {
            Representation::Original => values,
            Representation::Log => values.into_iter().map(f64::exp).collect(),
        }
    }
}

/// A selected representation together with the table and diagnostics behind it
#[derive(Debug, Clone)]
pub struct RepresentationChoice {
    /// Table to fit the model on (target possibly log-transformed)
    pub table: SeriesTable,
    /// Transform tag, deciding the inverse applied to predictions
    pub representation: Representation,
    /// Reports from every stationarity test run, in attempt order
    pub reports: Vec<StationarityReport>,
}

/// Pick the representation to model: raw first, then log, then raw as fallback
///
/// A classifier error on either attempt propagates; in particular the log
/// transform is applied even when the target has non-positive values, and the
/// classifier's non-finite check is the only backstop.
pub fn select_representation<C: StationarityClassifier>(
    table: &SeriesTable,
    classifier: &C,
) -> Result<RepresentationChoice> {
    let raw_report = classifier.classify(&table.target_values()?)?;
    if raw_report.stationary {
        return Ok(RepresentationChoice {
            table: table.clone(),
            representation: Representation::Original,
            reports: vec![raw_report],
        });
    }

    let logged: Vec<f64> = table.target_values()?.into_iter().map(f64::ln).collect();
    let log_table = table.with_target_values(logged)?;
    let log_report = classifier.classify(&log_table.target_values()?)?;
    if log_report.stationary {
        return Ok(RepresentationChoice {
            table: log_table,
            representation: Representation::Log,
            reports: vec![raw_report, log_report],
        });
    }

    log::warn!(
        "No stationary representation found (raw {:.4}, log {:.4}), falling back to the raw series",
        raw_report.statistic,
        log_report.statistic
    );

    Ok(RepresentationChoice {
        table: table.clone(),
        representation: Representation::Original,
        reports: vec![raw_report, log_report],
    })
}
