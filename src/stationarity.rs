//! Stationarity testing for the representation selector

use crate::config::STATIONARITY_THRESHOLD;
use crate::error::{ForecastDashError, Result};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

/// Regressions with residual variance below this are treated as exact fits
const DEGENERATE_EPS: f64 = 1e-8;

/// Outcome of a stationarity test on one series
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StationarityReport {
    /// Test statistic (the t-ratio of the unit-root regression slope)
    pub statistic: f64,
    /// Normal-approximation p-value, carried for diagnostics only
    pub approx_p_value: f64,
    /// Verdict: stationary enough to model directly
    pub stationary: bool,
}

/// Verdict of "stationary enough to model directly" for a series
pub trait StationarityClassifier {
    /// Run the test and report the verdict
    fn classify(&self, series: &[f64]) -> Result<StationarityReport>;
}

/// Augmented Dickey-Fuller unit-root test (simplified, no augmentation lags)
///
/// Regresses the first difference on the lagged level and reports the t-ratio
/// of the slope. The verdict compares that score directly against the
/// threshold; the score is a raw test statistic, not a p-value (see
/// DESIGN.md).
#[derive(Debug, Clone)]
pub struct AdfTest {
    /// Decision threshold for the test score
    threshold: f64,
}

impl AdfTest {
    /// Fewest observations the unit-root regression can run on
    pub const MIN_OBSERVATIONS: usize = 5;

    /// Create a test with the given decision threshold
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Compute the test statistic for a series
    pub fn statistic(&self, series: &[f64]) -> Result<f64> {
        if series.len() < Self::MIN_OBSERVATIONS {
            return Err(ForecastDashError::StatisticalTestError(format!(
                "Series has {} points, the unit-root test needs at least {}",
                series.len(),
                Self::MIN_OBSERVATIONS
            )));
        }
        if series.iter().any(|v| !v.is_finite()) {
            return Err(ForecastDashError::StatisticalTestError(
                "Series contains non-finite values".to_string(),
            ));
        }

        // Regression: diff(y)_t = alpha + beta * y_{t-1} + e_t
        let y_lag = &series[..series.len() - 1];
        let y_diff: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();
        let n = y_diff.len() as f64;

        let mean_lag = y_lag.iter().sum::<f64>() / n;
        let mean_diff = y_diff.iter().sum::<f64>() / n;

        let mut ss_xy = 0.0;
        let mut ss_xx = 0.0;
        for (lag, diff) in y_lag.iter().zip(&y_diff) {
            ss_xy += (lag - mean_lag) * (diff - mean_diff);
            ss_xx += (lag - mean_lag).powi(2);
        }

        if ss_xx < DEGENERATE_EPS {
            return Err(ForecastDashError::StatisticalTestError(
                "Series is constant, the unit-root regression is undefined".to_string(),
            ));
        }

        let beta = ss_xy / ss_xx;
        let alpha = mean_diff - beta * mean_lag;

        let sse: f64 = y_lag
            .iter()
            .zip(&y_diff)
            .map(|(lag, diff)| {
                let residual = diff - alpha - beta * lag;
                residual * residual
            })
            .sum();
        let mse = sse / (n - 2.0);
        let se_beta = (mse / ss_xx).sqrt();

        if se_beta < DEGENERATE_EPS {
            // Exact fit: the slope sign alone decides
            return Ok(if beta.abs() < DEGENERATE_EPS {
                0.0
            } else {
                beta.signum() * f64::INFINITY
            });
        }

        Ok(beta / se_beta)
    }
}

impl Default for AdfTest {
    fn default() -> Self {
        Self::new(STATIONARITY_THRESHOLD)
    }
}

impl StationarityClassifier for AdfTest {
    fn classify(&self, series: &[f64]) -> Result<StationarityReport> {
        let statistic = self.statistic(series)?;
        let stationary = statistic < self.threshold;
        log::debug!(
            "ADF statistic {:.4} against threshold {} (stationary: {})",
            statistic,
            self.threshold,
            stationary
        );

        Ok(StationarityReport {
            statistic,
            approx_p_value: normal_cdf(statistic),
            stationary,
        })
    }
}

/// Standard normal CDF of the statistic, a rough p-value for diagnostics
fn normal_cdf(statistic: f64) -> f64 {
    if !statistic.is_finite() {
        return if statistic > 0.0 { 1.0 } else { 0.0 };
    }

    // Parameters are fixed and valid, construction cannot fail
    let standard_normal = Normal::new(0.0, 1.0).unwrap();
    standard_normal.cdf(statistic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternating_series_is_strongly_stationary() {
        let series: Vec<f64> = (0..12).map(|i| if i % 2 == 0 { 10.0 } else { -10.0 }).collect();
        let report = AdfTest::default().classify(&series).unwrap();

        assert!(report.stationary);
        assert!(report.statistic < -100.0);
    }

    #[test]
    fn test_doubling_series_is_not_stationary() {
        let series: Vec<f64> = (0..10).map(|i| f64::powi(2.0, i)).collect();
        let report = AdfTest::default().classify(&series).unwrap();

        assert!(!report.stationary);
        assert!(report.statistic > STATIONARITY_THRESHOLD);
    }
}
