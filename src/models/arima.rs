//! ARIMA model for series forecasting
//!
//! Estimation is closed-form: Yule-Walker equations for the AR part (solved
//! with the Levinson-Durbin recursion) and residual autocorrelation for the
//! MA part. There is no iterative optimizer, so a fit either succeeds in
//! bounded time or fails fast with a `ModelFitError`.

use crate::config::ArimaOrder;
use crate::error::{ForecastDashError, Result};
use crate::models::{ForecastModel, TrainedForecastModel};

/// Variance below this means the series carries no usable signal
const DEGENERATE_VARIANCE: f64 = 1e-12;

/// ARIMA model (AutoRegressive Integrated Moving Average)
#[derive(Debug, Clone)]
pub struct ArimaModel {
    /// Name of the model
    name: String,
    /// Model order
    order: ArimaOrder,
}

/// Fitted ARIMA model
#[derive(Debug, Clone)]
pub struct TrainedArimaModel {
    /// Name of the model
    name: String,
    /// Model order
    order: ArimaOrder,
    /// Estimated AR coefficients
    ar_coeffs: Vec<f64>,
    /// Estimated MA coefficients
    ma_coeffs: Vec<f64>,
    /// Mean of the differenced series, used as the constant term
    constant: f64,
    /// Observed series on the original scale
    observed: Vec<f64>,
    /// Differenced series the coefficients were estimated on
    differenced: Vec<f64>,
    /// One-step-ahead residuals on the differenced scale
    residuals: Vec<f64>,
}

impl ArimaModel {
    /// Create a new ARIMA model with the given order
    pub fn new(order: ArimaOrder) -> Self {
        Self {
            name: order.to_string(),
            order,
        }
    }
}

impl ForecastModel for ArimaModel {
    type Trained = TrainedArimaModel;

    fn fit(&self, series: &[f64]) -> Result<TrainedArimaModel> {
        let min_required = self.order.min_observations();
        if series.len() < min_required {
            return Err(ForecastDashError::ModelFitError(format!(
                "Insufficient data for {}: need at least {} observations, got {}",
                self.name,
                min_required,
                series.len()
            )));
        }
        if series.iter().any(|v| !v.is_finite()) {
            return Err(ForecastDashError::ModelFitError(
                "Series contains NaN or infinite values".to_string(),
            ));
        }

        let differenced = difference(series, self.order.d);
        let n = differenced.len();

        let mean = differenced.iter().sum::<f64>() / n as f64;
        let variance = differenced.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
        if variance < DEGENERATE_VARIANCE {
            return Err(ForecastDashError::ModelFitError(
                "Series is degenerate after differencing, the covariance structure is singular"
                    .to_string(),
            ));
        }

        let ar_coeffs = estimate_ar_coefficients(&differenced, self.order.p);

        // One-step residuals of the AR fit, used to estimate the MA part
        let mut residuals = vec![0.0; n];
        for i in self.order.p..n {
            let mut prediction = mean;
            for (j, coeff) in ar_coeffs.iter().enumerate() {
                prediction += coeff * (differenced[i - j - 1] - mean);
            }
            residuals[i] = differenced[i] - prediction;
        }

        let ma_coeffs = estimate_ma_coefficients(&residuals, self.order.q);

        Ok(TrainedArimaModel {
            name: self.name.clone(),
            order: self.order,
            ar_coeffs,
            ma_coeffs,
            constant: mean,
            observed: series.to_vec(),
            differenced,
            residuals,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedArimaModel {
    fn predict_in_sample(&self) -> Result<Vec<f64>> {
        let p = self.order.p;
        let d = self.order.d;
        let n = self.observed.len();

        let mut fitted = Vec::with_capacity(n);

        // Positions with no usable history are backfilled with the observations
        fitted.extend_from_slice(&self.observed[..(p + d).min(n)]);

        for i in (p + d)..n {
            // Index of position i on the differenced scale
            let di = i - d;

            let mut prediction = self.constant;
            for (j, coeff) in self.ar_coeffs.iter().enumerate() {
                prediction += coeff * (self.differenced[di - j - 1] - self.constant);
            }
            for (k, coeff) in self.ma_coeffs.iter().enumerate() {
                if di > k {
                    prediction += coeff * self.residuals[di - k - 1];
                }
            }

            fitted.push(self.rebuild_level(prediction, i));
        }

        Ok(fitted)
    }

    fn forecast(&self, horizon: usize) -> Result<Vec<f64>> {
        if horizon == 0 {
            return Ok(Vec::new());
        }

        let n = self.differenced.len();
        let mut extended = self.differenced.clone();
        let mut extended_residuals = self.residuals.clone();

        for _ in 0..horizon {
            let mut prediction = self.constant;

            for (j, coeff) in self.ar_coeffs.iter().enumerate() {
                let idx = extended.len() - j - 1;
                prediction += coeff * (extended[idx] - self.constant);
            }
            for (k, coeff) in self.ma_coeffs.iter().enumerate() {
                if extended_residuals.len() > k {
                    let idx = extended_residuals.len() - k - 1;
                    prediction += coeff * extended_residuals[idx];
                }
            }

            extended.push(prediction);
            // Future shocks are zero in expectation
            extended_residuals.push(0.0);
        }

        Ok(self.undifference(&extended[n..]))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedArimaModel {
    /// Get the estimated AR coefficients
    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar_coeffs
    }

    /// Get the estimated MA coefficients
    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma_coeffs
    }

    /// Rebuild the level at position `i` from a predicted d-th difference
    ///
    /// y_i = pred + sum over j in 1..=d of (-1)^(j+1) * C(d, j) * y_{i-j}
    fn rebuild_level(&self, prediction: f64, i: usize) -> f64 {
        let d = self.order.d;
        if d == 0 {
            return prediction;
        }

        let mut level = prediction;
        let mut binom = 1.0;
        for j in 1..=d {
            binom = binom * (d + 1 - j) as f64 / j as f64;
            let sign = if j % 2 == 1 { 1.0 } else { -1.0 };
            level += sign * binom * self.observed[i - j];
        }

        level
    }

    /// Integrate forecasts on the differenced scale back to the level scale
    fn undifference(&self, forecasts: &[f64]) -> Vec<f64> {
        if self.order.d == 0 {
            return forecasts.to_vec();
        }

        // Tail value of each differencing level, innermost last
        let mut tails = Vec::with_capacity(self.order.d);
        let mut current = self.observed.clone();
        for _ in 0..self.order.d {
            tails.push(current[current.len() - 1]);
            current = current.windows(2).map(|w| w[1] - w[0]).collect();
        }

        let mut result = forecasts.to_vec();
        for tail in tails.into_iter().rev() {
            let mut level = tail;
            for value in result.iter_mut() {
                level += *value;
                *value = level;
            }
        }

        result
    }
}

/// Difference a series `order` times
fn difference(series: &[f64], order: usize) -> Vec<f64> {
    let mut current = series.to_vec();
    for _ in 0..order {
        current = current.windows(2).map(|w| w[1] - w[0]).collect();
    }
    current
}

/// Estimate AR coefficients by solving the Yule-Walker equations
/// (Levinson-Durbin recursion)
fn estimate_ar_coefficients(series: &[f64], p: usize) -> Vec<f64> {
    if p == 0 {
        return Vec::new();
    }

    let n = series.len();
    let mean = series.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = series.iter().map(|v| v - mean).collect();

    let mut autocov = vec![0.0; p + 1];
    for (lag, cov) in autocov.iter_mut().enumerate() {
        *cov = centered
            .iter()
            .skip(lag)
            .zip(&centered)
            .map(|(a, b)| a * b)
            .sum::<f64>()
            / n as f64;
    }

    let mut coeffs = vec![0.0; p];
    if autocov[0].abs() < 1e-10 {
        return coeffs;
    }

    coeffs[0] = autocov[1] / autocov[0];
    for k in 1..p {
        let mut numerator = autocov[k + 1];
        for j in 0..k {
            numerator -= coeffs[j] * autocov[k - j];
        }

        let mut denominator = autocov[0];
        for j in 0..k {
            denominator -= coeffs[j] * autocov[j + 1];
        }
        if denominator.abs() < 1e-10 {
            break;
        }

        let reflection = numerator / denominator;
        let previous = coeffs.clone();
        coeffs[k] = reflection;
        for j in 0..k {
            coeffs[j] = previous[j] - reflection * previous[k - 1 - j];
        }
    }

    coeffs
}

/// Estimate MA coefficients from the autocorrelation of the fit residuals
fn estimate_ma_coefficients(residuals: &[f64], q: usize) -> Vec<f64> {
    if q == 0 || residuals.is_empty() {
        return vec![0.0; q];
    }

    let n = residuals.len();
    let mean = residuals.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = residuals.iter().map(|v| v - mean).collect();
    let variance = centered.iter().map(|v| v * v).sum::<f64>() / n as f64;

    let mut coeffs = vec![0.0; q];
    if variance.abs() < 1e-10 {
        return coeffs;
    }

    for (lag, coeff) in coeffs.iter_mut().enumerate() {
        let lagged_sum: f64 = centered
            .iter()
            .skip(lag + 1)
            .zip(&centered)
            .map(|(a, b)| a * b)
            .sum();
        // Clamped to keep the forecast recursion stable
        *coeff = ((lagged_sum / n as f64) / variance).clamp(-0.99, 0.99);
    }

    coeffs
}
