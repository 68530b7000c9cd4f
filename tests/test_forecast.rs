use assert_approx_eq::assert_approx_eq;
use forecast_dash::config::ForecastConfig;
use forecast_dash::data::SeriesTable;
use forecast_dash::error::ForecastDashError;
use forecast_dash::forecast::StationaryForecaster;
use forecast_dash::models::arima::ArimaModel;
use forecast_dash::models::{ForecastModel, TrainedForecastModel};
use forecast_dash::representation::Representation;

fn table_from(values: Vec<f64>) -> SeriesTable {
    SeriesTable::from_values("riders", values).unwrap()
}

fn forecaster() -> StationaryForecaster {
    StationaryForecaster::new(ForecastConfig::new("riders"))
}

#[test]
fn test_stationary_series_keeps_the_original_representation() {
    let table = table_from(vec![
        10.0, 12.0, 11.0, 13.0, 14.0, 15.0, 17.0, 16.0, 18.0, 20.0,
    ]);
    let outcome = forecaster().forecast_table(&table).unwrap();

    assert_eq!(outcome.representation, Representation::Original);
    assert_eq!(outcome.values.len(), 20);
    assert_eq!(outcome.reports.len(), 1);
    assert!(outcome.reports[0].stationary);
    assert!(outcome.values.iter().all(|v| v.is_finite()));
    assert_eq!(outcome.model, "ARIMA(2,0,1)");

    let json = outcome.to_json().unwrap();
    assert!(json.contains("\"original\""));
}

#[test]
fn test_exponential_series_is_forecast_on_the_log_scale() {
    let raw: Vec<f64> = (0..10).map(|i| f64::powi(2.0, i)).collect();
    let outcome = forecaster().forecast_table(&table_from(raw.clone())).unwrap();

    assert_eq!(outcome.representation, Representation::Log);
    assert_eq!(outcome.values.len(), 20);
    assert_eq!(outcome.reports.len(), 2);
    assert!(!outcome.reports[0].stationary);
    assert!(outcome.reports[1].stationary);
    assert!(outcome.values.iter().all(|v| *v > 0.0));

    // The outcome is exactly the exponential of the prediction on the logs
    let logged: Vec<f64> = raw.iter().map(|v| v.ln()).collect();
    let trained = ArimaModel::new(forecaster().config().order)
        .fit(&logged)
        .unwrap();
    let mut expected = trained.predict_in_sample().unwrap();
    expected.extend(trained.forecast(logged.len()).unwrap());

    for (value, log_prediction) in outcome.values.iter().zip(&expected) {
        assert_approx_eq!(*value, log_prediction.exp(), 1e-9);
    }
}

#[test]
fn test_no_stationary_representation_falls_back_to_the_raw_series() {
    // A near-zero threshold rejects both attempts for this input: the raw
    // doubling series scores +inf and its log scores exactly 0.0
    let config = ForecastConfig::new("riders").with_threshold(1e-9).unwrap();
    let raw: Vec<f64> = (0..10).map(|i| f64::powi(2.0, i)).collect();
    let outcome = StationaryForecaster::new(config)
        .forecast_table(&table_from(raw))
        .unwrap();

    assert_eq!(outcome.representation, Representation::Original);
    assert_eq!(outcome.reports.len(), 2);
    assert!(outcome.reports.iter().all(|r| !r.stationary));
    assert_eq!(outcome.values.len(), 20);
    assert!(outcome.values.iter().all(|v| v.is_finite()));
}

#[test]
fn test_short_series_raises_a_statistical_test_error() {
    // Long enough for the model order, too short for the unit-root test
    let table = table_from(vec![10.0, 11.0, 12.0, 13.0]);
    let result = forecaster().forecast_table(&table);

    assert!(matches!(
        result,
        Err(ForecastDashError::StatisticalTestError(_))
    ));
}

#[test]
fn test_log_of_non_positive_data_propagates_the_classifier_error() {
    // Exactly explosive downward, so the raw attempt fails and the log
    // attempt hits non-finite values
    let raw: Vec<f64> = (0..10).map(|i| -f64::powi(2.0, i)).collect();
    let result = forecaster().forecast_table(&table_from(raw));

    assert!(matches!(
        result,
        Err(ForecastDashError::StatisticalTestError(_))
    ));
}
