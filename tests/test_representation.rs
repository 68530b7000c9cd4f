use assert_approx_eq::assert_approx_eq;
use forecast_dash::data::SeriesTable;
use forecast_dash::error::Result;
use forecast_dash::representation::{select_representation, Representation};
use forecast_dash::stationarity::{StationarityClassifier, StationarityReport};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Classifier stub returning a scripted sequence of verdicts
#[derive(Debug)]
struct ScriptedClassifier {
    verdicts: RefCell<VecDeque<bool>>,
}

impl ScriptedClassifier {
    fn new(verdicts: &[bool]) -> Self {
        Self {
            verdicts: RefCell::new(verdicts.iter().copied().collect()),
        }
    }
}

impl StationarityClassifier for ScriptedClassifier {
    fn classify(&self, _series: &[f64]) -> Result<StationarityReport> {
        let stationary = self.verdicts.borrow_mut().pop_front().unwrap_or(false);

        Ok(StationarityReport {
            statistic: 0.0,
            approx_p_value: 0.5,
            stationary,
        })
    }
}

fn sample_table() -> SeriesTable {
    SeriesTable::from_values("riders", vec![10.0, 20.0, 30.0, 40.0, 50.0]).unwrap()
}

#[test]
fn test_invert_undoes_the_log_transform() {
    let inverted = Representation::Log.invert(vec![0.0, 2.0f64.ln(), 3.0f64.ln()]);

    assert_approx_eq!(inverted[0], 1.0);
    assert_approx_eq!(inverted[1], 2.0);
    assert_approx_eq!(inverted[2], 3.0);

    let untouched = Representation::Original.invert(vec![1.0, 2.0, 3.0]);
    assert_eq!(untouched, vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_representation_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Representation::Log).unwrap(), "\"log\"");
    assert_eq!(
        serde_json::to_string(&Representation::Original).unwrap(),
        "\"original\""
    );
}

#[test]
fn test_stationary_raw_series_keeps_the_original_table() {
    let table = sample_table();
    let classifier = ScriptedClassifier::new(&[true]);
    let choice = select_representation(&table, &classifier).unwrap();

    assert_eq!(choice.representation, Representation::Original);
    assert_eq!(choice.reports.len(), 1);
    assert_eq!(choice.table.target_values().unwrap(), table.target_values().unwrap());
}

#[test]
fn test_log_representation_transforms_the_target() {
    let table = sample_table();
    let classifier = ScriptedClassifier::new(&[false, true]);
    let choice = select_representation(&table, &classifier).unwrap();

    assert_eq!(choice.representation, Representation::Log);
    assert_eq!(choice.reports.len(), 2);

    let logged = choice.table.target_values().unwrap();
    for (logged_value, raw_value) in logged.iter().zip(table.target_values().unwrap()) {
        assert_approx_eq!(*logged_value, raw_value.ln());
    }
}

#[test]
fn test_no_stationary_representation_falls_back_without_erroring() {
    let table = sample_table();
    let classifier = ScriptedClassifier::new(&[false, false]);
    let choice = select_representation(&table, &classifier).unwrap();

    assert_eq!(choice.representation, Representation::Original);
    assert_eq!(choice.reports.len(), 2);
    assert_eq!(choice.table.target_values().unwrap(), table.target_values().unwrap());
}
