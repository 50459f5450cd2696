use brent_forecast::data::HistoricalSeries;
use brent_forecast::error::Result;
use brent_forecast::events::PriceEvent;
use brent_forecast::model::{Prediction, PretrainedModel, PriceModel, Seasonality, TrendParams};
use brent_forecast::pipeline::Horizon;
use brent_forecast::{ForecastError, Session};
use chrono::{Duration, NaiveDate};
use pretty_assertions::assert_eq;

fn sample_model() -> PriceModel {
    let start = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
    let history: Vec<NaiveDate> = (0..18).map(|i| start + Duration::days(i)).collect();

    PriceModel::new(
        "Prophet",
        start,
        history,
        17.0,
        80.0,
        TrendParams {
            k: 0.1,
            m: 1.0,
            changepoints_t: vec![],
            deltas: vec![],
        },
        vec![Seasonality {
            name: "weekly".to_string(),
            period_days: 7.0,
            fourier_order: 1,
            beta: vec![0.01, 0.02],
        }],
        0.02,
    )
    .unwrap()
}

/// Model whose predict step always fails
#[derive(Debug)]
struct BrokenModel {
    last_date: NaiveDate,
}

impl PretrainedModel for BrokenModel {
    fn name(&self) -> &str {
        "Broken"
    }

    fn last_history_date(&self) -> NaiveDate {
        self.last_date
    }

    fn extend_horizon(&self, horizon: Horizon) -> Vec<NaiveDate> {
        (1..=horizon.days() as i64)
            .map(|i| self.last_date + Duration::days(i))
            .collect()
    }

    fn predict(&self, _dates: &[NaiveDate]) -> Result<Vec<Prediction>> {
        Err(ForecastError::Prediction(
            "Model backend unavailable".to_string(),
        ))
    }
}

#[test]
fn successful_request_caches_the_result() {
    let model = sample_model();
    let mut session = Session::new();

    assert!(session.forecast().is_none());

    session.request_forecast(&model, "7").unwrap();

    assert_eq!(session.last_horizon(), Some(Horizon::new(7).unwrap()));
    assert_eq!(session.forecast().unwrap().trailing_window().len(), 7);
    assert_eq!(session.forecast_table().unwrap().len(), 7);
}

#[test]
fn new_request_replaces_the_cache_wholesale() {
    let model = sample_model();
    let mut session = Session::new();

    session.request_forecast(&model, "7").unwrap();
    session.request_forecast(&model, "3").unwrap();

    assert_eq!(session.last_horizon(), Some(Horizon::new(3).unwrap()));
    assert_eq!(session.forecast().unwrap().trailing_window().len(), 3);
}

#[test]
fn invalid_horizon_is_rejected_before_the_pipeline_runs() {
    let model = sample_model();
    let mut session = Session::new();

    for raw in ["0", "-3", "abc", "1.5"] {
        let err = session.request_forecast(&model, raw).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidHorizon(_)));
        assert!(session.forecast().is_none());
        assert!(session.last_horizon().is_none());
    }
}

#[test]
fn prediction_failure_retains_the_previous_result() {
    let model = sample_model();
    let mut session = Session::new();

    session.request_forecast(&model, "5").unwrap();
    let cached = session.forecast().unwrap().clone();

    let broken = BrokenModel {
        last_date: model.last_history_date(),
    };
    let err = session.request_forecast(&broken, "5").unwrap_err();
    assert!(matches!(err, ForecastError::Prediction(_)));

    assert_eq!(session.forecast(), Some(&cached));
    assert_eq!(session.last_horizon(), Some(Horizon::new(5).unwrap()));
}

#[test]
fn range_selection_is_clamped_to_the_series_bounds() {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let dates: Vec<NaiveDate> = (0..100).map(|i| start + Duration::days(i)).collect();
    let prices: Vec<f64> = (0..100).map(|i| 60.0 + i as f64 * 0.1).collect();
    let series = HistoricalSeries::new(dates, prices).unwrap();

    let mut session = Session::new();
    session
        .select_range(
            &series,
            NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
        )
        .unwrap();

    assert_eq!(
        session.date_range(),
        Some((series.min_date(), series.max_date()))
    );
}

#[test]
fn range_entirely_outside_the_series_is_rejected() {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let dates: Vec<NaiveDate> = (0..100).map(|i| start + Duration::days(i)).collect();
    let prices: Vec<f64> = (0..100).map(|i| 60.0 + i as f64 * 0.1).collect();
    let series = HistoricalSeries::new(dates, prices).unwrap();

    let mut session = Session::new();
    session
        .select_range(&series, start, start + Duration::days(30))
        .unwrap();
    let previous = session.date_range();

    // A range strictly after the series must not clamp into an inverted
    // pair; it is rejected and the previous selection survives
    let err = session
        .select_range(
            &series,
            NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2031, 1, 1).unwrap(),
        )
        .unwrap_err();
    assert!(matches!(err, ForecastError::Data(_)));
    assert_eq!(session.date_range(), previous);

    // Same for a range strictly before the series
    let err = session
        .select_range(
            &series,
            NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2010, 12, 31).unwrap(),
        )
        .unwrap_err();
    assert!(matches!(err, ForecastError::Data(_)));
    assert_eq!(session.date_range(), previous);

    if let Some((s, e)) = session.date_range() {
        assert!(s <= e);
    }
}

#[test]
fn inverted_range_selection_is_rejected() {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let dates: Vec<NaiveDate> = (0..10).map(|i| start + Duration::days(i)).collect();
    let prices = vec![60.0; 10];
    let series = HistoricalSeries::new(dates, prices).unwrap();

    let mut session = Session::new();
    let err = session
        .select_range(
            &series,
            NaiveDate::from_ymd_opt(2020, 1, 9).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        )
        .unwrap_err();

    assert!(matches!(err, ForecastError::Data(_)));
    assert!(session.date_range().is_none());
}

#[test]
fn event_selection_can_be_set_and_cleared() {
    let mut session = Session::new();

    session.select_event(PriceEvent::CovidPandemic2020);
    assert_eq!(session.selected_event(), Some(PriceEvent::CovidPandemic2020));

    session.clear_event();
    assert!(session.selected_event().is_none());
}
