use brent_forecast::model::{PretrainedModel, PriceModel, Seasonality, TrendParams};
use brent_forecast::pipeline::{forecast, Horizon};
use brent_forecast::ForecastError;
use chrono::{Duration, NaiveDate};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Model whose history runs daily from 2024-11-01 through 2024-11-18
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
            changepoints_t: vec![0.5],
            deltas: vec![0.05],
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

#[rstest]
#[case(1)]
#[case(5)]
#[case(30)]
fn trailing_window_has_exactly_horizon_rows(#[case] days: i64) {
    let model = sample_model();
    let horizon = Horizon::new(days).unwrap();

    let result = forecast(&model, horizon).unwrap();
    let window = result.trailing_window();

    assert_eq!(window.len(), days as usize);

    // Strictly after the last history date, contiguous daily, ascending
    let mut expected = model.last_history_date();
    for point in window {
        expected = expected + Duration::days(1);
        assert_eq!(point.date, expected);
    }
}

#[test]
fn forecast_is_deterministic() {
    let model = sample_model();
    let horizon = Horizon::new(10).unwrap();

    let first = forecast(&model, horizon).unwrap();
    let second = forecast(&model, horizon).unwrap();

    assert_eq!(first, second);
}

#[test]
fn one_day_horizon_is_dated_one_day_after_history() {
    let model = sample_model();
    let result = forecast(&model, Horizon::new(1).unwrap()).unwrap();

    let window = result.trailing_window();
    assert_eq!(window.len(), 1);
    assert_eq!(
        window[0].date,
        NaiveDate::from_ymd_opt(2024, 11, 19).unwrap()
    );
}

#[test]
fn five_day_forecast_covers_the_following_five_dates() {
    let model = sample_model();
    assert_eq!(
        model.last_history_date(),
        NaiveDate::from_ymd_opt(2024, 11, 18).unwrap()
    );

    let result = forecast(&model, Horizon::new(5).unwrap()).unwrap();
    let window = result.trailing_window();

    let dates: Vec<NaiveDate> = window.iter().map(|p| p.date).collect();
    let expected: Vec<NaiveDate> = (19..=23)
        .map(|day| NaiveDate::from_ymd_opt(2024, 11, day).unwrap())
        .collect();
    assert_eq!(dates, expected);

    for point in window {
        assert!(point.yhat.is_finite());
        assert!(point.yhat_lower <= point.yhat);
        assert!(point.yhat <= point.yhat_upper);
    }
}

#[test]
fn full_sequence_includes_history_and_extension() {
    let model = sample_model();
    let result = forecast(&model, Horizon::new(5).unwrap()).unwrap();

    // 18 history dates plus 5 extended dates
    assert_eq!(result.len(), 23);
    assert_eq!(result.points()[0].date, NaiveDate::from_ymd_opt(2024, 11, 1).unwrap());
}

#[test]
fn chart_window_is_three_horizons_capped_at_full_length() {
    let model = sample_model();

    let result = forecast(&model, Horizon::new(5).unwrap()).unwrap();
    assert_eq!(result.chart_window().len(), 15);

    // 3 * 30 exceeds the 48-row sequence, so the cap applies
    let result = forecast(&model, Horizon::new(30).unwrap()).unwrap();
    assert_eq!(result.chart_window().len(), result.len());
}

#[rstest]
#[case(0)]
#[case(-3)]
fn non_positive_horizons_are_rejected(#[case] days: i64) {
    let err = Horizon::new(days).unwrap_err();
    assert!(matches!(err, ForecastError::InvalidHorizon(_)));
}

#[rstest]
#[case("abc")]
#[case("2.5")]
#[case("")]
#[case("0")]
#[case("-3")]
fn malformed_horizon_input_is_rejected(#[case] raw: &str) {
    let err = Horizon::parse(raw).unwrap_err();
    assert!(matches!(err, ForecastError::InvalidHorizon(_)));
}

#[test]
fn horizon_input_tolerates_whitespace() {
    let horizon = Horizon::parse(" 7 ").unwrap();
    assert_eq!(horizon.days(), 7);
}

#[test]
fn predict_rejects_malformed_date_index() {
    let model = sample_model();

    let err = model.predict(&[]).unwrap_err();
    assert!(matches!(err, ForecastError::Prediction(_)));

    let descending = vec![
        NaiveDate::from_ymd_opt(2024, 11, 20).unwrap(),
        NaiveDate::from_ymd_opt(2024, 11, 19).unwrap(),
    ];
    let err = model.predict(&descending).unwrap_err();
    assert!(matches!(err, ForecastError::Prediction(_)));
}
