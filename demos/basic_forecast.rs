use brent_forecast::model::{PretrainedModel, PriceModel, Seasonality, TrendParams};
use brent_forecast::pipeline::Horizon;
use brent_forecast::Session;
use chrono::{Duration, NaiveDate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Brent Forecast: Basic Pipeline Example");
    println!("======================================\n");

    // In the real dashboard the model comes from artifact::load_default();
    // here we build a small fitted model inline.
    println!("Building sample model...");
    let model = create_sample_model()?;
    println!("Model history ends at {}\n", model.last_history_date());

    // One session per dashboard user
    let mut session = Session::new();

    // Forecast 30 days, the way the horizon arrives from the UI: as text
    println!("Requesting a 30-day forecast...");
    session.request_forecast(&model, "30")?;

    let table = session.forecast_table().expect("forecast was just cached");
    println!("Trailing window ({} rows):\n", table.len());
    for row in table.rows().iter().take(10) {
        println!("  {}  US$ {:.2}", row.date, row.price);
    }
    if table.len() > 10 {
        println!("  ... {} more rows", table.len() - 10);
    }

    // A second request replaces the cache wholesale
    println!("\nRequesting a 5-day forecast...");
    let result = session.run_forecast(&model, Horizon::new(5)?)?;
    println!(
        "Chart window now spans {} rows, table window {} rows",
        result.chart_window().len(),
        result.trailing_window().len()
    );

    Ok(())
}

fn create_sample_model() -> brent_forecast::error::Result<PriceModel> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let history: Vec<NaiveDate> = (0..687).map(|i| start + Duration::days(i)).collect();

    PriceModel::new(
        "Prophet",
        start,
        history,
        686.0,
        85.0,
        TrendParams {
            k: 0.12,
            m: 0.95,
            changepoints_t: vec![0.25, 0.5, 0.75],
            deltas: vec![-0.04, 0.02, -0.01],
        },
        vec![
            Seasonality {
                name: "weekly".to_string(),
                period_days: 7.0,
                fourier_order: 3,
                beta: vec![0.004, -0.002, 0.001, 0.003, -0.001, 0.002],
            },
            Seasonality {
                name: "yearly".to_string(),
                period_days: 365.25,
                fourier_order: 2,
                beta: vec![0.02, -0.015, 0.008, 0.005],
            },
        ],
        0.025,
    )
}
