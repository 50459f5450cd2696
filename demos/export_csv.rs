use brent_forecast::artifact;
use brent_forecast::format::{ForecastTable, CSV_FILE_NAME};
use brent_forecast::model::{PriceModel, Seasonality, TrendParams};
use brent_forecast::pipeline::{self, Horizon};
use chrono::{Duration, NaiveDate};
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Brent Forecast: Artifact Round-Trip and CSV Export");
    println!("==================================================\n");

    // Serialize a fitted model the way the dashboard's artifact is shipped,
    // then load it back through the artifact loader.
    let artifact_path = std::env::temp_dir().join("modelo_prophet.json");
    fs::write(&artifact_path, serde_json::to_string_pretty(&create_sample_model()?)?)?;
    println!("Wrote artifact to {}", artifact_path.display());

    let model = artifact::load(&artifact_path)?;

    let result = pipeline::forecast(&model, Horizon::new(7)?)?;
    let table = ForecastTable::from_result(&result);

    let csv = table.to_csv()?;
    println!("\nCSV download ({}):\n", CSV_FILE_NAME);
    print!("{}", csv);

    fs::remove_file(&artifact_path)?;
    Ok(())
}

fn create_sample_model() -> brent_forecast::error::Result<PriceModel> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let history: Vec<NaiveDate> = (0..323).map(|i| start + Duration::days(i)).collect();

    PriceModel::new(
        "Prophet",
        start,
        history,
        322.0,
        82.0,
        TrendParams {
            k: 0.08,
            m: 0.97,
            changepoints_t: vec![0.4, 0.8],
            deltas: vec![-0.03, 0.015],
        },
        vec![Seasonality {
            name: "weekly".to_string(),
            period_days: 7.0,
            fourier_order: 2,
            beta: vec![0.005, -0.003, 0.002, 0.001],
        }],
        0.02,
    )
}
