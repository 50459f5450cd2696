//! Historical Brent price series for the narrative/chart view.
//!
//! Loaded once at startup and immutable for the process lifetime. The
//! forecast pipeline never touches this data.

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};
use log::info;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Fixed relative path of the historical price table
pub const DEFAULT_HISTORY_PATH: &str = "preco_petroleo.csv";

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Historical (date, price) series, sorted chronologically ascending
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalSeries {
    dates: Vec<NaiveDate>,
    prices: Vec<f64>,
}

impl HistoricalSeries {
    /// Load the series from a CSV file with a date column and a price column
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        let series = Self::from_dataframe(df)?;
        info!(
            "Loaded {} historical prices from {} ({} to {})",
            series.len(),
            path.display(),
            series.min_date(),
            series.max_date()
        );
        Ok(series)
    }

    /// Build the series from an existing DataFrame
    pub fn from_dataframe(df: DataFrame) -> Result<Self> {
        let date_column = Self::detect_date_column(&df)?;
        let price_column = Self::detect_price_column(&df, &date_column)?;

        let dates = Self::extract_dates(&df, &date_column)?;
        let prices = Self::extract_prices(&df, &price_column)?;

        Self::new(dates, prices)
    }

    /// Build a series from parallel date and price vectors
    pub fn new(dates: Vec<NaiveDate>, prices: Vec<f64>) -> Result<Self> {
        if dates.len() != prices.len() {
            return Err(ForecastError::Data(format!(
                "Date count ({}) doesn't match price count ({})",
                dates.len(),
                prices.len()
            )));
        }
        if dates.is_empty() {
            return Err(ForecastError::Data(
                "Historical series is empty".to_string(),
            ));
        }

        // Source tables may be newest-first; store ascending
        let mut pairs: Vec<(NaiveDate, f64)> = dates.into_iter().zip(prices).collect();
        pairs.sort_by_key(|(date, _)| *date);

        let (dates, prices) = pairs.into_iter().unzip();
        Ok(Self { dates, prices })
    }

    /// Detect the date column by name, falling back to a temporal dtype
    fn detect_date_column(df: &DataFrame) -> Result<String> {
        let column_names = df.get_column_names();

        for name in &column_names {
            let lower_name = name.to_lowercase();
            if lower_name.contains("date") || lower_name.contains("data") {
                return Ok(name.to_string());
            }
        }

        if let Some(first_col) = df.get_columns().first() {
            if first_col.dtype().is_temporal() {
                return Ok(first_col.name().to_string());
            }
        }

        Err(ForecastError::Data(
            "No date column found in historical data".to_string(),
        ))
    }

    /// Detect the price column by name, falling back to the first numeric
    /// column that isn't the date column
    fn detect_price_column(df: &DataFrame, date_column: &str) -> Result<String> {
        let column_names = df.get_column_names();

        for name in &column_names {
            let lower_name = name.to_lowercase();
            if lower_name.contains("price")
                || lower_name.contains("preco")
                || lower_name.contains("preço")
                || lower_name.contains("close")
                || lower_name.contains("valor")
            {
                return Ok(name.to_string());
            }
        }

        for col in df.get_columns() {
            if col.name() != date_column && col.dtype().is_numeric() {
                return Ok(col.name().to_string());
            }
        }

        Err(ForecastError::Data(
            "No price column found in historical data".to_string(),
        ))
    }

    /// Pull dates out of the DataFrame, handling text and temporal dtypes
    fn extract_dates(df: &DataFrame, column: &str) -> Result<Vec<NaiveDate>> {
        let col = df.column(column)?;

        match col.dtype() {
            DataType::Utf8 => col
                .utf8()?
                .into_iter()
                .map(|opt| {
                    let raw = opt.ok_or_else(|| {
                        ForecastError::Data(format!("Missing date in column '{}'", column))
                    })?;
                    Self::parse_date(raw)
                })
                .collect(),
            DataType::Date => col
                .date()?
                .into_iter()
                .map(|opt| {
                    let days = opt.ok_or_else(|| {
                        ForecastError::Data(format!("Missing date in column '{}'", column))
                    })?;
                    // Epoch days are signed; dates before 1970 are valid
                    NaiveDate::from_ymd_opt(1970, 1, 1)
                        .unwrap()
                        .checked_add_signed(Duration::days(days as i64))
                        .ok_or_else(|| {
                            ForecastError::Data(format!("Date out of range: {} days", days))
                        })
                })
                .collect(),
            other => Err(ForecastError::Data(format!(
                "Unsupported dtype for date column '{}': {:?}",
                column, other
            ))),
        }
    }

    /// Parse a textual date, accepting ISO and Brazilian day-first forms
    fn parse_date(raw: &str) -> Result<NaiveDate> {
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(raw.trim(), format) {
                return Ok(date);
            }
        }
        Err(ForecastError::Data(format!(
            "Unparseable date: '{}'",
            raw
        )))
    }

    /// Pull prices out of the DataFrame, handling the common numeric dtypes
    fn extract_prices(df: &DataFrame, column: &str) -> Result<Vec<f64>> {
        let col = df.column(column)?;

        let values: Vec<f64> = match col.dtype() {
            DataType::Float64 => col.f64()?.into_iter().flatten().collect(),
            DataType::Float32 => col
                .f32()?
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect(),
            DataType::Int64 => col
                .i64()?
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect(),
            DataType::Int32 => col
                .i32()?
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect(),
            other => {
                return Err(ForecastError::Data(format!(
                    "Unsupported dtype for price column '{}': {:?}",
                    column, other
                )))
            }
        };

        Ok(values)
    }

    /// Dates of the series, ascending
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Prices of the series, aligned with `dates`
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series has no observations (never true once constructed)
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Earliest date in the series (lower bound for the range selector)
    pub fn min_date(&self) -> NaiveDate {
        self.dates[0]
    }

    /// Latest date in the series (upper bound for the range selector)
    pub fn max_date(&self) -> NaiveDate {
        *self.dates.last().unwrap()
    }

    /// Restrict the series to a display range, inclusive on both ends.
    ///
    /// The range is clamped to the series bounds; an inverted range is
    /// rejected.
    pub fn filter_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(ForecastError::Data(format!(
                "Invalid date range: {} is after {}",
                start, end
            )));
        }

        let mut dates = Vec::new();
        let mut prices = Vec::new();
        for (date, price) in self.dates.iter().zip(&self.prices) {
            if *date >= start && *date <= end {
                dates.push(*date);
                prices.push(*price);
            }
        }

        if dates.is_empty() {
            return Err(ForecastError::Data(format!(
                "No historical data between {} and {}",
                start, end
            )));
        }

        Ok(Self { dates, prices })
    }
}
