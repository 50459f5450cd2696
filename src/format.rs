//! Presentation formatting for forecast output.
//!
//! Pure boundary adapter: the exact output shape (date format, decimal
//! places, CSV header) is part of the external contract, but no business
//! logic lives here.

use crate::error::{ForecastError, Result};
use crate::pipeline::ForecastResult;
use chrono::NaiveDate;

/// Header of the exported CSV file
pub const CSV_HEADER: [&str; 2] = ["Data (Dia/Mês/Ano)", "Preço (US$)"];

/// Download file name for the exported forecast table
pub const CSV_FILE_NAME: &str = "previsao_preco_petroleo.csv";

/// Format a date for display as day-month-year
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Round a price to two decimal places
pub fn round_price(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

/// One display row of the forecast table
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// Date formatted as DD-MM-YYYY
    pub date: String,
    /// Price rounded to two decimal places
    pub price: f64,
}

/// Display table for the trailing forecast window
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastTable {
    rows: Vec<TableRow>,
}

impl ForecastTable {
    /// Build the display table from a forecast's trailing window
    pub fn from_result(result: &ForecastResult) -> Self {
        let rows = result
            .trailing_window()
            .iter()
            .map(|p| TableRow {
                date: format_date(p.date),
                price: round_price(p.yhat),
            })
            .collect();

        Self { rows }
    }

    /// The table rows, chronologically ascending
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Number of rows in the table
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as CSV with the documented header.
    ///
    /// Prices are written with exactly two decimals.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADER)?;
        for row in &self.rows {
            let price = format!("{:.2}", row.price);
            writer.write_record([row.date.as_str(), price.as_str()])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| ForecastError::Data(err.to_string()))?;
        String::from_utf8(bytes).map_err(|err| ForecastError::Data(err.to_string()))
    }
}
