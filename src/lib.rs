//! # Brent Forecast
//!
//! Data layer for an interactive Brent crude oil price dashboard.
//!
//! ## Features
//!
//! - Loading a pre-trained forecasting model from a serialized JSON artifact
//! - Forecast-on-demand pipeline: extend the model's date index by a
//!   user-supplied horizon, predict, and present the trailing window
//! - Display formatting (DD-MM-YYYY dates, 2-decimal prices) and CSV export
//! - Historical price series with date-range filtering for the chart view
//! - Four named price-shock events used as chart highlights
//! - Per-session request/response state, replaced wholesale on each request
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use brent_forecast::artifact;
//! use brent_forecast::format::ForecastTable;
//! use brent_forecast::pipeline::{self, Horizon};
//!
//! # fn main() -> brent_forecast::error::Result<()> {
//! // Load the model once at startup
//! let model = artifact::load_default()?;
//!
//! // Forecast 30 days past the known history
//! let horizon = Horizon::new(30)?;
//! let result = pipeline::forecast(&model, horizon)?;
//!
//! // Format the trailing window for display and export
//! let table = ForecastTable::from_result(&result);
//! let csv = table.to_csv()?;
//! # let _ = csv;
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod data;
pub mod error;
pub mod events;
pub mod format;
pub mod model;
pub mod pipeline;
pub mod session;

// Re-export commonly used types
pub use crate::data::HistoricalSeries;
pub use crate::error::ForecastError;
pub use crate::events::PriceEvent;
pub use crate::format::ForecastTable;
pub use crate::model::{Prediction, PretrainedModel, PriceModel};
pub use crate::pipeline::{forecast, ForecastResult, Horizon};
pub use crate::session::Session;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
