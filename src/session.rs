//! Per-session request/response state.
//!
//! The dashboard re-renders on every interaction; this state is what
//! survives between renders. Each forecast request replaces the cached
//! result wholesale, never updating it in place.

use crate::data::HistoricalSeries;
use crate::error::{ForecastError, Result};
use crate::events::PriceEvent;
use crate::format::ForecastTable;
use crate::model::PretrainedModel;
use crate::pipeline::{self, ForecastResult, Horizon};
use chrono::NaiveDate;
use log::{info, warn};

/// State owned by one dashboard session
#[derive(Debug, Default)]
pub struct Session {
    last_horizon: Option<Horizon>,
    last_result: Option<ForecastResult>,
    date_range: Option<(NaiveDate, NaiveDate)>,
    selected_event: Option<PriceEvent>,
}

impl Session {
    /// Fresh session with nothing cached
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a forecast request with the raw horizon text the user typed.
    ///
    /// Invalid input is rejected before the pipeline runs and leaves the
    /// session untouched. A prediction failure is surfaced to the caller
    /// and the previously cached result is retained.
    pub fn request_forecast<M: PretrainedModel>(
        &mut self,
        model: &M,
        raw_horizon: &str,
    ) -> Result<&ForecastResult> {
        let horizon = Horizon::parse(raw_horizon)?;
        self.run_forecast(model, horizon)
    }

    /// Handle a forecast request with an already-validated horizon
    pub fn run_forecast<M: PretrainedModel>(
        &mut self,
        model: &M,
        horizon: Horizon,
    ) -> Result<&ForecastResult> {
        match pipeline::forecast(model, horizon) {
            Ok(result) => {
                info!("Forecast for {} days cached in session", horizon);
                self.last_horizon = Some(horizon);
                Ok(self.last_result.insert(result))
            }
            Err(err) => {
                warn!("Forecast request failed, previous result kept: {}", err);
                Err(err)
            }
        }
    }

    /// Handle a date-range selection for the historical view.
    ///
    /// The range is clamped to the series bounds. An inverted range, or one
    /// with no overlap with the series at all, is rejected and the previous
    /// selection is kept.
    pub fn select_range(
        &mut self,
        series: &HistoricalSeries,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<()> {
        if start > end {
            return Err(ForecastError::Data(format!(
                "Invalid date range: {} is after {}",
                start, end
            )));
        }

        let clamped_start = start.max(series.min_date());
        let clamped_end = end.min(series.max_date());
        if clamped_start > clamped_end {
            return Err(ForecastError::Data(format!(
                "No historical data between {} and {}",
                start, end
            )));
        }

        self.date_range = Some((clamped_start, clamped_end));
        Ok(())
    }

    /// Handle an event selection for the chart highlight
    pub fn select_event(&mut self, event: PriceEvent) {
        self.selected_event = Some(event);
    }

    /// Clear the event highlight
    pub fn clear_event(&mut self) {
        self.selected_event = None;
    }

    /// The horizon of the last successful forecast, if any
    pub fn last_horizon(&self) -> Option<Horizon> {
        self.last_horizon
    }

    /// The cached forecast from the last successful request, if any
    pub fn forecast(&self) -> Option<&ForecastResult> {
        self.last_result.as_ref()
    }

    /// Display table for the cached forecast, if any
    pub fn forecast_table(&self) -> Option<ForecastTable> {
        self.last_result.as_ref().map(ForecastTable::from_result)
    }

    /// The selected display range, if any
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.date_range
    }

    /// The selected chart-highlight event, if any
    pub fn selected_event(&self) -> Option<PriceEvent> {
        self.selected_event
    }
}
