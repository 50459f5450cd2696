//! Forecast-on-demand pipeline: extend the model's date index, predict,
//! select the trailing window

use crate::error::{ForecastError, Result};
use crate::model::{Prediction, PretrainedModel};
use log::debug;

/// Validated forecast horizon: a positive count of future calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon(u32);

impl Horizon {
    /// Create a horizon, rejecting non-positive day counts
    pub fn new(days: i64) -> Result<Self> {
        if days < 1 {
            return Err(ForecastError::InvalidHorizon(format!(
                "Horizon must be at least 1 day, got {}",
                days
            )));
        }
        if days > u32::MAX as i64 {
            return Err(ForecastError::InvalidHorizon(format!(
                "Horizon of {} days is out of range",
                days
            )));
        }
        Ok(Self(days as u32))
    }

    /// Parse a horizon from raw user input
    pub fn parse(raw: &str) -> Result<Self> {
        let days: i64 = raw.trim().parse().map_err(|_| {
            ForecastError::InvalidHorizon(format!(
                "Horizon must be a whole number of days, got '{}'",
                raw.trim()
            ))
        })?;
        Self::new(days)
    }

    /// Number of future days requested
    pub fn days(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Forecast result: predictions for the model's full extended date index
/// plus the horizon that produced them.
///
/// Only the trailing `horizon` rows are ever presented; the rest of the
/// sequence backs the chart view.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    /// Predictions for the full extended date index
    points: Vec<Prediction>,
    /// Horizon the forecast was requested for
    horizon: Horizon,
}

impl ForecastResult {
    /// Wrap a prediction sequence, checking the presentation invariants
    pub fn new(points: Vec<Prediction>, horizon: Horizon) -> Result<Self> {
        if points.len() < horizon.days() {
            return Err(ForecastError::Prediction(format!(
                "Prediction length ({}) is shorter than the horizon ({})",
                points.len(),
                horizon
            )));
        }
        if !points.windows(2).all(|w| w[0].date < w[1].date) {
            return Err(ForecastError::Prediction(
                "Prediction dates are not strictly ascending".to_string(),
            ));
        }

        Ok(Self { points, horizon })
    }

    /// The horizon this forecast was requested for
    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    /// Predictions for the full extended date index
    pub fn points(&self) -> &[Prediction] {
        &self.points
    }

    /// Number of predicted points in the full sequence
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the sequence is empty (never true for a constructed result)
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The last `horizon` rows: exactly the newly extended future dates,
    /// chronologically ascending
    pub fn trailing_window(&self) -> &[Prediction] {
        &self.points[self.points.len() - self.horizon.days()..]
    }

    /// The trailing rows shown on the forecast chart: three horizons of
    /// context, capped at the full sequence
    pub fn chart_window(&self) -> &[Prediction] {
        let rows = (3 * self.horizon.days()).min(self.points.len());
        &self.points[self.points.len() - rows..]
    }
}

/// Produce a forecast for `horizon` days past the model's known history.
///
/// Deterministic for a fixed model and horizon: the model is evaluated,
/// not re-fit. A failing predict step surfaces as a `Prediction` error for
/// this request only; nothing is retried.
pub fn forecast<M: PretrainedModel>(model: &M, horizon: Horizon) -> Result<ForecastResult> {
    let dates = model.extend_horizon(horizon);
    debug!(
        "Forecasting {} days past {} ({} dates total)",
        horizon,
        model.last_history_date(),
        dates.len()
    );

    let points = model.predict(&dates)?;
    ForecastResult::new(points, horizon)
}
