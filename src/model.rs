//! Pre-trained price model: deserialized trend + seasonality parameters

use crate::error::{ForecastError, Result};
use crate::pipeline::Horizon;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt::Debug;

/// A single predicted point with uncertainty bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// Date of the prediction
    pub date: NaiveDate,
    /// Point prediction
    pub yhat: f64,
    /// Lower uncertainty bound
    pub yhat_lower: f64,
    /// Upper uncertainty bound
    pub yhat_upper: f64,
}

/// Piecewise-linear trend parameters, normalized to [0, 1] time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendParams {
    /// Base growth rate
    pub k: f64,
    /// Trend offset
    pub m: f64,
    /// Changepoint locations in normalized time
    pub changepoints_t: Vec<f64>,
    /// Rate adjustments at each changepoint
    pub deltas: Vec<f64>,
}

/// One seasonality block: Fourier terms over a fixed period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seasonality {
    /// Name of the component (e.g. "weekly", "yearly")
    pub name: String,
    /// Period length in days
    pub period_days: f64,
    /// Number of Fourier terms
    pub fourier_order: usize,
    /// Coefficients, two per term (cos, sin)
    pub beta: Vec<f64>,
}

/// Pre-trained forecasting model reconstructed from a serialized artifact.
///
/// The model is evaluated, never re-fit: prediction is a deterministic
/// function of the fitted parameters and the requested dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceModel {
    /// Name of the model
    name: String,
    /// First date of the training history (time origin)
    start_date: NaiveDate,
    /// Last date the model has seen
    last_history_date: NaiveDate,
    /// The model's known date index
    history_dates: Vec<NaiveDate>,
    /// Days between start and last history date (time normalization scale)
    t_scale_days: f64,
    /// Price scale used to denormalize predictions
    y_scale: f64,
    /// Trend parameters
    trend: TrendParams,
    /// Seasonality components
    seasonalities: Vec<Seasonality>,
    /// Observation noise scale, used for uncertainty bounds
    sigma_obs: f64,
}

/// Seam between the forecast pipeline and whatever model backs it.
///
/// Implementations must be read-only: `predict` evaluates the model and
/// never mutates it.
pub trait PretrainedModel: Debug {
    /// Name of the model
    fn name(&self) -> &str;

    /// Last date covered by the model's training history
    fn last_history_date(&self) -> NaiveDate;

    /// The model's full known date index plus `horizon` consecutive calendar
    /// days strictly after the last history date
    fn extend_horizon(&self, horizon: Horizon) -> Vec<NaiveDate>;

    /// Point predictions (with uncertainty bounds) for every date in `dates`
    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<Prediction>>;
}

impl PriceModel {
    /// Build a model from fitted parameters, validating the schema.
    ///
    /// The last history date is taken from the end of `history_dates`.
    pub fn new(
        name: impl Into<String>,
        start_date: NaiveDate,
        history_dates: Vec<NaiveDate>,
        t_scale_days: f64,
        y_scale: f64,
        trend: TrendParams,
        seasonalities: Vec<Seasonality>,
        sigma_obs: f64,
    ) -> Result<Self> {
        let last_history_date = *history_dates.last().ok_or_else(|| {
            ForecastError::Deserialization("Model history is empty".to_string())
        })?;

        let model = Self {
            name: name.into(),
            start_date,
            last_history_date,
            history_dates,
            t_scale_days,
            y_scale,
            trend,
            seasonalities,
            sigma_obs,
        };
        model.validate()?;
        Ok(model)
    }

    /// Check schema invariants after deserialization.
    ///
    /// A violation means the artifact is incompatible with the expected
    /// schema, which the loader reports as a deserialization failure.
    pub fn validate(&self) -> Result<()> {
        if !(self.t_scale_days > 0.0) || !self.t_scale_days.is_finite() {
            return Err(ForecastError::Deserialization(
                "Time scale must be a positive finite number".to_string(),
            ));
        }
        if !(self.y_scale > 0.0) || !self.y_scale.is_finite() {
            return Err(ForecastError::Deserialization(
                "Price scale must be a positive finite number".to_string(),
            ));
        }
        if self.sigma_obs < 0.0 || !self.sigma_obs.is_finite() {
            return Err(ForecastError::Deserialization(
                "Observation noise must be non-negative".to_string(),
            ));
        }
        if self.trend.changepoints_t.len() != self.trend.deltas.len() {
            return Err(ForecastError::Deserialization(format!(
                "Changepoint count ({}) doesn't match delta count ({})",
                self.trend.changepoints_t.len(),
                self.trend.deltas.len()
            )));
        }
        for seasonality in &self.seasonalities {
            if seasonality.period_days <= 0.0 {
                return Err(ForecastError::Deserialization(format!(
                    "Seasonality '{}' has non-positive period",
                    seasonality.name
                )));
            }
            if seasonality.beta.len() != 2 * seasonality.fourier_order {
                return Err(ForecastError::Deserialization(format!(
                    "Seasonality '{}' has {} coefficients, expected {}",
                    seasonality.name,
                    seasonality.beta.len(),
                    2 * seasonality.fourier_order
                )));
            }
        }
        if self.history_dates.is_empty() {
            return Err(ForecastError::Deserialization(
                "Model history is empty".to_string(),
            ));
        }
        if !self.history_dates.windows(2).all(|w| w[0] < w[1]) {
            return Err(ForecastError::Deserialization(
                "Model history dates are not strictly ascending".to_string(),
            ));
        }
        if *self.history_dates.last().unwrap() != self.last_history_date {
            return Err(ForecastError::Deserialization(
                "Last history date doesn't match the end of the history index".to_string(),
            ));
        }
        if self.history_dates[0] < self.start_date {
            return Err(ForecastError::Deserialization(
                "History starts before the model's time origin".to_string(),
            ));
        }
        Ok(())
    }

    /// Normalized time for a date: days since the origin over the time scale
    fn t_normalized(&self, date: NaiveDate) -> f64 {
        (date - self.start_date).num_days() as f64 / self.t_scale_days
    }

    /// Piecewise-linear trend at normalized time `t`
    fn trend_at(&self, t: f64) -> f64 {
        let mut rate = self.trend.k;
        let mut offset = self.trend.m;
        for (&cp, &delta) in self.trend.changepoints_t.iter().zip(&self.trend.deltas) {
            if t >= cp {
                rate += delta;
                offset -= cp * delta;
            }
        }
        rate * t + offset
    }

    /// Sum of all seasonal components at a date
    fn seasonal_at(&self, date: NaiveDate) -> f64 {
        let x = (date - self.start_date).num_days() as f64;
        let mut total = 0.0;
        for seasonality in &self.seasonalities {
            for i in 1..=seasonality.fourier_order {
                let arg = 2.0 * PI * i as f64 * x / seasonality.period_days;
                total += seasonality.beta[2 * (i - 1)] * arg.cos();
                total += seasonality.beta[2 * (i - 1) + 1] * arg.sin();
            }
        }
        total
    }

    /// Evaluate the model at a single date
    fn predict_one(&self, date: NaiveDate) -> Prediction {
        let t = self.t_normalized(date);
        let yhat = (self.trend_at(t) + self.seasonal_at(date)) * self.y_scale;

        // Bounds widen with distance past the known history
        let days_beyond = (date - self.last_history_date).num_days().max(0) as f64;
        let margin =
            1.96 * self.sigma_obs * self.y_scale * (1.0 + days_beyond / self.t_scale_days).sqrt();

        Prediction {
            date,
            yhat,
            yhat_lower: yhat - margin,
            yhat_upper: yhat + margin,
        }
    }
}

impl PretrainedModel for PriceModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn last_history_date(&self) -> NaiveDate {
        self.last_history_date
    }

    fn extend_horizon(&self, horizon: Horizon) -> Vec<NaiveDate> {
        let mut dates = self.history_dates.clone();
        dates.reserve(horizon.days());
        let mut current = self.last_history_date;
        for _ in 0..horizon.days() {
            current = current + Duration::days(1);
            dates.push(current);
        }
        dates
    }

    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<Prediction>> {
        if dates.is_empty() {
            return Err(ForecastError::Prediction(
                "Future date index is empty".to_string(),
            ));
        }
        if !dates.windows(2).all(|w| w[0] < w[1]) {
            return Err(ForecastError::Prediction(
                "Future date index is not strictly ascending".to_string(),
            ));
        }

        Ok(dates.iter().map(|&d| self.predict_one(d)).collect())
    }
}
