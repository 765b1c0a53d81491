//! Per-day forecast data consumed by the model builder.

pub mod availability;
pub mod synthetic;

use std::collections::BTreeMap;
use std::ops::Bound;

use serde::Serialize;

use crate::error::DataError;

pub use availability::{Availability, DayRange};
pub use synthetic::SyntheticForecast;

/// Forecast values for a single day of the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayForecast {
    /// Expected capacity utilization factor (>= 0).
    pub production: f64,
    /// Electricity price.
    pub price: f64,
    /// Multiplier applied to the fixed maintenance cost (>= 0).
    pub maintenance_coeff: f64,
}

/// Validated forecast covering the contiguous horizon `1..=horizon`.
///
/// Construction is the only place where data errors are raised; once a
/// `ForecastSet` exists every day has all three values.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSet {
    days: Vec<DayForecast>,
}

impl ForecastSet {
    /// Builds a forecast from three day-keyed series.
    ///
    /// The horizon is the largest day present in `production`. Every day in
    /// `1..=horizon` must appear in all three series and no series may
    /// extend past it.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] for an empty horizon, day 0, gaps, days past
    /// the horizon, non-finite values or negative production/coefficients.
    pub fn from_series(
        production: &BTreeMap<usize, f64>,
        price: &BTreeMap<usize, f64>,
        maintenance_coeff: &BTreeMap<usize, f64>,
    ) -> Result<Self, DataError> {
        let horizon = production
            .keys()
            .next_back()
            .copied()
            .ok_or(DataError::EmptyHorizon)?;
        if horizon == 0 {
            return Err(DataError::ZeroDay {
                series: "production",
            });
        }

        let production = dense_series("production", production, horizon)?;
        let price = dense_series("price", price, horizon)?;
        let maintenance_coeff = dense_series("maintenance_coeff", maintenance_coeff, horizon)?;

        let days = production
            .into_iter()
            .zip(price)
            .zip(maintenance_coeff)
            .map(|((production, price), maintenance_coeff)| DayForecast {
                production,
                price,
                maintenance_coeff,
            })
            .collect();
        Self::from_days(days)
    }

    /// Builds a forecast from values for days `1..=days.len()` in order.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] if `days` is empty or a value is non-finite or
    /// negative where a non-negative value is required.
    pub fn from_days(days: Vec<DayForecast>) -> Result<Self, DataError> {
        if days.is_empty() {
            return Err(DataError::EmptyHorizon);
        }
        for (i, d) in days.iter().enumerate() {
            let day = i + 1;
            check_finite("production", day, d.production)?;
            check_finite("price", day, d.price)?;
            check_finite("maintenance_coeff", day, d.maintenance_coeff)?;
            check_non_negative("production", day, d.production)?;
            check_non_negative("maintenance_coeff", day, d.maintenance_coeff)?;
        }
        Ok(Self { days })
    }

    /// Number of days `T` in the horizon.
    pub fn horizon(&self) -> usize {
        self.days.len()
    }

    /// Forecast for a 1-indexed day, or `None` outside the horizon.
    pub fn day(&self, day: usize) -> Option<&DayForecast> {
        day.checked_sub(1).and_then(|i| self.days.get(i))
    }

    /// Iterates `(day, forecast)` pairs in day order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &DayForecast)> {
        self.days.iter().enumerate().map(|(i, d)| (i + 1, d))
    }
}

fn dense_series(
    series: &'static str,
    values: &BTreeMap<usize, f64>,
    horizon: usize,
) -> Result<Vec<f64>, DataError> {
    if values.contains_key(&0) {
        return Err(DataError::ZeroDay { series });
    }
    if let Some((&day, _)) = values
        .range((Bound::Excluded(horizon), Bound::Unbounded))
        .next()
    {
        return Err(DataError::DayBeyondHorizon {
            series,
            day,
            horizon,
        });
    }
    (1..=horizon)
        .map(|day| {
            values
                .get(&day)
                .copied()
                .ok_or(DataError::MissingDay { series, day })
        })
        .collect()
}

fn check_finite(series: &'static str, day: usize, value: f64) -> Result<(), DataError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DataError::NonFinite { series, day })
    }
}

fn check_non_negative(series: &'static str, day: usize, value: f64) -> Result<(), DataError> {
    if value < 0.0 {
        return Err(DataError::Negative { series, day, value });
    }
    Ok(())
}
