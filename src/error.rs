//! Error types shared across the planner.

use thiserror::Error;

use crate::io::load::LoadError;

/// Forecast or parameter problems detected before a model is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// The production series has no days at all.
    #[error("forecast horizon is empty")]
    EmptyHorizon,
    /// Days are 1-indexed; day 0 is never valid.
    #[error("{series} series contains day 0 (days are 1-indexed)")]
    ZeroDay { series: &'static str },
    /// A day inside `1..=horizon` has no value.
    #[error("{series} series is missing day {day}")]
    MissingDay { series: &'static str, day: usize },
    /// A series extends past the production horizon.
    #[error("{series} series has day {day} beyond horizon {horizon}")]
    DayBeyondHorizon {
        series: &'static str,
        day: usize,
        horizon: usize,
    },
    #[error("{series} value for day {day} is not finite")]
    NonFinite { series: &'static str, day: usize },
    #[error("{series} value for day {day} must be >= 0, got {value}")]
    Negative {
        series: &'static str,
        day: usize,
        value: f64,
    },
    /// Availability was built for a different horizon than the forecast.
    #[error("availability covers {found} days but forecast horizon is {expected}")]
    AvailabilityMismatch { expected: usize, found: usize },
    #[error("{name} must be > 0, got {value}")]
    NonPositiveParameter { name: &'static str, value: f64 },
}

/// Failure of a planning run, before any solving engine result exists.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Load(#[from] LoadError),
}
