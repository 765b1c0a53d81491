//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use maintenance_planner::forecast::{DayForecast, ForecastSet};
use maintenance_planner::model::PlantParams;

/// Default plant (capacity 20, fixed cost 500).
pub fn default_params() -> PlantParams {
    PlantParams {
        capacity: 20.0,
        fixed_cost: 500.0,
    }
}

/// Forecast with the same production, price and coefficient every day.
pub fn uniform_forecast(horizon: usize, production: f64, price: f64, coeff: f64) -> ForecastSet {
    ForecastSet::from_days(vec![
        DayForecast {
            production,
            price,
            maintenance_coeff: coeff,
        };
        horizon
    ])
    .expect("uniform forecast should be valid")
}

/// Forecast built day by day from `(price, coeff)` with unit production.
pub fn priced_forecast(horizon: usize, day: impl Fn(usize) -> (f64, f64)) -> ForecastSet {
    ForecastSet::from_days(
        (1..=horizon)
            .map(|d| {
                let (price, maintenance_coeff) = day(d);
                DayForecast {
                    production: 1.0,
                    price,
                    maintenance_coeff,
                }
            })
            .collect(),
    )
    .expect("priced forecast should be valid")
}

/// Absolute-tolerance float comparison.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
