//! Maintenance-shutdown planner for a single production plant.
//!
//! Chooses between one 5-day window and a 3-day + 2-day pair by solving a
//! small binary program over a daily production and price forecast.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod error;
pub mod forecast;
pub mod io;
/// Decision model formulation and solution interpretation.
pub mod model;
pub mod plan;
pub mod solver;
