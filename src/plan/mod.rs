//! Scenario planning: runs the model for each availability scenario and
//! collects reports, summaries and calendars.

pub mod calendar;
pub mod kpi;
pub mod runner;

pub use calendar::{CalendarRow, build_calendar};
pub use kpi::PlanSummary;
pub use runner::{Scenario, ScenarioReport, run_all, run_scenario};
