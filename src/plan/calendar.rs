use serde::Serialize;

use crate::forecast::{Availability, ForecastSet};
use crate::model::{PlanOutcome, PlantParams, WindowKind};

/// One day of a scenario's maintenance calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarRow {
    pub day: usize,
    /// Whether a window may start on this day.
    pub available: bool,
    pub under_maintenance: bool,
    /// Window covering the day, if any.
    pub window: Option<WindowKind>,
    pub production: f64,
    pub price: f64,
    pub maintenance_coeff: f64,
    /// Revenue earned (zero on maintenance days).
    pub revenue: f64,
    /// Maintenance cost incurred (zero on operating days).
    pub maintenance_cost: f64,
}

/// Builds the per-day calendar for a scenario.
///
/// Without a solution every day is reported as operating.
pub fn build_calendar(
    forecast: &ForecastSet,
    availability: &Availability,
    params: &PlantParams,
    outcome: &PlanOutcome,
) -> Vec<CalendarRow> {
    let horizon = forecast.horizon();
    let solution = outcome.solution();

    forecast
        .iter()
        .map(|(day, f)| {
            let under_maintenance =
                solution.is_some_and(|s| s.maintenance_days.binary_search(&day).is_ok());
            let window = solution.and_then(|s| {
                s.windows
                    .iter()
                    .find(|w| w.days(horizon).contains(&day))
                    .map(|w| w.kind)
            });
            let revenue = params.day_revenue(f.production, f.price);
            let cost = params.day_maintenance_cost(f.maintenance_coeff);
            CalendarRow {
                day,
                available: availability.is_available(day),
                under_maintenance,
                window,
                production: f.production,
                price: f.price,
                maintenance_coeff: f.maintenance_coeff,
                revenue: if under_maintenance { 0.0 } else { revenue },
                maintenance_cost: if under_maintenance { cost } else { 0.0 },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{DayForecast, DayRange};
    use crate::model::{MaintenanceWindow, Solution, Strategy};
    use crate::solver::SolverStatus;

    fn forecast() -> ForecastSet {
        ForecastSet::from_days(vec![
            DayForecast {
                production: 1.0,
                price: 10.0,
                maintenance_coeff: 2.0,
            };
            8
        ])
        .expect("forecast")
    }

    fn params() -> PlantParams {
        PlantParams {
            capacity: 20.0,
            fixed_cost: 500.0,
        }
    }

    #[test]
    fn marks_window_days() {
        let outcome = PlanOutcome::Scheduled(Solution {
            strategy: Strategy::SingleWindow,
            windows: vec![MaintenanceWindow {
                kind: WindowKind::FiveDay,
                start_day: 2,
            }],
            maintenance_days: vec![2, 3, 4, 5, 6],
            total_profit: 0.0,
            status: SolverStatus::Optimal,
        });
        let availability = Availability::with_blackouts(8, &[DayRange::new(7, 8)]);
        let rows = build_calendar(&forecast(), &availability, &params(), &outcome);

        assert_eq!(rows.len(), 8);
        assert!(!rows[0].under_maintenance);
        assert_eq!(rows[0].revenue, 200.0);
        assert!(rows[1].under_maintenance);
        assert_eq!(rows[1].window, Some(WindowKind::FiveDay));
        assert_eq!(rows[1].revenue, 0.0);
        assert_eq!(rows[1].maintenance_cost, 1000.0);
        assert!(!rows[6].available);
        assert_eq!(rows[6].window, None);
    }

    #[test]
    fn no_solution_is_all_operating() {
        let outcome = PlanOutcome::NoSolution {
            status: SolverStatus::Infeasible,
        };
        let rows = build_calendar(&forecast(), &Availability::full(8), &params(), &outcome);
        assert!(rows.iter().all(|r| !r.under_maintenance && r.window.is_none()));
    }
}
