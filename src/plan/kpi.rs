//! Post-hoc economic summary of a schedule.

use std::fmt;

use serde::Serialize;

use crate::forecast::ForecastSet;
use crate::model::{PlantParams, Solution};

/// Revenue and cost breakdown of a schedule, recomputed from the forecast.
///
/// `profit` equals the model objective at the same assignment, which makes
/// the summary a cross-check of the interpreted solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    /// Days the plant runs.
    pub operating_days: usize,
    /// Days under maintenance inside the horizon.
    pub maintenance_days: usize,
    /// Revenue earned on operating days.
    pub revenue: f64,
    /// Revenue the maintenance days would have earned.
    pub forfeited_revenue: f64,
    /// Coefficient-weighted fixed cost over maintenance days.
    pub maintenance_cost: f64,
    /// `revenue - maintenance_cost`.
    pub profit: f64,
}

impl PlanSummary {
    pub fn from_solution(forecast: &ForecastSet, params: &PlantParams, solution: &Solution) -> Self {
        let mut revenue = 0.0;
        let mut forfeited_revenue = 0.0;
        let mut maintenance_cost = 0.0;
        let mut maintenance_days = 0_usize;

        for (day, f) in forecast.iter() {
            let day_revenue = params.day_revenue(f.production, f.price);
            if solution.maintenance_days.binary_search(&day).is_ok() {
                maintenance_days += 1;
                forfeited_revenue += day_revenue;
                maintenance_cost += params.day_maintenance_cost(f.maintenance_coeff);
            } else {
                revenue += day_revenue;
            }
        }

        Self {
            operating_days: forecast.horizon() - maintenance_days,
            maintenance_days,
            revenue,
            forfeited_revenue,
            maintenance_cost,
            profit: revenue - maintenance_cost,
        }
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Plan Summary ---")?;
        writeln!(
            f,
            "Operating days:        {} ({} under maintenance)",
            self.operating_days, self.maintenance_days
        )?;
        writeln!(f, "Revenue:               {:.2}", self.revenue)?;
        writeln!(f, "Forfeited revenue:     {:.2}", self.forfeited_revenue)?;
        writeln!(f, "Maintenance cost:      {:.2}", self.maintenance_cost)?;
        write!(f, "Net profit:            {:.2}", self.profit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::DayForecast;
    use crate::model::{MaintenanceWindow, Strategy, WindowKind};
    use crate::solver::SolverStatus;

    fn forecast() -> ForecastSet {
        ForecastSet::from_days(
            (1..=6)
                .map(|d| DayForecast {
                    production: 1.0,
                    price: d as f64,
                    maintenance_coeff: 0.5,
                })
                .collect(),
        )
        .expect("forecast")
    }

    #[test]
    fn splits_revenue_and_cost() {
        let params = PlantParams {
            capacity: 10.0,
            fixed_cost: 100.0,
        };
        let solution = Solution {
            strategy: Strategy::SplitWindows,
            windows: vec![
                MaintenanceWindow {
                    kind: WindowKind::ThreeDay,
                    start_day: 4,
                },
                MaintenanceWindow {
                    kind: WindowKind::TwoDay,
                    start_day: 1,
                },
            ],
            maintenance_days: vec![1, 2, 4, 5, 6],
            total_profit: 30.0 - 250.0,
            status: SolverStatus::Optimal,
        };
        let s = PlanSummary::from_solution(&forecast(), &params, &solution);
        assert_eq!(s.maintenance_days, 5);
        assert_eq!(s.operating_days, 1);
        assert_eq!(s.revenue, 30.0);
        assert_eq!(s.forfeited_revenue, 10.0 + 20.0 + 40.0 + 50.0 + 60.0);
        assert_eq!(s.maintenance_cost, 250.0);
        assert_eq!(s.profit, solution.total_profit);
    }

    #[test]
    fn display_lists_profit() {
        let params = PlantParams {
            capacity: 1.0,
            fixed_cost: 1.0,
        };
        let solution = Solution {
            strategy: Strategy::SingleWindow,
            windows: Vec::new(),
            maintenance_days: Vec::new(),
            total_profit: 0.0,
            status: SolverStatus::Optimal,
        };
        let text = PlanSummary::from_solution(&forecast(), &params, &solution).to_string();
        assert!(text.contains("Net profit:            21.00"));
    }
}
