use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};

use super::calendar::{CalendarRow, build_calendar};
use super::kpi::PlanSummary;
use crate::error::PlanError;
use crate::forecast::{Availability, DayRange, ForecastSet};
use crate::model::{PlanOutcome, PlantParams, build, interpret};
use crate::solver::SolvingEngine;

/// A named set of days on which no maintenance window may start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub name: String,
    /// Inclusive blackout ranges; days outside the horizon are ignored.
    #[serde(default)]
    pub blackouts: Vec<DayRange>,
}

impl Scenario {
    /// A scenario in which every day may start a window.
    pub fn unconstrained(name: &str) -> Self {
        Self {
            name: name.to_string(),
            blackouts: Vec::new(),
        }
    }

    pub fn availability(&self, horizon: usize) -> Availability {
        Availability::with_blackouts(horizon, &self.blackouts)
    }
}

/// Everything produced by planning one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub horizon: usize,
    /// Days on which no window may start.
    pub blocked_days: usize,
    pub outcome: PlanOutcome,
    /// Economic breakdown; absent when no schedule was found.
    pub summary: Option<PlanSummary>,
    #[serde(skip)]
    pub calendar: Vec<CalendarRow>,
}

impl ScenarioReport {
    pub fn is_scheduled(&self) -> bool {
        self.outcome.solution().is_some()
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Scenario: {} ===", self.name)?;
        writeln!(
            f,
            "Horizon: {} days ({} blocked for window starts)",
            self.horizon, self.blocked_days
        )?;
        write!(f, "{}", self.outcome)?;
        if let Some(summary) = &self.summary {
            write!(f, "\n\n{summary}")?;
        }
        Ok(())
    }
}

/// Plans one scenario: build, solve, interpret, summarize.
///
/// # Errors
///
/// Returns [`PlanError::Data`] for invalid plant parameters; the engine is
/// not called in that case. A scenario without a schedule is not an error.
pub fn run_scenario<E: SolvingEngine + ?Sized>(
    forecast: &ForecastSet,
    scenario: &Scenario,
    params: &PlantParams,
    engine: &E,
) -> Result<ScenarioReport, PlanError> {
    let _span = info_span!("scenario", name = %scenario.name).entered();
    params.validate()?;

    let availability = scenario.availability(forecast.horizon());
    let model = build(forecast, &availability, params)?;

    let started = Instant::now();
    let result = engine.solve(model.program());
    debug!(
        engine = engine.name(),
        status = %result.status,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "solve returned"
    );

    let outcome = interpret(&model, &result);
    let summary = outcome
        .solution()
        .map(|s| PlanSummary::from_solution(forecast, params, s));
    let calendar = build_calendar(forecast, &availability, params, &outcome);

    match outcome.solution() {
        Some(s) => info!(
            strategy = %s.strategy,
            profit = s.rounded_profit(),
            "scenario scheduled"
        ),
        None => warn!(status = %outcome.status(), "scenario has no schedule"),
    }

    Ok(ScenarioReport {
        name: scenario.name.clone(),
        horizon: forecast.horizon(),
        blocked_days: availability.blocked_days().len(),
        outcome,
        summary,
        calendar,
    })
}

/// Plans each scenario independently, in the given order.
///
/// # Errors
///
/// Stops at the first scenario that fails with a [`PlanError`].
pub fn run_all<E: SolvingEngine + ?Sized>(
    forecast: &ForecastSet,
    scenarios: &[Scenario],
    params: &PlantParams,
    engine: &E,
) -> Result<Vec<ScenarioReport>, PlanError> {
    scenarios
        .iter()
        .map(|scenario| run_scenario(forecast, scenario, params, engine))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::DataError;
    use crate::forecast::DayForecast;
    use crate::model::BinaryProgram;
    use crate::solver::{MicroLpEngine, SolveResult, SolverStatus};

    /// Records calls and reports infeasibility.
    struct SpyEngine {
        calls: Cell<usize>,
    }

    impl SolvingEngine for SpyEngine {
        fn solve(&self, _program: &BinaryProgram) -> SolveResult {
            self.calls.set(self.calls.get() + 1);
            SolveResult::without_assignment(SolverStatus::Infeasible)
        }

        fn name(&self) -> &str {
            "spy"
        }
    }

    fn uniform(horizon: usize) -> ForecastSet {
        ForecastSet::from_days(vec![
            DayForecast {
                production: 1.0,
                price: 10.0,
                maintenance_coeff: 1.0,
            };
            horizon
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
    fn invalid_params_never_reach_engine() {
        let spy = SpyEngine {
            calls: Cell::new(0),
        };
        let bad = PlantParams {
            capacity: 0.0,
            fixed_cost: 500.0,
        };
        let err = run_scenario(&uniform(10), &Scenario::unconstrained("x"), &bad, &spy)
            .expect_err("must fail");
        assert!(matches!(
            err,
            PlanError::Data(DataError::NonPositiveParameter { .. })
        ));
        assert_eq!(spy.calls.get(), 0);
    }

    #[test]
    fn infeasible_engine_is_reported_not_fatal() {
        let spy = SpyEngine {
            calls: Cell::new(0),
        };
        let report = run_scenario(&uniform(10), &Scenario::unconstrained("x"), &params(), &spy)
            .expect("report");
        assert_eq!(spy.calls.get(), 1);
        assert!(!report.is_scheduled());
        assert!(report.summary.is_none());
        assert_eq!(report.calendar.len(), 10);
        assert!(
            report
                .to_string()
                .contains("No feasible solution or solver error.")
        );
    }

    #[test]
    fn run_all_keeps_order_and_independence() {
        let scenarios = vec![
            Scenario::unconstrained("open"),
            Scenario {
                name: "closed".to_string(),
                blackouts: vec![DayRange::new(1, 10)],
            },
            Scenario::unconstrained("open_again"),
        ];
        let reports =
            run_all(&uniform(10), &scenarios, &params(), &MicroLpEngine).expect("reports");
        let names: Vec<_> = reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["open", "closed", "open_again"]);
        assert!(reports[0].is_scheduled());
        assert!(!reports[1].is_scheduled());
        assert_eq!(reports[1].blocked_days, 10);
        assert_eq!(reports[0].outcome, reports[2].outcome);
    }

    #[test]
    fn report_display_has_header_and_summary() {
        let report = run_scenario(
            &uniform(10),
            &Scenario::unconstrained("open"),
            &params(),
            &MicroLpEngine,
        )
        .expect("report");
        let text = report.to_string();
        assert!(text.starts_with("=== Scenario: open ==="));
        assert!(text.contains("Total profit: 1300.00"));
        assert!(text.contains("Net profit:            1300.00"));
    }
}
