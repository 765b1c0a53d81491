//! Translation of a solved assignment back into a maintenance schedule.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use super::builder::DecisionModel;
use super::program::VarId;
use super::window::{MaintenanceWindow, Strategy, WindowKind};
use crate::solver::{Assignment, SolveResult, SolverStatus};

/// Solved values strictly above this are read as 1.
pub const SELECTION_THRESHOLD: f64 = 0.5;

fn is_selected(value: f64) -> bool {
    value > SELECTION_THRESHOLD
}

/// Schedule read from a usable solver assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub strategy: Strategy,
    /// One window for the single strategy, 3-day then 2-day for the split one.
    pub windows: Vec<MaintenanceWindow>,
    /// Days whose `maintenance` variable is selected, ascending.
    pub maintenance_days: Vec<usize>,
    /// Objective value at the assignment, unrounded.
    pub total_profit: f64,
    pub status: SolverStatus,
}

impl Solution {
    /// Profit rounded to two decimals for display.
    pub fn rounded_profit(&self) -> f64 {
        (self.total_profit * 100.0).round() / 100.0
    }

    pub fn window(&self, kind: WindowKind) -> Option<&MaintenanceWindow> {
        self.windows.iter().find(|w| w.kind == kind)
    }
}

/// Result of interpreting one solve call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PlanOutcome {
    Scheduled(Solution),
    NoSolution { status: SolverStatus },
}

impl PlanOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Scheduled(s) => Some(s),
            Self::NoSolution { .. } => None,
        }
    }

    pub fn status(&self) -> &SolverStatus {
        match self {
            Self::Scheduled(s) => &s.status,
            Self::NoSolution { status } => status,
        }
    }
}

impl fmt::Display for PlanOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let solution = match self {
            Self::Scheduled(s) => s,
            Self::NoSolution { .. } => return write!(f, "No feasible solution or solver error."),
        };
        match solution.status {
            SolverStatus::Optimal => writeln!(f, "Optimal solution found.")?,
            _ => writeln!(f, "Feasible solution found ({}).", solution.status)?,
        }
        writeln!(f, "Chosen strategy: {}.", solution.strategy)?;
        // calendar order
        let mut windows: Vec<&MaintenanceWindow> = solution.windows.iter().collect();
        windows.sort_by_key(|w| w.start_day);
        for w in windows {
            writeln!(f, "{} window starts on day {}", w.kind, w.start_day)?;
        }
        write!(f, "Total profit: {:.2}", solution.rounded_profit())
    }
}

/// Reads strategy, window starts and profit from a solve result.
///
/// Non-usable statuses are passed through as [`PlanOutcome::NoSolution`].
/// A usable status whose assignment is missing or selects no start for a
/// required window is reported as a solver error rather than guessed at.
pub fn interpret(model: &DecisionModel, result: &SolveResult) -> PlanOutcome {
    if !result.status.is_usable() {
        return PlanOutcome::NoSolution {
            status: result.status.clone(),
        };
    }
    let Some(assignment) = &result.assignment else {
        return inconsistent("solver reported success without an assignment");
    };

    let split = read(assignment, model.split_var());
    let strategy = if is_selected(split) {
        Strategy::SplitWindows
    } else {
        Strategy::SingleWindow
    };

    let mut windows = Vec::with_capacity(strategy.windows().len());
    for &kind in strategy.windows() {
        match selected_start(model, assignment, kind) {
            Some(start_day) => windows.push(MaintenanceWindow { kind, start_day }),
            None => return inconsistent(&format!("no {kind} window start is selected")),
        }
    }

    let maintenance_days = model
        .maintenance_vars()
        .iter()
        .enumerate()
        .filter(|(_, var)| is_selected(read(assignment, **var)))
        .map(|(i, _)| i + 1)
        .collect();

    PlanOutcome::Scheduled(Solution {
        strategy,
        windows,
        maintenance_days,
        total_profit: model.program().objective().evaluate(assignment.values()),
        status: result.status.clone(),
    })
}

/// First day whose start variable of `kind` is selected.
fn selected_start(model: &DecisionModel, assignment: &Assignment, kind: WindowKind) -> Option<usize> {
    model
        .start_vars(kind)
        .iter()
        .position(|var| is_selected(read(assignment, *var)))
        .map(|i| i + 1)
}

fn read(assignment: &Assignment, var: VarId) -> f64 {
    assignment.value(var).unwrap_or(0.0)
}

fn inconsistent(reason: &str) -> PlanOutcome {
    warn!(reason, "discarding solver assignment");
    PlanOutcome::NoSolution {
        status: SolverStatus::Error(reason.to_string()),
    }
}
