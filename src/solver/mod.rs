//! Solving-engine boundary.
//!
//! The planner never solves integer programs itself. It hands a
//! [`BinaryProgram`] to a [`SolvingEngine`] and reads back a status and, when
//! the status is usable, one value per declared variable.

pub mod microlp;

use std::fmt;

use serde::Serialize;

use crate::model::program::{BinaryProgram, VarId};

pub use microlp::MicroLpEngine;

/// Termination status reported by a solving engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverStatus {
    Optimal,
    /// A feasible assignment without an optimality proof.
    Feasible,
    Infeasible,
    Unbounded,
    /// Engine failure, limit hit, or inconsistent output.
    Error(String),
}

impl SolverStatus {
    /// Whether an assignment with this status may be interpreted as a schedule.
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Optimal | Self::Feasible)
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optimal => write!(f, "optimal"),
            Self::Feasible => write!(f, "feasible"),
            Self::Infeasible => write!(f, "infeasible"),
            Self::Unbounded => write!(f, "unbounded"),
            Self::Error(msg) => write!(f, "solver error: {msg}"),
        }
    }
}

/// Values for every variable of a program, indexed by [`VarId`].
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    values: Vec<f64>,
}

impl Assignment {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn value(&self, var: VarId) -> Option<f64> {
        self.values.get(var.index()).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Outcome of one solve call.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    pub status: SolverStatus,
    pub assignment: Option<Assignment>,
}

impl SolveResult {
    pub fn optimal(assignment: Assignment) -> Self {
        Self {
            status: SolverStatus::Optimal,
            assignment: Some(assignment),
        }
    }

    /// A result carrying only a status, e.g. infeasibility.
    pub fn without_assignment(status: SolverStatus) -> Self {
        Self {
            status,
            assignment: None,
        }
    }
}

/// Capability to solve a binary program.
///
/// Implementations must not panic on infeasible or malformed programs; such
/// outcomes are reported through [`SolverStatus`].
pub trait SolvingEngine {
    fn solve(&self, program: &BinaryProgram) -> SolveResult;

    /// Engine name for logging.
    fn name(&self) -> &str;
}
