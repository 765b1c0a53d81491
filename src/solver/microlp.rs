//! `good_lp` backend using the pure-Rust `microlp` branch-and-bound solver.

use std::time::Instant;

use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution as _, SolverModel, Variable,
    constraint, microlp, variable,
};
use tracing::{debug, info};

use super::{Assignment, SolveResult, SolverStatus, SolvingEngine};
use crate::model::program::{BinaryProgram, Domain, LinearExpr, Sense};

/// Solves binary programs with `good_lp` + `microlp`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MicroLpEngine;

impl SolvingEngine for MicroLpEngine {
    fn solve(&self, program: &BinaryProgram) -> SolveResult {
        let started = Instant::now();
        let mut vars = ProblemVariables::new();
        let handles: Vec<Variable> = program
            .variables()
            .iter()
            .map(|v| match v.domain {
                Domain::Binary => vars.add(variable().binary()),
                Domain::Fixed(value) => vars.add(variable().integer().min(value).max(value)),
            })
            .collect();

        let objective = to_expression(program.objective(), &handles);
        let mut model = match program.sense() {
            Sense::Maximize => vars.maximise(objective),
            Sense::Minimize => vars.minimise(objective),
        }
        .using(microlp);

        for c in program.constraints() {
            let lhs = to_expression(&c.expr, &handles);
            let rhs = c.rhs;
            model = model.with(constraint!(lhs == rhs));
        }

        debug!(
            variables = handles.len(),
            constraints = program.constraints().len(),
            "solving with microlp"
        );

        let result = match model.solve() {
            Ok(solution) => {
                let values = handles.iter().map(|h| solution.value(*h)).collect();
                SolveResult::optimal(Assignment::new(values))
            }
            Err(ResolutionError::Infeasible) => {
                SolveResult::without_assignment(SolverStatus::Infeasible)
            }
            Err(ResolutionError::Unbounded) => {
                SolveResult::without_assignment(SolverStatus::Unbounded)
            }
            Err(e) => SolveResult::without_assignment(SolverStatus::Error(e.to_string())),
        };

        info!(
            engine = self.name(),
            status = %result.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "solve finished"
        );
        result
    }

    fn name(&self) -> &str {
        "microlp"
    }
}

fn to_expression(expr: &LinearExpr, handles: &[Variable]) -> Expression {
    let mut out = Expression::from(expr.constant);
    for (var, coeff) in &expr.terms {
        out += *coeff * handles[var.index()];
    }
    out
}
