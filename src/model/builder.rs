//! Formulation of the maintenance decision model.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::program::{BinaryProgram, LinearExpr, Sense, VarId};
use super::window::WindowKind;
use crate::error::DataError;
use crate::forecast::{Availability, ForecastSet};

/// Plant-level economic parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlantParams {
    /// Multiplier applied to the production forecast.
    pub capacity: f64,
    /// Base cost of one maintenance day before the daily coefficient.
    pub fixed_cost: f64,
}

impl PlantParams {
    /// Checks that both parameters are strictly positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::NonPositiveParameter`] naming the first bad field.
    pub fn validate(&self) -> Result<(), DataError> {
        for (name, value) in [("capacity", self.capacity), ("fixed_cost", self.fixed_cost)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(DataError::NonPositiveParameter { name, value });
            }
        }
        Ok(())
    }

    /// Revenue earned on `day` when the plant runs.
    pub fn day_revenue(&self, production: f64, price: f64) -> f64 {
        self.capacity * production * price
    }

    /// Cost of performing maintenance on a day with coefficient `coeff`.
    pub fn day_maintenance_cost(&self, coeff: f64) -> f64 {
        self.fixed_cost * coeff
    }
}

/// Binary program for one scenario together with handles to its variables.
///
/// Per-day handles are stored 0-based; use the accessors with 1-indexed days.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionModel {
    program: BinaryProgram,
    split: VarId,
    maintenance: Vec<VarId>,
    start5: Vec<VarId>,
    start3: Vec<VarId>,
    start2: Vec<VarId>,
}

impl DecisionModel {
    pub fn program(&self) -> &BinaryProgram {
        &self.program
    }

    pub fn horizon(&self) -> usize {
        self.maintenance.len()
    }

    pub fn split_var(&self) -> VarId {
        self.split
    }

    pub fn maintenance_var(&self, day: usize) -> Option<VarId> {
        day_handle(&self.maintenance, day)
    }

    pub fn start_var(&self, kind: WindowKind, day: usize) -> Option<VarId> {
        day_handle(self.start_vars(kind), day)
    }

    /// Start variables of `kind` for days `1..=horizon`, in order.
    pub fn start_vars(&self, kind: WindowKind) -> &[VarId] {
        match kind {
            WindowKind::FiveDay => &self.start5,
            WindowKind::ThreeDay => &self.start3,
            WindowKind::TwoDay => &self.start2,
        }
    }

    pub fn maintenance_vars(&self) -> &[VarId] {
        &self.maintenance
    }
}

fn day_handle(vars: &[VarId], day: usize) -> Option<VarId> {
    day.checked_sub(1).and_then(|i| vars.get(i)).copied()
}

/// Builds the decision model for one scenario.
///
/// Window starts on unavailable days are fixed to 0. The three count
/// constraints make the 5-day window and the 3+2 pair mutually exclusive via
/// the `split` flag, and the per-day linking constraint sets
/// `maintenance[d]` from every start whose window covers `d`. Windows are
/// allowed to run past the end of the horizon.
///
/// # Errors
///
/// Returns [`DataError::AvailabilityMismatch`] if `availability` does not
/// cover the forecast horizon.
pub fn build(
    forecast: &ForecastSet,
    availability: &Availability,
    params: &PlantParams,
) -> Result<DecisionModel, DataError> {
    let horizon = forecast.horizon();
    if availability.horizon() != horizon {
        return Err(DataError::AvailabilityMismatch {
            expected: horizon,
            found: availability.horizon(),
        });
    }

    let mut program = BinaryProgram::new(Sense::Maximize);
    let split = program.add_binary("split");
    let maintenance: Vec<VarId> = (1..=horizon)
        .map(|day| program.add_binary(format!("maintenance[{day}]")))
        .collect();
    let start5 = add_start_vars(&mut program, WindowKind::FiveDay, availability);
    let start3 = add_start_vars(&mut program, WindowKind::ThreeDay, availability);
    let start2 = add_start_vars(&mut program, WindowKind::TwoDay, availability);

    // sum start5 + split = 1
    let mut one_five = LinearExpr::sum(start5.iter().copied());
    one_five.add_term(split, 1.0);
    program.add_equality("one_maintenance_start_5", one_five, 1.0);

    // sum start3 - split = 0, same for start2
    for (name, starts) in [
        ("one_maintenance_start_3", &start3),
        ("one_maintenance_start_2", &start2),
    ] {
        let mut expr = LinearExpr::sum(starts.iter().copied());
        expr.add_term(split, -1.0);
        program.add_equality(name, expr, 0.0);
    }

    for day in 1..=horizon {
        let mut link = LinearExpr::default();
        link.add_term(maintenance[day - 1], 1.0);
        for (kind, starts) in [
            (WindowKind::FiveDay, &start5),
            (WindowKind::ThreeDay, &start3),
            (WindowKind::TwoDay, &start2),
        ] {
            for k in kind.first_covering_start(day)..=day {
                link.add_term(starts[k - 1], -1.0);
            }
        }
        program.add_equality(format!("link_maintenance[{day}]"), link, 0.0);
    }

    // revenue·(1 - m) - cost·m  ==  revenue - (revenue + cost)·m
    let mut objective = LinearExpr::default();
    for (day, f) in forecast.iter() {
        let revenue = params.day_revenue(f.production, f.price);
        let cost = params.day_maintenance_cost(f.maintenance_coeff);
        objective.constant += revenue;
        objective.add_term(maintenance[day - 1], -(revenue + cost));
    }
    program.set_objective(objective);

    debug!(
        horizon,
        variables = program.variables().len(),
        constraints = program.constraints().len(),
        blocked_days = availability.blocked_days().len(),
        "built maintenance decision model"
    );

    Ok(DecisionModel {
        program,
        split,
        maintenance,
        start5,
        start3,
        start2,
    })
}

fn add_start_vars(
    program: &mut BinaryProgram,
    kind: WindowKind,
    availability: &Availability,
) -> Vec<VarId> {
    (1..=availability.horizon())
        .map(|day| {
            let name = format!("{}[{day}]", kind.var_prefix());
            if availability.is_available(day) {
                program.add_binary(name)
            } else {
                program.add_fixed(name, 0.0)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{DayForecast, DayRange};
    use crate::model::program::Domain;

    fn uniform_forecast(horizon: usize) -> ForecastSet {
        let days = vec![
            DayForecast {
                production: 1.0,
                price: 10.0,
                maintenance_coeff: 1.0,
            };
            horizon
        ];
        ForecastSet::from_days(days).expect("uniform forecast is valid")
    }

    fn params() -> PlantParams {
        PlantParams {
            capacity: 20.0,
            fixed_cost: 500.0,
        }
    }

    fn build_uniform(horizon: usize, availability: &Availability) -> DecisionModel {
        build(&uniform_forecast(horizon), availability, &params()).expect("model should build")
    }

    #[test]
    fn variable_and_constraint_counts() {
        let model = build_uniform(10, &Availability::full(10));
        assert_eq!(model.horizon(), 10);
        assert_eq!(model.program().variables().len(), 1 + 4 * 10);
        assert_eq!(model.program().constraints().len(), 3 + 10);
        assert_eq!(model.program().sense(), Sense::Maximize);
    }

    #[test]
    fn unavailable_days_fix_all_starts_to_zero() {
        let availability = Availability::with_blackouts(10, &[DayRange::new(4, 10)]);
        let model = build_uniform(10, &availability);
        for kind in WindowKind::ALL {
            for day in 1..=10 {
                let var = model.start_var(kind, day).expect("start var exists");
                let domain = model.program().variable(var).map(|v| v.domain);
                if day >= 4 {
                    assert_eq!(domain, Some(Domain::Fixed(0.0)), "{kind} day {day}");
                } else {
                    assert_eq!(domain, Some(Domain::Binary), "{kind} day {day}");
                }
            }
        }
        // maintenance itself is never fixed
        for day in 4..=10 {
            let var = model.maintenance_var(day).expect("maintenance var");
            assert_eq!(
                model.program().variable(var).map(|v| v.domain),
                Some(Domain::Binary)
            );
        }
    }

    #[test]
    fn count_constraints_link_split() {
        let model = build_uniform(6, &Availability::full(6));
        let p = model.program();
        let split = model.split_var();

        let five = p.constraint("one_maintenance_start_5").expect("constraint");
        assert_eq!(five.rhs, 1.0);
        assert_eq!(five.expr.coefficient(split), 1.0);
        for &v in model.start_vars(WindowKind::FiveDay) {
            assert_eq!(five.expr.coefficient(v), 1.0);
        }

        for name in ["one_maintenance_start_3", "one_maintenance_start_2"] {
            let c = p.constraint(name).expect("constraint");
            assert_eq!(c.rhs, 0.0);
            assert_eq!(c.expr.coefficient(split), -1.0);
        }
    }

    #[test]
    fn linking_constraint_covers_trailing_starts() {
        let model = build_uniform(10, &Availability::full(10));
        let link = model
            .program()
            .constraint("link_maintenance[7]")
            .expect("link for day 7");
        let m7 = model.maintenance_var(7).expect("m7");
        assert_eq!(link.expr.coefficient(m7), 1.0);

        let covering = |kind: WindowKind, day: usize| {
            let var = model.start_var(kind, day).expect("start var");
            link.expr.coefficient(var)
        };
        for day in 3..=7 {
            assert_eq!(covering(WindowKind::FiveDay, day), -1.0);
        }
        assert_eq!(covering(WindowKind::FiveDay, 2), 0.0);
        assert_eq!(covering(WindowKind::FiveDay, 8), 0.0);
        for day in 5..=7 {
            assert_eq!(covering(WindowKind::ThreeDay, day), -1.0);
        }
        assert_eq!(covering(WindowKind::ThreeDay, 4), 0.0);
        assert_eq!(covering(WindowKind::TwoDay, 6), -1.0);
        assert_eq!(covering(WindowKind::TwoDay, 7), -1.0);
        assert_eq!(covering(WindowKind::TwoDay, 5), 0.0);
    }

    #[test]
    fn linking_constraint_clips_at_first_day() {
        let model = build_uniform(10, &Availability::full(10));
        let link = model
            .program()
            .constraint("link_maintenance[2]")
            .expect("link for day 2");
        // m[2] plus start5[1..=2], start3[1..=2], start2[1..=2]
        assert_eq!(link.expr.terms.len(), 1 + 2 + 2 + 2);
        assert_eq!(link.rhs, 0.0);
    }

    #[test]
    fn objective_coefficients() {
        let model = build_uniform(10, &Availability::full(10));
        let objective = model.program().objective();
        // 10 days · 20 · 1 · 10
        assert_eq!(objective.constant, 2000.0);
        for &m in model.maintenance_vars() {
            assert_eq!(objective.coefficient(m), -(200.0 + 500.0));
        }
        assert_eq!(objective.coefficient(model.split_var()), 0.0);
    }

    #[test]
    fn objective_uses_daily_forecast() {
        let forecast = ForecastSet::from_days(vec![
            DayForecast {
                production: 0.5,
                price: 40.0,
                maintenance_coeff: 2.0,
            },
            DayForecast {
                production: 1.0,
                price: -5.0,
                maintenance_coeff: 0.0,
            },
        ])
        .expect("forecast");
        let model = build(&forecast, &Availability::full(2), &params()).expect("model");
        let objective = model.program().objective();
        let m1 = model.maintenance_var(1).expect("m1");
        let m2 = model.maintenance_var(2).expect("m2");
        assert_eq!(objective.constant, 400.0 - 100.0);
        assert_eq!(objective.coefficient(m1), -(400.0 + 1000.0));
        assert_eq!(objective.coefficient(m2), -(-100.0 + 0.0));
    }

    #[test]
    fn build_is_deterministic() {
        let availability = Availability::with_blackouts(12, &[DayRange::new(3, 5)]);
        let a = build_uniform(12, &availability);
        let b = build_uniform(12, &availability);
        assert_eq!(a, b);
    }

    #[test]
    fn availability_horizon_mismatch_is_data_error() {
        let err = build(&uniform_forecast(10), &Availability::full(9), &params())
            .expect_err("mismatch must fail");
        assert_eq!(
            err,
            DataError::AvailabilityMismatch {
                expected: 10,
                found: 9
            }
        );
    }

    #[test]
    fn non_positive_params_fail_validation() {
        let p = PlantParams {
            capacity: 0.0,
            fixed_cost: 500.0,
        };
        assert!(matches!(
            p.validate(),
            Err(DataError::NonPositiveParameter {
                name: "capacity",
                ..
            })
        ));
        assert!(params().validate().is_ok());
    }
}
