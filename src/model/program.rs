//! Solver-neutral binary program representation.

use serde::Serialize;

/// Index of a variable inside a [`BinaryProgram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VarId(usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Domain {
    /// Free 0/1 variable.
    Binary,
    /// Variable fixed to a value; the solver may not move it.
    Fixed(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    pub name: String,
    pub domain: Domain,
}

/// `constant + Σ coeff·var`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinearExpr {
    pub terms: Vec<(VarId, f64)>,
    pub constant: f64,
}

impl LinearExpr {
    pub fn constant(value: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    /// Sum of the given variables, each with coefficient 1.
    pub fn sum<I: IntoIterator<Item = VarId>>(vars: I) -> Self {
        Self {
            terms: vars.into_iter().map(|v| (v, 1.0)).collect(),
            constant: 0.0,
        }
    }

    pub fn add_term(&mut self, var: VarId, coeff: f64) -> &mut Self {
        self.terms.push((var, coeff));
        self
    }

    /// Value of the expression under `values`, indexed by [`VarId`].
    ///
    /// Variables without a value count as zero.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms.iter().fold(self.constant, |acc, (var, coeff)| {
            acc + coeff * values.get(var.index()).copied().unwrap_or(0.0)
        })
    }

    /// Coefficient of `var`, summed over repeated terms.
    pub fn coefficient(&self, var: VarId) -> f64 {
        self.terms
            .iter()
            .filter(|(v, _)| *v == var)
            .map(|(_, c)| c)
            .sum()
    }
}

/// Named linear equality `expr == rhs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constraint {
    pub name: String,
    pub expr: LinearExpr,
    pub rhs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sense {
    Maximize,
    Minimize,
}

/// Variables, linear equality constraints and a linear objective.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryProgram {
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: LinearExpr,
    sense: Sense,
}

impl BinaryProgram {
    pub fn new(sense: Sense) -> Self {
        Self {
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: LinearExpr::default(),
            sense,
        }
    }

    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        self.add_variable(name.into(), Domain::Binary)
    }

    pub fn add_fixed(&mut self, name: impl Into<String>, value: f64) -> VarId {
        self.add_variable(name.into(), Domain::Fixed(value))
    }

    fn add_variable(&mut self, name: String, domain: Domain) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(Variable { name, domain });
        id
    }

    pub fn add_equality(&mut self, name: impl Into<String>, expr: LinearExpr, rhs: f64) {
        self.constraints.push(Constraint {
            name: name.into(),
            expr,
            rhs,
        });
    }

    pub fn set_objective(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VarId) -> Option<&Variable> {
        self.variables.get(id.index())
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }
}
