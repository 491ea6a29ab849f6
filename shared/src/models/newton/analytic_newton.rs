use complex_rs::complex::Complex;

use super::{log_parsed, Solver, SolverKind};
use crate::models::expression::{Bindings, EvalError, Expression, Operator, ParseError};

/// Newton's method with a caller supplied derivative formula.
#[derive(Debug, Clone)]
pub struct AnalyticNewton {
    /// `x - (f / f')`
    update: Expression,
}

impl AnalyticNewton {
    pub fn new(formula: &str, derivative: &str) -> Result<Self, ParseError> {
        let f = Expression::parse(formula)?;
        let df = Expression::parse(derivative)?;
        let update = Expression::binary(
            Operator::Sub,
            Expression::Variable('x'),
            Expression::binary(Operator::Div, f, df),
        );
        log_parsed("Analytic", &update);
        Ok(Self { update })
    }
}

impl Solver for AnalyticNewton {
    fn step(&self, x: Complex) -> Result<Complex, EvalError> {
        self.update.evaluate(&Bindings::new().with('x', x))
    }

    fn kind(&self) -> SolverKind {
        SolverKind::Analytic
    }
}
