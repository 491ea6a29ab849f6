use complex_rs::complex::Complex;

use super::{log_parsed, Solver, SolverKind};
use crate::models::expression::{Bindings, EvalError, Expression, ParseError};

/// Offset of the forward difference, applied to the real axis only.
pub const DERIVATIVE_STEP: f64 = 1e-8;
/// Decimals kept of both the derivative estimate and every new iterate.
pub const ROUNDING_DECIMALS: i32 = 5;

/// Newton's method with a numerically estimated derivative.
#[derive(Debug, Clone)]
pub struct NumericNewton {
    function: Expression,
}

impl NumericNewton {
    pub fn new(formula: &str) -> Result<Self, ParseError> {
        let function = Expression::parse(formula)?;
        log_parsed("Numeric", &function);
        Ok(Self { function })
    }

    fn value_at(&self, x: Complex) -> Result<Complex, EvalError> {
        self.function.evaluate(&Bindings::new().with('x', x))
    }

    /// `(f(x + h) - f(x)) / h`, rounded.
    pub fn slope(&self, x: Complex) -> Result<Complex, EvalError> {
        let ahead = self.value_at(Complex::new(x.re + DERIVATIVE_STEP, x.im))?;
        let here = self.value_at(x)?;
        Ok(((ahead - here) / Complex::new(DERIVATIVE_STEP, 0.0)).round_to(ROUNDING_DECIMALS))
    }
}

impl Solver for NumericNewton {
    fn step(&self, x: Complex) -> Result<Complex, EvalError> {
        let slope = self.slope(x)?;
        let value = self.value_at(x)?;
        Ok((x - value / slope).round_to(ROUNDING_DECIMALS))
    }

    fn kind(&self) -> SolverKind {
        SolverKind::Numeric
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimates_slope_of_a_polynomial() {
        let solver = NumericNewton::new("x^2").unwrap();
        let slope = solver.slope(Complex::new(3.0, 0.0)).unwrap();
        assert!(slope.l1_distance(Complex::new(6.0, 0.0)) < 1e-4, "{:?}", slope);
    }

    #[test]
    fn iterates_are_rounded_to_five_decimals() {
        let solver = NumericNewton::new("x^3-1").unwrap();
        let next = solver.step(Complex::new(1.3, 0.7)).unwrap();
        assert_eq!(next, next.round_to(ROUNDING_DECIMALS));
    }

    #[test]
    fn converges_to_a_real_root() {
        let solver = NumericNewton::new("x^2-2").unwrap();
        let solution = solver.solve_report(Complex::new(1.0, 0.0));
        assert!(solution.converged);
        assert!((solution.root.re - 2f64.sqrt()).abs() < 1e-4, "{:?}", solution.root);
        assert_eq!(solution.root.im, 0.0);
    }

    #[test]
    fn flat_function_diverges() {
        // the slope rounds to zero, so the update divides by zero
        let solver = NumericNewton::new("5").unwrap();
        let solution = solver.solve_report(Complex::new(1.0, 1.0));
        assert!(!solution.converged);
        assert!(solution.root.is_nan());
    }
}
