//! Newton-Raphson iteration over parsed formulas.
//!
//! Both strategies share the loop in [`Solver::solve_report`] and differ only
//! in how one step `x - f(x) / f'(x)` is computed.

pub mod analytic_newton;
pub mod numeric_newton;

use std::fmt;

use complex_rs::complex::Complex;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use super::expression::{EvalError, Expression, ParseError};

pub use self::{analytic_newton::AnalyticNewton, numeric_newton::NumericNewton};

pub const MAX_ITERATIONS: usize = 1000;
pub const CONVERGENCE_EPSILON: f64 = 1e-8;
/// Starts closer than this (in `|re| + |im|`) to the origin are snapped onto it.
pub const DEGENERATE_START: f64 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    pub root: Complex,
    pub iterations: usize,
    pub converged: bool,
}

impl Solution {
    fn diverged(iterations: usize) -> Self {
        Self {
            root: Complex::nan(),
            iterations,
            converged: false,
        }
    }
}

pub trait Solver {
    /// One Newton update from `x`.
    fn step(&self, x: Complex) -> Result<Complex, EvalError>;

    fn kind(&self) -> SolverKind;

    /// Iterates from `start` until two successive estimates are closer than
    /// [`CONVERGENCE_EPSILON`]. A `NaN` estimate, an evaluation error or
    /// running out of iterations all end in a `NaN` root.
    fn solve_report(&self, start: Complex) -> Solution {
        let mut x = if start.re.abs() + start.im.abs() < DEGENERATE_START {
            Complex::zero()
        } else {
            start
        };

        for i in 1..=MAX_ITERATIONS {
            let next = match self.step(x) {
                Ok(next) => next,
                Err(e) => {
                    trace!("Iteration from {:?} aborted: {}", start, e);
                    return Solution::diverged(i);
                }
            };
            if next.is_nan() {
                return Solution::diverged(i);
            }

            let delta = next.l1_distance(x);
            x = next;
            if delta < CONVERGENCE_EPSILON {
                return Solution {
                    root: x,
                    iterations: i,
                    converged: true,
                };
            }
        }

        Solution::diverged(MAX_ITERATIONS)
    }

    fn solve(&self, start: Complex) -> Complex {
        self.solve_report(start).root
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    /// Uses a derivative formula supplied by the caller.
    Analytic,
    /// Estimates the derivative with a forward difference.
    Numeric,
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverKind::Analytic => f.write_str("analytic"),
            SolverKind::Numeric => f.write_str("numeric"),
        }
    }
}

/// The analytic solver when a derivative is given, the numeric one otherwise.
pub fn build_solver(
    formula: &str,
    derivative: Option<&str>,
) -> Result<Box<dyn Solver + Send + Sync>, ParseError> {
    Ok(match derivative {
        Some(derivative) => Box::new(AnalyticNewton::new(formula, derivative)?),
        None => Box::new(NumericNewton::new(formula)?),
    })
}

/// Variables of `expression` other than `x`. No solve ever binds them.
pub fn free_variables(expression: &Expression) -> Vec<char> {
    expression
        .variables()
        .into_iter()
        .filter(|name| *name != 'x')
        .collect()
}

fn log_parsed(label: &str, expression: &Expression) {
    debug!("{} solver parsed {}", label, expression);
    let free = free_variables(expression);
    if !free.is_empty() {
        warn!(
            "{} references unbound variables {:?}, every solve will diverge",
            expression, free
        );
    }
}
