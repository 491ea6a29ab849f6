use complex_rs::complex::round_half_up;
use serde::{Deserialize, Serialize};

use super::{error::FractalError, result::FractalResult};
use crate::models::newton::SolverKind;

/// Largest accepted side length of the pixel grid.
pub const MAX_GRID_SIZE: usize = 40_000;

/// What a formula may be made of: `[x0-9+\-*/^().]+`.
pub fn is_valid_formula(formula: &str) -> bool {
    !formula.is_empty()
        && formula.chars().all(|c| {
            matches!(
                c,
                'x' | '0'..='9' | '+' | '-' | '*' | '/' | '^' | '(' | ')' | '.'
            )
        })
}

/// One generation request: the formula, its optional derivative and the
/// sampled window `[-range, range]²` with its spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    pub formula: String,
    #[serde(default)]
    pub derivative: Option<String>,
    pub range: f64,
    pub step_size: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            formula: "x^3-1".to_string(),
            derivative: Some("3*x^2".to_string()),
            range: 1.0,
            step_size: 0.01,
        }
    }
}

impl RenderSettings {
    pub fn from_json(json: &str) -> FractalResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> FractalResult<()> {
        for formula in std::iter::once(&self.formula).chain(self.derivative.as_ref()) {
            if !is_valid_formula(formula) {
                return Err(FractalError::InvalidFormula(formula.clone()));
            }
        }
        if !self.range.is_finite() || self.range <= 0.0 {
            return Err(FractalError::InvalidRange(self.range));
        }
        if !(self.step_size > 0.0 && self.step_size <= self.range) {
            return Err(FractalError::InvalidStep {
                range: self.range,
                step_size: self.step_size,
            });
        }
        if self.grid_size().is_none() {
            return Err(self.grid_too_large());
        }
        Ok(())
    }

    pub fn solver_kind(&self) -> SolverKind {
        match self.derivative {
            Some(_) => SolverKind::Analytic,
            None => SolverKind::Numeric,
        }
    }

    /// Side length of the pixel grid, `2 * round(range / step)`, or `None`
    /// past [`MAX_GRID_SIZE`].
    pub fn grid_size(&self) -> Option<usize> {
        let half = round_half_up(self.range / self.step_size);
        if half.is_finite() && half <= (MAX_GRID_SIZE / 2) as f64 {
            Some(2 * half as usize)
        } else {
            None
        }
    }

    pub(crate) fn grid_too_large(&self) -> FractalError {
        FractalError::GridTooLarge {
            range: self.range,
            step_size: self.step_size,
            max: MAX_GRID_SIZE,
        }
    }
}
