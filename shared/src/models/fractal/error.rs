use thiserror::Error;

use crate::models::expression::ParseError;

/// Configuration errors, raised before any cell is computed.
#[derive(Debug, Error)]
pub enum FractalError {
    #[error("formula `{0}` may only contain x, digits, + - * / ^ ( ) and .")]
    InvalidFormula(String),

    #[error("range {0} must be a positive finite number")]
    InvalidRange(f64),

    #[error("step size {step_size} must be greater than 0 and at most the range {range}")]
    InvalidStep { range: f64, step_size: f64 },

    #[error("range {range} with step size {step_size} needs a grid wider than {max} pixels")]
    GridTooLarge {
        range: f64,
        step_size: f64,
        max: usize,
    },

    #[error("cannot parse formula `{formula}`: {source}")]
    Parse {
        formula: String,
        #[source]
        source: ParseError,
    },

    #[error("cannot read render settings: {0}")]
    Settings(#[from] serde_json::Error),
}
