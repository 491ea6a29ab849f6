use shared::models::{expression::ParseError, fractal::FractalError};
use thiserror::Error;
use worker::WorkerError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Fractal(#[from] FractalError),

    #[error(transparent)]
    Worker(#[from] WorkerError),

    #[error("cannot parse formula: {0}")]
    Parse(#[from] ParseError),

    #[error("unknown step preset {index}, expected 0 to {max}")]
    UnknownPreset { index: usize, max: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot write JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot export image: {0}")]
    Image(#[from] image::ImageError),
}

pub type CliResult<T> = Result<T, CliError>;
