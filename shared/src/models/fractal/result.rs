use super::error::FractalError;

pub type FractalResult<T> = Result<T, FractalError>;
