pub mod expression;
pub mod fractal;
pub mod newton;
