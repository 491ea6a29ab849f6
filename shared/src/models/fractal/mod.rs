pub mod error;
pub mod fractal_generator;
pub mod fractal_image;
pub mod render_settings;
pub mod result;
pub mod root_registry;

pub use self::{
    error::FractalError,
    fractal_generator::{FractalGenerator, Generation},
    fractal_image::FractalImage,
    render_settings::RenderSettings,
    result::FractalResult,
    root_registry::{RootEntry, RootRegistry},
};
