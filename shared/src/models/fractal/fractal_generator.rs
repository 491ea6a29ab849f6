use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Instant,
};

use complex_rs::complex::{round_half_up, Complex};
use log::{debug, info, warn};

use super::{
    error::FractalError, fractal_image::FractalImage, render_settings::RenderSettings,
    result::FractalResult, root_registry::RootRegistry,
};
use crate::{
    graphics::color::{Color, NON_CONVERGENT},
    models::{
        expression::Expression,
        newton::{build_solver, Solver},
    },
};

/// How a generation ended. A cancelled run keeps every pixel written
/// before the stop; the rest stay non-convergent black.
#[derive(Debug, Clone, PartialEq)]
pub enum Generation {
    Completed(FractalImage),
    Cancelled(FractalImage),
}

impl Generation {
    pub fn image(&self) -> &FractalImage {
        match self {
            Generation::Completed(image) | Generation::Cancelled(image) => image,
        }
    }

    pub fn into_image(self) -> FractalImage {
        match self {
            Generation::Completed(image) | Generation::Cancelled(image) => image,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Generation::Cancelled(_))
    }
}

/// Runs a solver from every sample point of `[-range, range]²` and colours
/// the point after the root it reaches.
pub struct FractalGenerator {
    settings: RenderSettings,
    solver: Box<dyn Solver + Send + Sync>,
    size: usize,
    pixels: Vec<Color>,
    registry: RootRegistry,
}

impl FractalGenerator {
    pub fn new(settings: RenderSettings) -> FractalResult<Self> {
        settings.validate()?;

        let solver = build_solver(&settings.formula, settings.derivative.as_deref()).map_err(
            |source| FractalError::Parse {
                formula: failing_formula(&settings),
                source,
            },
        )?;
        let size = settings
            .grid_size()
            .ok_or_else(|| settings.grid_too_large())?;
        let cells = size
            .checked_mul(size)
            .ok_or_else(|| settings.grid_too_large())?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(cells)
            .map_err(|_| settings.grid_too_large())?;
        pixels.resize(cells, NON_CONVERGENT);

        debug!(
            "Generator ready: {} solver, {}x{} grid",
            solver.kind(),
            size,
            size
        );

        Ok(Self {
            settings,
            solver,
            size,
            pixels,
            registry: RootRegistry::new(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Computes every cell, row by row from `y = -range`.
    ///
    /// `progress` receives the completed percentage each time its rounded
    /// value changes, starting at 0 and ending at 100 on completion.
    /// `cancel` is checked before each cell.
    pub fn generate(mut self, mut progress: impl FnMut(u8), cancel: &AtomicBool) -> Generation {
        let started = Instant::now();
        let range = self.settings.range;
        let step = self.settings.step_size;
        let total_cells = (self.size * self.size) as f64;
        let mut completed = 0usize;
        let mut reported = 0u8;
        progress(reported);

        info!(
            "Rendering f(x) = {} over [-{}, {}] with step {} ({}x{} cells)",
            self.settings.formula, range, range, step, self.size, self.size
        );

        // coordinates accumulate `step`, so float drift can yield one sample
        // past `size` on either axis; it is skipped
        let mut row = 0;
        let mut y = -range;
        while y <= range {
            if row < self.size {
                let mut column = 0;
                let mut x = -range;
                while x <= range {
                    if column < self.size {
                        if cancel.load(Ordering::Relaxed) {
                            warn!("Rendering cancelled after {} cells", completed);
                            return Generation::Cancelled(self.into_image());
                        }

                        let root = self.solver.solve(Complex::new(x, y));
                        self.pixels[row * self.size + column] = self.registry.resolve(root);

                        completed += 1;
                        let percent = round_half_up(100.0 * completed as f64 / total_cells)
                            .min(100.0) as u8;
                        if percent != reported {
                            reported = percent;
                            progress(percent);
                        }
                    }
                    column += 1;
                    x += step;
                }
            }
            row += 1;
            y += step;
        }

        if reported != 100 {
            progress(100);
        }

        info!(
            "Rendered {} cells in {:.2?}, {} roots found",
            completed,
            started.elapsed(),
            self.registry.len() - 1
        );
        Generation::Completed(self.into_image())
    }

    fn into_image(self) -> FractalImage {
        FractalImage {
            size: self.size,
            pixels: self.pixels,
            roots: self.registry.into_entries(),
        }
    }
}

/// The formula a parse error belongs to: the derivative is only blamed when
/// the function itself parses.
fn failing_formula(settings: &RenderSettings) -> String {
    match &settings.derivative {
        Some(derivative) if Expression::parse(&settings.formula).is_ok() => derivative.clone(),
        _ => settings.formula.clone(),
    }
}
