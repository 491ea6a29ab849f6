use clap::Subcommand;
use shared::models::fractal::RenderSettings;

use self::{render::RenderCommand, solve::SolveCommand};

pub mod render;
pub mod solve;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 🎯 Solve
    ///
    /// Run Newton's method once from a single starting point.
    Solve(SolveCommand),

    /// 🖼️ Render
    ///
    /// Render the Newton fractal of a formula and list the roots found.
    Render(RenderCommand),
}

/// The function and derivative to use on top of `base`. A new formula never
/// keeps the derivative of the old one, so without a derivative of its own
/// it selects the numeric solver; `numeric` always drops the derivative.
pub fn resolve_formulas(
    base: &RenderSettings,
    formula: Option<&str>,
    derivative: Option<&str>,
    numeric: bool,
) -> (String, Option<String>) {
    let (formula, derivative) = match formula {
        Some(formula) => (formula.to_owned(), derivative.map(str::to_owned)),
        None => (
            base.formula.clone(),
            derivative.map(str::to_owned).or_else(|| base.derivative.clone()),
        ),
    };

    if numeric {
        (formula, None)
    } else {
        (formula, derivative)
    }
}
