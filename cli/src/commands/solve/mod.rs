use clap::Parser;
use complex_rs::complex::Complex;
use log::info;
use shared::models::{
    fractal::{render_settings::is_valid_formula, FractalError, RenderSettings},
    newton::build_solver,
};

use super::resolve_formulas;
use crate::error::CliResult;

/// 🎯 Solve Command
///
/// Runs Newton's method from one starting point and prints the root.
#[derive(Parser, Debug)]
#[command(name = "solve", about = "🎯 Find a root from a single starting point.", long_about = None)]
pub struct SolveCommand {
    /// 🧮 Function f(x)
    ///
    /// Formula in x, e.g. `x^3-1`. Defaults to `x^3-1`.
    #[arg(short, long, value_name = "FORMULA")]
    pub formula: Option<String>,

    /// 📐 Derivative f'(x)
    ///
    /// Leave it out to estimate the derivative numerically.
    #[arg(short, long, value_name = "FORMULA")]
    pub derivative: Option<String>,

    /// 🔢 Estimate the derivative numerically even if one is given.
    #[arg(long)]
    pub numeric: bool,

    /// ➡️ Real part of the starting point (default 0)
    #[arg(long, value_name = "RE", allow_hyphen_values = true)]
    pub re: Option<f64>,

    /// ⬆️ Imaginary part of the starting point (default 0)
    #[arg(long, value_name = "IM", allow_hyphen_values = true)]
    pub im: Option<f64>,
}

pub fn run(args: SolveCommand) -> CliResult<()> {
    let (formula, derivative) = resolve_formulas(
        &RenderSettings::default(),
        args.formula.as_deref(),
        args.derivative.as_deref(),
        args.numeric,
    );
    for text in std::iter::once(&formula).chain(derivative.as_ref()) {
        if !is_valid_formula(text) {
            return Err(FractalError::InvalidFormula(text.clone()).into());
        }
    }

    let start = Complex::new(args.re.unwrap_or(0.0), args.im.unwrap_or(0.0));
    let solver = build_solver(&formula, derivative.as_deref())?;
    info!("Solving f(x) = {} from {:?} with the {} solver", formula, start, solver.kind());

    let solution = solver.solve_report(start);
    match solution.root.format() {
        Some(root) if solution.converged => println!(
            "x = {} (converged after {} iterations)",
            root, solution.iterations
        ),
        _ => println!("no root found after {} iterations", solution.iterations),
    }
    Ok(())
}
