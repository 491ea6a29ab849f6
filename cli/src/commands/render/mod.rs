use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::Ordering,
};

use clap::Parser;
use colored::Colorize;
use log::{info, warn};
use serde::Serialize;
use shared::{
    graphics::color::{to_hex, NON_CONVERGENT},
    models::fractal::{FractalImage, Generation, RenderSettings},
};

use super::resolve_formulas;
use crate::error::{CliError, CliResult};

/// Step sizes selectable with `--preset`, from coarse to fine.
pub const STEP_PRESETS: [f64; 8] = [0.009, 0.005, 0.003, 0.002, 0.001, 0.0007, 0.0005, 0.0001];

/// 🖼️ Render Command
///
/// Renders the basins of attraction of a formula over a square of the
/// complex plane.
#[derive(Parser, Debug)]
#[command(name = "render", about = "🖼️ Render a Newton fractal.", long_about = None)]
pub struct RenderCommand {
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

    /// 📏 Half width of the rendered square (default 1.0)
    #[arg(short, long, value_name = "RANGE")]
    pub range: Option<f64>,

    /// 🪜 Distance between two samples (default 0.01)
    #[arg(short, long, value_name = "STEP")]
    pub step: Option<f64>,

    /// 🎚️ Step preset, 0 (0.009) to 7 (0.0001)
    #[arg(short, long, value_name = "INDEX", conflicts_with = "step")]
    pub preset: Option<usize>,

    /// 📄 JSON file with the render settings
    ///
    /// Options given on the command line override the file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// 💾 Where to write the PNG image
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// 📋 Print the roots as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct RootReport {
    name: String,
    value: String,
    re: f64,
    im: f64,
    color: String,
}

impl RenderCommand {
    pub fn settings(&self) -> CliResult<RenderSettings> {
        let mut settings = match &self.config {
            Some(path) => RenderSettings::from_json(&fs::read_to_string(path)?)?,
            None => RenderSettings::default(),
        };

        let (formula, derivative) = resolve_formulas(
            &settings,
            self.formula.as_deref(),
            self.derivative.as_deref(),
            self.numeric,
        );
        settings.formula = formula;
        settings.derivative = derivative;

        if let Some(range) = self.range {
            settings.range = range;
        }
        if let Some(step) = self.step {
            settings.step_size = step;
        }
        if let Some(index) = self.preset {
            settings.step_size = *STEP_PRESETS.get(index).ok_or(CliError::UnknownPreset {
                index,
                max: STEP_PRESETS.len() - 1,
            })?;
        }

        Ok(settings)
    }
}

pub async fn run(args: RenderCommand) -> CliResult<()> {
    let settings = args.settings()?;
    let mut job = worker::spawn_render(settings)?;

    let cancel = job.cancel_token();
    let id = job.id;
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling render job {}", id);
            cancel.store(true, Ordering::Relaxed);
        }
    });

    while let Some(percent) = job.progress.recv().await {
        eprint!("\r{} {:>3}%", "Rendering".cyan().bold(), percent);
    }
    eprintln!();

    match job.join().await? {
        Generation::Completed(image) => {
            if let Some(path) = &args.output {
                export(&image, path)?;
            }
            print_roots(&image, args.json)
        }
        Generation::Cancelled(_) => {
            warn!("Render cancelled, nothing exported");
            Ok(())
        }
    }
}

/// Writes the image as PNG, adding the extension when the path has none.
fn export(image: &FractalImage, path: &Path) -> CliResult<()> {
    let path = match path.extension() {
        Some(_) => path.to_path_buf(),
        None => path.with_extension("png"),
    };
    image.to_rgb_image().save(&path)?;
    info!("Image written to {}", path.display());
    Ok(())
}

fn print_roots(image: &FractalImage, json: bool) -> CliResult<()> {
    let reports: Vec<RootReport> = image
        .discovered_roots()
        .enumerate()
        .filter_map(|(index, entry)| {
            entry.root.format().map(|value| RootReport {
                name: format!("x{}", index + 1),
                value,
                re: entry.root.re,
                im: entry.root.im,
                color: to_hex(entry.color),
            })
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    if reports.is_empty() {
        println!("{}", "No root found".yellow());
    }
    for (report, entry) in reports.iter().zip(image.discovered_roots()) {
        let (r, g, b) = entry.color;
        println!(
            "{} {} = {} ({})",
            "  ".on_truecolor(r, g, b),
            report.name.bold(),
            report.value,
            report.color
        );
    }

    let black = image.pixels.iter().filter(|c| **c == NON_CONVERGENT).count();
    if black > 0 {
        println!(
            "{}",
            format!("{} of {} points did not converge", black, image.pixels.len()).dimmed()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        render: RenderCommand,
    }

    fn parse(args: &[&str]) -> RenderCommand {
        TestCli::parse_from(std::iter::once("render").chain(args.iter().copied())).render
    }

    #[test]
    fn no_options_give_default_settings() {
        assert_eq!(parse(&[]).settings().unwrap(), RenderSettings::default());
    }

    #[test]
    fn formula_without_derivative_is_numeric() {
        let settings = parse(&["--formula", "x^2-1", "--range", "2"]).settings().unwrap();
        assert_eq!(settings.formula, "x^2-1");
        assert_eq!(settings.derivative, None);
        assert_eq!(settings.range, 2.0);
    }

    #[test]
    fn preset_selects_step_size() {
        let settings = parse(&["--preset", "3"]).settings().unwrap();
        assert_eq!(settings.step_size, 0.002);
    }

    #[test]
    fn unknown_preset_is_rejected() {
        assert!(matches!(
            parse(&["--preset", "8"]).settings(),
            Err(CliError::UnknownPreset { index: 8, max: 7 })
        ));
    }

    #[test]
    fn command_line_overrides_config_file() {
        let path = std::env::temp_dir().join(format!("newton-render-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{ "formula": "x^2-1", "derivative": "2*x", "range": 2.0, "step_size": 0.5 }"#,
        )
        .unwrap();
        let config = path.to_str().unwrap();

        let from_file = parse(&["--config", config]).settings().unwrap();
        assert_eq!(from_file.derivative.as_deref(), Some("2*x"));
        assert_eq!(from_file.step_size, 0.5);

        let overridden = parse(&["--config", config, "--numeric", "--range", "3"])
            .settings()
            .unwrap();
        assert_eq!(overridden.formula, "x^2-1");
        assert_eq!(overridden.derivative, None);
        assert_eq!(overridden.range, 3.0);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn formulas_resolve_like_solve() {
        let cases: [&[&str]; 5] = [
            &[],
            &["--formula", "x^2-1"],
            &["--formula", "x^2-1", "--derivative", "2*x"],
            &["--derivative", "3*x*x"],
            &["--formula", "x^2-1", "--derivative", "2*x", "--numeric"],
        ];
        for args in cases {
            let command = parse(args);
            let settings = command.settings().unwrap();
            let expected = resolve_formulas(
                &RenderSettings::default(),
                command.formula.as_deref(),
                command.derivative.as_deref(),
                command.numeric,
            );
            assert_eq!((settings.formula, settings.derivative), expected, "{:?}", args);
        }
    }

    #[test]
    fn step_and_preset_conflict() {
        assert!(TestCli::try_parse_from(["render", "--step", "0.1", "--preset", "1"]).is_err());
    }
}
