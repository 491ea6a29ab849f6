pub mod commands;
pub mod error;

use std::process::ExitCode;

use clap::Parser;
use commands::{render, solve, Commands};
use log::debug;
use shared::{env, logger};

/// Newton fractals of complex polynomials
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv_path = env::init();
    logger::init();
    if let Some(path) = dotenv_path {
        debug!("Environment loaded from {}", path.display());
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Solve(args) => solve::run(args),
        Commands::Render(args) => render::run(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            logger::log_error("newton-fractal", &err);
            ExitCode::FAILURE
        }
    }
}
