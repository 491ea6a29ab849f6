use std::io::Write;

use chrono::Local;
use colored::{ColoredString, Colorize};
use env_logger::Env;
use error_iter::ErrorIter;
use log::{error, Level};

/// Installs the global logger. `RUST_LOG` overrides the default `info` filter.
pub fn init() {
    let result = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {} [{}] {}",
                Local::now().format("%H:%M:%S%.3f").to_string().dimmed(),
                level_label(record.level()),
                record.target(),
                record.args()
            )
        })
        .try_init();

    // a second init, e.g. from tests, keeps the first logger
    if result.is_err() {
        log::debug!("Logger already initialised");
    }
}

fn level_label(level: Level) -> ColoredString {
    match level {
        Level::Error => "ERROR".red().bold(),
        Level::Warn => "WARN".yellow(),
        Level::Info => "INFO".green(),
        Level::Debug => "DEBUG".blue(),
        Level::Trace => "TRACE".purple(),
    }
}

/// Logs `err` followed by its chain of sources.
pub fn log_error<E: std::error::Error + 'static>(context: &str, err: &E) {
    error!("{context}: {err}");
    for source in ErrorIter::sources(err).skip(1) {
        error!("  Caused by: {source}");
    }
}
