use crate::error::{CliError, Result as CliResult};

use gitkit_config::LogLevel;

use std::fmt::Arguments;
use std::path::Path;
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, debug};

/// Crates whose debug output drowns out ours
const NOISY_MODULES: [&str; 4] = ["reqwest", "hyper_util", "rustls", "h2"];

fn write_line(out: FormatCallback, message: &Arguments, level: &dyn std::fmt::Display) {
    out.finish(format_args!(
        "[{} - {}] {}",
        humantime::format_rfc3339_seconds(SystemTime::now()),
        level,
        message
    ))
}

/// Install the global logger.
///
/// Lines always go to stderr, leaving stdout to the command's JSON. With
/// `log_file` set they are also appended, uncolored and tagged with their
/// source location, to that file.
pub fn initialize(log_level: LogLevel, log_file: Option<&Path>, colored: bool) -> CliResult<()> {
    let level_filter: LevelFilter = log_level.into();

    let mut root = Dispatch::new().level(level_filter);
    for module in NOISY_MODULES {
        root = root.level_for(module, level_filter.min(LevelFilter::Warn));
    }

    let stderr = if colored {
        let colors = ColoredLevelConfig::new()
            .debug(Color::Blue)
            .info(Color::Green)
            .warn(Color::Yellow)
            .error(Color::Red);
        Dispatch::new().format(move |out, message, record| {
            write_line(out, message, &colors.color(record.level()))
        })
    } else {
        Dispatch::new().format(|out, message, record| write_line(out, message, &record.level()))
    };
    root = root.chain(stderr.chain(std::io::stderr()));

    if let Some(path) = log_file {
        let file = fern::log_file(path).map_err(|e| CliError::Logger {
            message: format!("Failed to open log file {}: {e}", path.display()),
        })?;
        root = root.chain(
            Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "[{} - {}] {} [{}:{}]",
                        humantime::format_rfc3339_seconds(SystemTime::now()),
                        record.level(),
                        message,
                        record.file().unwrap_or("unknown"),
                        record.line().unwrap_or(0),
                    ))
                })
                .chain(file),
        );
    }

    root.apply().map_err(|e| CliError::Logger {
        message: format!("Failed to initialize logger: {e}"),
    })?;

    debug!(
        "Logger initialized: level={level_filter}, file={}",
        log_file.map_or_else(|| String::from("none"), |p| p.display().to_string())
    );

    Ok(())
}
