use crate::error::{Result as ServerErrorResult, ServerError};

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::info;

/// Install fern as the global logger.
///
/// Output goes to the configured file when one is set, otherwise to
/// stdout (optionally colored). Tracing events from the axum/tower
/// middleware stack are bridged into the same sink.
pub fn initialize(
    level: sm_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let sink = match log_file {
        Some(ref path) => file_sink(path)?,
        None => stdout_sink(colored),
    };

    Dispatch::new()
        .level(level.filter())
        .chain(sink)
        .apply()
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to install logger: {e}"),
        })?;

    match log_file {
        Some(path) => info!(
            "Logger initialized: level={:?}, file={}",
            level.filter(),
            path.display()
        ),
        None => info!("Logger initialized: level={:?}, stdout", level.filter()),
    }

    // Route tracing events through the log facade
    tracing_log::LogTracer::init().ok();

    Ok(())
}

fn file_sink(path: &Path) -> ServerErrorResult<Dispatch> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to open log file {}: {}", path.display(), e),
        })?;

    Ok(Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {:<5} {}: {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                record.level(),
                record.target(),
                message,
            ))
        })
        .chain(file))
}

fn stdout_sink(colored: bool) -> Dispatch {
    if colored {
        let colors = ColoredLevelConfig::new()
            .trace(Color::Magenta)
            .debug(Color::Blue)
            .info(Color::Green)
            .warn(Color::Yellow)
            .error(Color::Red);

        Dispatch::new()
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "{} {:<5} {}: {}",
                    humantime::format_rfc3339_seconds(SystemTime::now()),
                    colors.color(record.level()),
                    record.target(),
                    message,
                ))
            })
            .chain(std::io::stdout())
    } else {
        // Plain output for non-TTY sinks (systemd, docker logs)
        Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "{} {:<5} {}: {}",
                    humantime::format_rfc3339_seconds(SystemTime::now()),
                    record.level(),
                    record.target(),
                    message,
                ))
            })
            .chain(std::io::stdout())
    }
}
