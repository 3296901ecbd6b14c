use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use thiserror::Error;
use time::UtcOffset;
use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{self, fmt, prelude::*, EnvFilter};

const LOG_RETENTION_DAYS: u64 = 7;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("unable to determine user cache directory")]
    NoCacheDir,
    #[error("log file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid log filter {filter:?}: {source}")]
    Filter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("failed to format session timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
    #[error("failed to install subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Get the log directory path in the user-specific OS cache directory
/// - Linux: ~/.cache/recette-lang/recette-language-server/
/// - macOS: ~/Library/Caches/recette-lang/recette-language-server/
/// - Windows: %LOCALAPPDATA%\recette-lang\recette-language-server\
fn get_log_dir() -> Result<PathBuf, LoggingError> {
    let log_dir = dirs::cache_dir()
        .ok_or(LoggingError::NoCacheDir)?
        .join("recette-lang")
        .join("recette-language-server");
    fs::create_dir_all(&log_dir)?;
    Ok(log_dir)
}

fn is_session_log(name: &str) -> bool {
    name.starts_with("session-") && name.ends_with(".log")
}

/// Remove session logs last modified more than LOG_RETENTION_DAYS ago
fn cleanup_old_logs(log_dir: &Path) -> io::Result<()> {
    let now = SystemTime::now();
    let retention = Duration::from_secs(LOG_RETENTION_DAYS * 24 * 60 * 60);

    for entry in fs::read_dir(log_dir)?.flatten() {
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        let expired = metadata
            .modified()
            .ok()
            .and_then(|modified| now.duration_since(modified).ok())
            .is_some_and(|age| age > retention);
        let is_log = entry.file_name().to_str().is_some_and(is_session_log);
        if metadata.is_file() && is_log && expired {
            match fs::remove_file(entry.path()) {
                Ok(()) => eprintln!("Removed old log file: {:?}", entry.path()),
                Err(e) => eprintln!("Failed to remove old log file {:?}: {}", entry.path(), e),
            }
        }
    }
    Ok(())
}

fn stderr_filter(log_level: Option<&str>) -> Result<EnvFilter, LoggingError> {
    match log_level {
        Some(level) => EnvFilter::try_new(level).map_err(|source| LoggingError::Filter {
            filter: level.to_string(),
            source,
        }),
        // Fall back to RUST_LOG, then to "info"
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))),
    }
}

/// Initialize logging to stderr and, optionally, to a per-session file
///
/// Stdout carries the protocol, so nothing is ever logged there.
///
/// # Arguments
/// * `no_color` - Disable ANSI colors in stderr output
/// * `log_level` - Override log level (otherwise uses RUST_LOG or defaults to "info")
/// * `enable_file_logging` - Also write DEBUG-level logs to the user cache directory (disable for tests)
///
/// The returned guard flushes the file writer when dropped and must be kept
/// alive for the duration of the program.
pub fn init_logger(
    no_color: bool,
    log_level: Option<&str>,
    enable_file_logging: bool,
) -> Result<WorkerGuard, LoggingError> {
    let timer = fmt::time::OffsetTime::new(
        UtcOffset::UTC,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"),
    );

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_timer(timer.clone())
        .with_ansi(!no_color)
        .with_filter(stderr_filter(log_level)?);

    if !enable_file_logging {
        let (_, guard) = tracing_appender::non_blocking(io::sink());
        tracing_subscriber::registry().with(stderr_layer).try_init()?;
        return Ok(guard);
    }

    let log_dir = get_log_dir()?;
    cleanup_old_logs(&log_dir)?;

    let timestamp = time::OffsetDateTime::now_utc()
        .format(format_description!("[year][month][day]-[hour][minute][second]"))?;
    let log_path = log_dir.join(format!("session-{}-{}.log", timestamp, std::process::id()));
    let file = fs::OpenOptions::new().create(true).append(true).open(&log_path)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_timer(timer)
        .with_ansi(false)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;
    eprintln!("Logging to file: {:?}", log_path);
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_log_names() {
        assert!(is_session_log("session-20260101-120000-42.log"));
        assert!(!is_session_log("wire-20260101.log"));
        assert!(!is_session_log("session-20260101.txt"));
    }

    #[test]
    fn test_invalid_filter_is_reported() {
        let err = stderr_filter(Some("recette=notalevel")).unwrap_err();
        assert!(matches!(err, LoggingError::Filter { .. }));
    }
}
