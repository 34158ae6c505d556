//! Logging bootstrap for the engine and its hosts.
//!
//! # Responsibility
//! - Start the `flexi_logger` backend once per process.
//! - Keep row-derived text out of log lines unless sanitized.
//!
//! # Invariants
//! - Initialization is idempotent for an identical level and target.
//! - Reconfiguration with a different level or target is rejected.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "goaldash";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGER: OnceCell<ActiveLogger> = OnceCell::new();

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Rolling files in an absolute directory.
    Directory(PathBuf),
}

impl LogTarget {
    /// Builds a directory target, rejecting blank or relative paths.
    pub fn directory(path: &str) -> Result<Self, String> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err("log directory cannot be empty".to_string());
        }
        let dir = Path::new(trimmed);
        if !dir.is_absolute() {
            return Err(format!("log directory must be absolute, got `{trimmed}`"));
        }
        Ok(Self::Directory(dir.to_path_buf()))
    }

    fn describe(&self) -> String {
        match self {
            Self::Stderr => "stderr".to_string(),
            Self::Directory(dir) => dir.display().to_string(),
        }
    }
}

struct ActiveLogger {
    level: &'static str,
    target: LogTarget,
    _handle: LoggerHandle,
}

/// Starts logging at `level` into `target`.
///
/// # Errors
/// - Unsupported level string.
/// - Log directory cannot be created.
/// - Logging already active with another level or target.
/// - Backend start failure.
pub fn init_logging(level: &str, target: LogTarget) -> Result<(), String> {
    let level = normalize_level(level)?;

    let active = LOGGER.get_or_try_init(|| start_backend(level, &target))?;
    if active.target != target {
        return Err(format!(
            "logging already writes to `{}`; refusing to switch to `{}`",
            active.target.describe(),
            target.describe()
        ));
    }
    if active.level != level {
        return Err(format!(
            "logging already runs at `{}`; refusing to switch to `{level}`",
            active.level
        ));
    }
    Ok(())
}

fn start_backend(level: &'static str, target: &LogTarget) -> Result<ActiveLogger, String> {
    let logger = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?;

    let handle = match target {
        LogTarget::Stderr => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::default_format)
            .start(),
        LogTarget::Directory(dir) => {
            std::fs::create_dir_all(dir).map_err(|err| {
                format!("failed to create log directory `{}`: {err}", dir.display())
            })?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir.as_path())
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
                .start()
        }
    }
    .map_err(|err| format!("failed to start logger: {err}"))?;

    info!(
        "event=logging_started module=core level={level} target={} version={}",
        target.describe(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        level,
        target: target.clone(),
        _handle: handle,
    })
}

/// Returns the active level and target, or `None` before initialization.
pub fn logging_status() -> Option<(&'static str, LogTarget)> {
    LOGGER
        .get()
        .map(|active| (active.level, active.target.clone()))
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Flattens newlines and caps length so free text fits one log line.
pub fn sanitize_message(value: &str, max_chars: usize) -> String {
    let flattened = value.replace(['\n', '\r'], " ");
    if flattened.chars().count() <= max_chars {
        return flattened;
    }
    let mut truncated = flattened.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, normalize_level, sanitize_message, LogTarget};

    #[test]
    fn normalize_level_is_case_insensitive() {
        assert_eq!(normalize_level(" WARNING ").unwrap(), "warn");
        assert_eq!(normalize_level("Error").unwrap(), "error");
        assert!(normalize_level("verbose").is_err());
    }

    #[test]
    fn directory_target_requires_absolute_path() {
        let err = LogTarget::directory("logs").unwrap_err();
        assert!(err.contains("absolute"));
        assert!(LogTarget::directory("  ").is_err());
    }

    #[test]
    fn sanitize_message_flattens_and_caps() {
        assert_eq!(sanitize_message("a\nb", 10), "a b");
        assert_eq!(sanitize_message("abcdef", 3), "abc...");
    }

    #[test]
    fn init_is_idempotent_and_rejects_conflicts() {
        init_logging("info", LogTarget::Stderr).expect("first init");
        init_logging("INFO", LogTarget::Stderr).expect("same config is idempotent");

        let level_err = init_logging("debug", LogTarget::Stderr).unwrap_err();
        assert!(level_err.contains("refusing to switch"));

        let dir = std::env::temp_dir().join("goaldash-logging-conflict");
        let target_err = init_logging("info", LogTarget::Directory(dir)).unwrap_err();
        assert!(target_err.contains("refusing to switch"));

        let (level, target) = logging_status().expect("logging is active");
        assert_eq!(level, "info");
        assert_eq!(target, LogTarget::Stderr);
    }
}
