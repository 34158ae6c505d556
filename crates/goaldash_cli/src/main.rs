//! CLI smoke entry point.
//!
//! # Responsibility
//! - Run one session end to end: load rows, wait out the fallback timer if
//!   the load fails, and print the dashboard read model as JSON.
//! - Keep output deterministic apart from the dataset id.

use clap::Parser;
use goaldash_core::{
    default_log_level, init_logging, EngineConfig, JsonFileRowSource, LogTarget, Session,
    StaticRowSource,
};
use log::warn;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

/// Loads objective rows and prints the dashboard read model.
#[derive(Debug, Parser)]
#[command(name = "goaldash_cli", version, about)]
struct CliArgs {
    /// JSON file with engine config overrides.
    #[arg(long = "config", value_name = "FILE")]
    config_path: Option<PathBuf>,
    /// trace|debug|info|warn|error (defaults by build mode).
    #[arg(long)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files; stderr when omitted.
    #[arg(long)]
    log_dir: Option<String>,
    /// JSON array of raw rows; the sample dataset is used when omitted.
    #[arg(value_name = "ROWS")]
    rows_path: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, String> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read config `{}`: {err}", path.display()))?;
    EngineConfig::from_json_str(&text).map_err(|err| err.to_string())
}

fn run(args: CliArgs) -> Result<(), String> {
    let level = args.log_level.as_deref().unwrap_or(default_log_level());
    let target = match args.log_dir.as_deref() {
        Some(dir) => LogTarget::directory(dir)?,
        None => LogTarget::Stderr,
    };
    init_logging(level, target)?;

    let config = load_config(args.config_path.as_deref())?;
    let mut session = Session::new(config);

    let loaded = match args.rows_path.as_deref() {
        Some(path) => session.load(&JsonFileRowSource::new(path), Instant::now()),
        None => session.load(&StaticRowSource::new("no rows file", Vec::new()), Instant::now()),
    };
    if let Err(err) = loaded {
        warn!("event=cli_load_failed module=cli error={err}");
    }

    if let Some(due) = session.fallback_due() {
        std::thread::sleep(due.saturating_duration_since(Instant::now()));
        session.tick(Instant::now());
    }

    let dashboard = session.dashboard();
    let json = serde_json::to_string_pretty(&dashboard)
        .map_err(|err| format!("failed to render dashboard: {err}"))?;
    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    match run(CliArgs::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("goaldash_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn parses_flags_and_rows_path() {
        let parsed =
            CliArgs::try_parse_from(["goaldash_cli", "--log-level", "warn", "rows.json"]).unwrap();
        assert_eq!(parsed.log_level.as_deref(), Some("warn"));
        assert_eq!(parsed.rows_path.as_deref(), Some(Path::new("rows.json")));
        assert!(parsed.config_path.is_none());
    }

    #[test]
    fn rejects_unknown_flag_and_missing_value() {
        assert!(CliArgs::try_parse_from(["goaldash_cli", "--verbose"]).is_err());
        assert!(CliArgs::try_parse_from(["goaldash_cli", "--config"]).is_err());
        assert!(CliArgs::try_parse_from(["goaldash_cli", "a.json", "b.json"]).is_err());
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
