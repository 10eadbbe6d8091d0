//! Structured logging via the `tracing` crate.
//!
//! Configurable level, format (text/json), and destination (stdout, stderr,
//! file). Environment variables (`AGET_LOG`, `AGET_LOG_FORMAT`,
//! `AGET_LOG_OUTPUT`, `AGET_LOG_FILE`) override the config file.

use crate::error::AgetError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file, file+stderr
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output includes file; None means the agent default
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format, stdout/stderr only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "file".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
        }
    }
}

/// Resolve the log file path with precedence: CLI, AGET_LOG_FILE env, config
/// file, agent default (`.aget/aget.log`).
pub fn resolve_log_file_path(
    cli_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
    aget_dir: &Path,
) -> PathBuf {
    if let Some(p) = cli_file {
        if !p.as_os_str().is_empty() {
            return p;
        }
    }
    if let Ok(env_path) = std::env::var("AGET_LOG_FILE") {
        if !env_path.is_empty() {
            return PathBuf::from(env_path);
        }
    }
    if let Some(p) = config_file {
        if !p.as_os_str().is_empty() {
            return p;
        }
    }
    aget_dir.join("aget.log")
}

/// Initialize the logging system. Must be called at most once per process.
pub fn init_logging(config: &LoggingConfig, aget_dir: &Path) -> Result<(), AgetError> {
    if !config.enabled {
        Registry::default()
            .with(EnvFilter::new("off"))
            .with(fmt::layer().with_writer(|| std::io::sink()))
            .init();
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;
    let writer = build_writer(&output, config, aget_dir)?;
    let use_ansi = ansi_enabled(config.color, output);

    let base = Registry::default().with(filter);
    if format == "json" {
        base.with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(writer),
        )
        .init();
    } else {
        base.with(
            fmt::layer()
                .with_target(true)
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(use_ansi)
                .with_writer(writer),
        )
        .init();
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Destination {
    Stdout,
    Stderr,
    File,
    FileAndStderr,
}

fn build_writer(
    destination: &Destination,
    config: &LoggingConfig,
    aget_dir: &Path,
) -> Result<BoxMakeWriter, AgetError> {
    let open_log_file = || -> Result<std::fs::File, AgetError> {
        let path = resolve_log_file_path(None, config.file.clone(), aget_dir);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AgetError::ConfigError(format!("Failed to create log directory: {}", e))
            })?;
        }
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                AgetError::ConfigError(format!("Failed to open log file {:?}: {}", path, e))
            })
    };

    Ok(match destination {
        Destination::Stdout => BoxMakeWriter::new(std::io::stdout),
        Destination::Stderr => BoxMakeWriter::new(std::io::stderr),
        Destination::File => BoxMakeWriter::new(Arc::new(open_log_file()?)),
        Destination::FileAndStderr => {
            BoxMakeWriter::new(Arc::new(open_log_file()?).and(std::io::stderr))
        }
    })
}

/// Build environment filter from AGET_LOG or the config level.
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, AgetError> {
    if let Ok(filter) = EnvFilter::try_from_env("AGET_LOG") {
        return Ok(filter);
    }
    match config.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => {
            Ok(EnvFilter::new(config.level.as_str()))
        }
        other => Err(AgetError::ConfigError(format!(
            "Invalid log level: {}",
            other
        ))),
    }
}

fn determine_format(config: &LoggingConfig) -> Result<String, AgetError> {
    if let Ok(format) = std::env::var("AGET_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }
    match config.format.as_str() {
        "json" | "text" => Ok(config.format.clone()),
        other => Err(AgetError::ConfigError(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            other
        ))),
    }
}

fn determine_output(config: &LoggingConfig) -> Result<Destination, AgetError> {
    let output = match std::env::var("AGET_LOG_OUTPUT") {
        Ok(value) => value,
        Err(_) => config.output.clone(),
    };
    parse_destination(&output)
}

/// Color goes to terminals only; anything touching a file stays plain.
fn ansi_enabled(color: bool, destination: Destination) -> bool {
    color && matches!(destination, Destination::Stdout | Destination::Stderr)
}

fn parse_destination(output: &str) -> Result<Destination, AgetError> {
    match output {
        "stdout" => Ok(Destination::Stdout),
        "stderr" => Ok(Destination::Stderr),
        "file" => Ok(Destination::File),
        "file+stderr" => Ok(Destination::FileAndStderr),
        _ => Err(AgetError::ConfigError(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr', 'file', or 'file+stderr')",
            output
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_logging_config() {
        let config = LoggingConfig::default();
        assert!(config.enabled);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "text");
        assert_eq!(config.output, "file");
        assert_eq!(config.file, None);
        assert!(config.color);
    }

    #[test]
    fn test_parse_destination() {
        assert_eq!(parse_destination("stdout").unwrap(), Destination::Stdout);
        assert_eq!(
            parse_destination("file+stderr").unwrap(),
            Destination::FileAndStderr
        );
        assert!(parse_destination("both+neither").is_err());
    }

    #[test]
    fn test_resolve_log_file_path_cli_wins() {
        let cli = Some(PathBuf::from("/tmp/cli.log"));
        let config = Some(PathBuf::from("/tmp/config.log"));
        let path = resolve_log_file_path(cli, config, Path::new("/tmp/.aget"));
        assert_eq!(path, PathBuf::from("/tmp/cli.log"));
    }

    #[test]
    fn test_resolve_log_file_path_config_when_cli_none() {
        let config = Some(PathBuf::from("/tmp/config.log"));
        let path = resolve_log_file_path(None, config, Path::new("/tmp/.aget"));
        assert_eq!(path, PathBuf::from("/tmp/config.log"));
    }

    #[test]
    fn test_resolve_log_file_path_default_fallback() {
        let path = resolve_log_file_path(None, None, Path::new("/agent/.aget"));
        assert_eq!(path, PathBuf::from("/agent/.aget/aget.log"));
    }

    #[test]
    fn test_ansi_on_terminals_only() {
        assert!(ansi_enabled(true, Destination::Stdout));
        assert!(ansi_enabled(true, Destination::Stderr));
        assert!(!ansi_enabled(true, Destination::File));
        assert!(!ansi_enabled(true, Destination::FileAndStderr));
        assert!(!ansi_enabled(false, Destination::Stderr));
    }

    #[test]
    fn test_invalid_level_rejected() {
        let mut config = LoggingConfig::default();
        config.level = "loud".to_string();
        assert!(build_env_filter(&config).is_err());
    }
}
