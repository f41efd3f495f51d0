//! Structured logging.
//!
//! # Responsibilities
//! - Decide the subscriber setup from the configured verbosity and an
//!   optional `logging.toml` at the project root
//! - Install the global `tracing` subscriber once configuration is valid
//! - Route `log` records (third-party crates) through the same subscriber
//!
//! # Design Decisions
//! - Planning is separate from installing: a malformed logging file fails
//!   configuration before any global state changes
//! - `logging.toml`, when present, replaces the default setup entirely
//! - Installing over an existing subscriber keeps the existing one

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::casts::LogLevel;
use crate::config::error::ConfigError;

pub const LOGGING_FILE_NAME: &str = "logging.toml";

/// Targets whose level follows the configured verbosity.
pub const FRAMEWORK_TARGETS: &[&str] = &["robottelo"];

/// Noisy dependencies kept at `warn`.
pub const THIRD_PARTY_TARGETS: &[&str] = &["reqwest", "hyper", "hyper_util", "rustls"];

/// Output format selectable from `logging.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Contents of `logging.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingFile {
    /// `EnvFilter` directives, e.g. `"info,robottelo=debug"`.
    pub filter: String,
    pub format: LogFormat,
    pub ansi: bool,
}

impl Default for LoggingFile {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
            ansi: true,
        }
    }
}

/// Resolved subscriber setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingPlan {
    pub filter: String,
    /// `None` selects the default `LEVEL target:line: message` layout.
    pub format: Option<LogFormat>,
    pub ansi: bool,
    /// The logging file the plan came from, if any.
    pub source: Option<PathBuf>,
}

fn directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warning => "warn",
        LogLevel::Error | LogLevel::Critical => "error",
    }
}

/// Filter directives for the default setup.
pub fn default_filter(verbosity: LogLevel) -> String {
    let mut directives = vec!["warn".to_string()];
    directives.extend(
        FRAMEWORK_TARGETS
            .iter()
            .map(|target| format!("{target}={}", directive(verbosity))),
    );
    directives.extend(THIRD_PARTY_TARGETS.iter().map(|target| format!("{target}=warn")));
    directives.join(",")
}

/// Load `logging.toml` from `root` when it exists.
pub fn load_logging_file(root: &Path) -> Result<Option<LoggingFile>, ConfigError> {
    let path = root.join(LOGGING_FILE_NAME);
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path).map_err(|e| ConfigError::Logging {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    toml::from_str(&content)
        .map(Some)
        .map_err(|e| ConfigError::Logging {
            path,
            reason: e.to_string(),
        })
}

/// Work out the subscriber setup without touching global state.
pub fn plan(verbosity: LogLevel, root: &Path) -> Result<LoggingPlan, ConfigError> {
    let plan = match load_logging_file(root)? {
        Some(file) => LoggingPlan {
            filter: file.filter,
            format: Some(file.format),
            ansi: file.ansi,
            source: Some(root.join(LOGGING_FILE_NAME)),
        },
        None => LoggingPlan {
            filter: default_filter(verbosity),
            format: None,
            ansi: true,
            source: None,
        },
    };
    if let Err(e) = EnvFilter::try_new(&plan.filter) {
        return Err(ConfigError::Logging {
            path: plan.source.unwrap_or_else(|| root.join(LOGGING_FILE_NAME)),
            reason: e.to_string(),
        });
    }
    Ok(plan)
}

/// Install the global subscriber. Returns `false` when one was already set.
pub fn install(plan: &LoggingPlan) -> bool {
    let filter = EnvFilter::try_new(&plan.filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    let result = match plan.format {
        None => registry
            .with(
                fmt::layer()
                    .without_time()
                    .with_target(true)
                    .with_line_number(true)
                    .with_ansi(plan.ansi),
            )
            .try_init(),
        Some(LogFormat::Pretty) => registry
            .with(fmt::layer().pretty().with_ansi(plan.ansi))
            .try_init(),
        Some(LogFormat::Compact) => registry
            .with(fmt::layer().compact().with_ansi(plan.ansi))
            .try_init(),
        Some(LogFormat::Json) => registry.with(fmt::layer().json()).try_init(),
    };

    match result {
        Ok(()) => {
            tracing::debug!(filter = %plan.filter, source = ?plan.source, "Logging configured");
            true
        }
        Err(e) => {
            tracing::debug!(error = %e, "Global subscriber already installed, keeping it");
            false
        }
    }
}
