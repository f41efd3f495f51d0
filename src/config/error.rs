//! Error types for the configuration layer.
//!
//! `ConfigError` is the single "improperly configured" kind surfaced by
//! [`Settings::configure`](crate::config::Settings::configure). `CastError`
//! is produced by the value casters and always reaches callers wrapped in
//! `ConfigError::Cast`, never as a validation message.

use std::path::PathBuf;
use thiserror::Error;

/// Failure converting a raw option string into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CastError {
    #[error("{0:?} is not a valid boolean, expected one of 1, 0, true, false")]
    Boolean(String),

    #[error("{value:?} is not a valid number: {reason}")]
    Number { value: String, reason: String },

    #[error("{0:?} is not a valid key:value pair")]
    DictEntry(String),

    #[error("{value:?} has {found} element(s), expected {expected}")]
    Arity {
        value: String,
        expected: usize,
        found: usize,
    },

    #[error("{0:?} is not a valid logging level, expected one of debug, info, warning, error, critical")]
    LoggingLevel(String),
}

/// Robottelo is somehow improperly configured.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Not able to find settings file at {}", .0.display())]
    SettingsNotFound(PathBuf),

    #[error("Failed to read settings file {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: ini::ParseError,
    },

    #[error("Section [{section}] appears more than once in {}", .path.display())]
    DuplicateSection { path: PathBuf, section: String },

    #[error("Option {option} appears more than once in [{section}] of {}", .path.display())]
    DuplicateOption {
        path: PathBuf,
        section: String,
        option: String,
    },

    #[error("Invalid value for [{section}] {option}: {source}")]
    Cast {
        section: String,
        option: String,
        source: CastError,
    },

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Failed to validate the configuration, check the message(s):\n{}", .0.join("\n"))]
    Validation(Vec<String>),

    #[error("Failed to load logging configuration {}: {reason}", .path.display())]
    Logging { path: PathBuf, reason: String },
}

impl ConfigError {
    /// Individual validation messages, empty for every other kind.
    pub fn validation_errors(&self) -> &[String] {
        match self {
            ConfigError::Validation(errors) => errors,
            _ => &[],
        }
    }
}
