//! Value casters.
//!
//! Each caster turns the raw string stored in the settings file into a
//! typed value. Casters are pure: no I/O, no state.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::level_filters::LevelFilter;

use crate::config::error::CastError;

/// Conversion from a raw option value into `Output`.
pub trait Cast {
    type Output;

    fn cast(&self, raw: &str) -> Result<Self::Output, CastError>;
}

/// `1`/`true` and `0`/`false`, case-insensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct Boolean;

impl Cast for Boolean {
    type Output = bool;

    fn cast(&self, raw: &str) -> Result<bool, CastError> {
        let value = raw.trim();
        if value == "1" || value.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if value == "0" || value.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(CastError::Boolean(raw.to_string()))
        }
    }
}

/// Any type parseable with `FromStr`, e.g. `Number::<u16>::new()` for ports.
pub struct Number<T>(PhantomData<T>);

impl<T> Number<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Number<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Cast for Number<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    type Output = T;

    fn cast(&self, raw: &str) -> Result<T, CastError> {
        raw.trim().parse::<T>().map_err(|e: T::Err| CastError::Number {
            value: raw.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Comma separated values, each trimmed. Order and duplicates are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct List;

impl Cast for List {
    type Output = Vec<String>;

    fn cast(&self, raw: &str) -> Result<Vec<String>, CastError> {
        Ok(raw.split(',').map(|item| item.trim().to_string()).collect())
    }
}

/// Comma separated `key:value` pairs. Only the first colon splits, so
/// values may themselves contain colons (URLs, ports).
#[derive(Debug, Clone, Copy, Default)]
pub struct Dict;

impl Cast for Dict {
    type Output = BTreeMap<String, String>;

    fn cast(&self, raw: &str) -> Result<BTreeMap<String, String>, CastError> {
        let mut map = BTreeMap::new();
        for item in List.cast(raw)? {
            if item.is_empty() {
                continue;
            }
            let (key, value) = item
                .split_once(':')
                .ok_or_else(|| CastError::DictEntry(item.clone()))?;
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
        Ok(map)
    }
}

/// Comma separated values with exactly `N` elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tuple<const N: usize>;

impl<const N: usize> Cast for Tuple<N> {
    type Output = [String; N];

    fn cast(&self, raw: &str) -> Result<[String; N], CastError> {
        let items = List.cast(raw)?;
        let found = items.len();
        items.try_into().map_err(|_| CastError::Arity {
            value: raw.to_string(),
            expected: N,
            found,
        })
    }
}

/// Verbosity of the framework loggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Numeric severity, `debug` = 10 through `critical` = 50.
    pub fn as_numeric(&self) -> u8 {
        match self {
            Self::Debug => 10,
            Self::Info => 20,
            Self::Warning => 30,
            Self::Error => 40,
            Self::Critical => 50,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }

    /// `tracing` has no level above error, critical collapses onto it.
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warning => LevelFilter::WARN,
            Self::Error | Self::Critical => LevelFilter::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Level name to [`LogLevel`], case-insensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLevel;

impl Cast for LoggingLevel {
    type Output = LogLevel;

    fn cast(&self, raw: &str) -> Result<LogLevel, CastError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "critical" => Ok(LogLevel::Critical),
            _ => Err(CastError::LoggingLevel(raw.to_string())),
        }
    }
}

/// Webdriver desired capabilities: a [`Dict`] whose `true`/`false` values
/// become JSON booleans, everything else stays a string.
#[derive(Debug, Clone, Copy, Default)]
pub struct Capabilities;

impl Cast for Capabilities {
    type Output = BTreeMap<String, Value>;

    fn cast(&self, raw: &str) -> Result<BTreeMap<String, Value>, CastError> {
        Ok(Dict
            .cast(raw)?
            .into_iter()
            .map(|(key, value)| {
                let value = if value.eq_ignore_ascii_case("true") {
                    Value::Bool(true)
                } else if value.eq_ignore_ascii_case("false") {
                    Value::Bool(false)
                } else {
                    Value::String(value)
                };
                (key, value)
            })
            .collect())
    }
}
