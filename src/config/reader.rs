//! INI settings file reader.
//!
//! Wraps a parsed `rust-ini` document and exposes typed lookups: a missing
//! section or option yields the caller's default untouched, a present value
//! goes through the requested [`Cast`].
//!
//! Section names are case-sensitive, option names are not. A section or an
//! option (compared case-insensitively) may appear only once per file.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};

use crate::config::casts::Cast;
use crate::config::error::ConfigError;

/// Read-only view over one settings file.
#[derive(Debug)]
pub struct IniReader {
    path: PathBuf,
    document: Ini,
}

impl IniReader {
    /// Read and parse the file at `path`.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse already loaded content; `origin` is only used in error messages.
    pub fn parse(content: &str, origin: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let origin = origin.as_ref().to_path_buf();
        // Values are handed to casts verbatim: no quote stripping, no escapes.
        let option = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let document =
            Ini::load_from_str_opt(content, option).map_err(|source| ConfigError::Parse {
                path: origin.clone(),
                source,
            })?;
        reject_duplicates(&document, &origin)?;
        tracing::debug!(path = %origin.display(), "Settings file parsed");
        Ok(Self {
            path: origin,
            document,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw string value, `None` when the section or option is absent.
    pub fn raw(&self, section: &str, option: &str) -> Option<&str> {
        self.document.section(Some(section)).and_then(|properties| {
            properties
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(option))
                .map(|(_, value)| value)
        })
    }

    /// Cast `section.option`, or return `default` as-is when absent.
    pub fn get<C: Cast>(
        &self,
        section: &str,
        option: &str,
        default: C::Output,
        cast: C,
    ) -> Result<C::Output, ConfigError> {
        Ok(self.get_opt(section, option, cast)?.unwrap_or(default))
    }

    /// Cast `section.option` when present.
    pub fn get_opt<C: Cast>(
        &self,
        section: &str,
        option: &str,
        cast: C,
    ) -> Result<Option<C::Output>, ConfigError> {
        self.raw(section, option)
            .map(|raw| {
                cast.cast(raw).map_err(|source| ConfigError::Cast {
                    section: section.to_string(),
                    option: option.to_string(),
                    source,
                })
            })
            .transpose()
    }

    /// Plain string lookup with a default.
    pub fn get_str(&self, section: &str, option: &str, default: &str) -> String {
        self.get_str_opt(section, option)
            .unwrap_or_else(|| default.to_string())
    }

    /// Plain string lookup.
    pub fn get_str_opt(&self, section: &str, option: &str) -> Option<String> {
        self.raw(section, option).map(|raw| raw.trim().to_string())
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.document.section(Some(section)).is_some()
    }

    /// Named sections in file order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.document.sections().flatten()
    }
}

fn reject_duplicates(document: &Ini, origin: &Path) -> Result<(), ConfigError> {
    let mut sections = HashSet::new();
    for (section, properties) in document.iter() {
        let name = section.unwrap_or_default();
        if section.is_some() && !sections.insert(name) {
            return Err(ConfigError::DuplicateSection {
                path: origin.to_path_buf(),
                section: name.to_string(),
            });
        }
        let mut options = HashSet::new();
        for (key, _) in properties.iter() {
            if !options.insert(key.to_ascii_lowercase()) {
                return Err(ConfigError::DuplicateOption {
                    path: origin.to_path_buf(),
                    section: name.to_string(),
                    option: key.to_ascii_lowercase(),
                });
            }
        }
    }
    Ok(())
}
