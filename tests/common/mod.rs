//! Shared utilities for integration tests.

use std::fs;
use std::path::Path;

use robottelo::config::SETTINGS_FILE_NAME;
use tempfile::TempDir;

/// A throwaway project root holding `robottelo.properties`.
pub fn project_with_settings(content: &str) -> TempDir {
    let root = tempfile::tempdir().unwrap();
    write_settings(root.path(), content);
    root
}

/// Overwrite the settings file under `root`.
#[allow(dead_code)]
pub fn write_settings(root: &Path, content: &str) {
    fs::write(root.join(SETTINGS_FILE_NAME), content).unwrap();
}

/// Smallest settings file that passes validation.
#[allow(dead_code)]
pub const MINIMAL: &str = "[server]\nhostname = foo.example.com\nssh_password = x\n";
