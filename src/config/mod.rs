//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! robottelo.properties (INI)
//!     → reader.rs (parse, typed lookups via casts.rs)
//!     → features/ (one group per section: read + rules)
//!     → validation.rs (rule evaluation, all messages collected)
//!     → settings.rs (aggregate, configure once)
//!     → logging + entity defaults, only after validation passed
//! ```
//!
//! # Design Decisions
//! - `[server]` is always read and validated; other sections only when present
//! - Cast failures are hard errors, never validation messages
//! - A configured `Settings` is immutable from the loader's point of view

pub mod casts;
pub mod error;
pub mod features;
pub mod reader;
pub mod settings;
pub mod validation;

pub use casts::{Cast, LogLevel};
pub use error::{CastError, ConfigError};
pub use features::{DockerSettings, FeatureSettings, ServerSettings};
pub use reader::IniReader;
pub use settings::{global, project_root, Settings, PROJECT_ROOT_ENV, SETTINGS_FILE_NAME};
