//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Settings::configure (after validation)
//!     → logging::plan (verbosity + optional logging.toml)
//!     → logging::install (global tracing subscriber, log bridge)
//! ```
//!
//! # Design Decisions
//! - Structured logging through `tracing` everywhere
//! - Third-party `log` records are captured by the same subscriber

pub mod logging;
